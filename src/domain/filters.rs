use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::invoice::Invoice;
use crate::domain::sale::ProductSale;
use crate::domain::transaction::Transaction;
use crate::errors::RevenueError;

/// Dimensions a summary query can be narrowed by. Every field is
/// independently optional; an absent field imposes no restriction on that
/// dimension. Date bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl SummaryFilter {
    /// A filter that matches everything.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn validate(&self) -> Result<(), RevenueError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(RevenueError::InvalidInput(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }
        Ok(())
    }

    /// Inclusive date-range check. A row with no decodable date satisfies an
    /// active bound only if there is no bound to prove.
    pub fn date_in_bounds(&self, date: Option<NaiveDate>) -> bool {
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    pub fn matches_transaction(&self, txn: &Transaction) -> bool {
        if let Some(company_id) = self.company_id {
            if txn.company_id != Some(company_id) {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if txn.user_id != Some(user_id) {
                return false;
            }
        }
        self.date_in_bounds(txn.date)
    }

    pub fn matches_sale(&self, sale: &ProductSale) -> bool {
        if let Some(company_id) = self.company_id {
            if sale.company_id != company_id {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if sale.sold_by != user_id {
                return false;
            }
        }
        self.date_in_bounds(Some(sale.created_at.date_naive()))
    }

    pub fn matches_invoice(&self, invoice: &Invoice) -> bool {
        if let Some(company_id) = self.company_id {
            if invoice.company_id != company_id {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if invoice.created_by != user_id {
                return false;
            }
        }
        self.date_in_bounds(Some(invoice.created_at.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::EntryKind;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = SummaryFilter::any();
        let mut txn = Transaction::new(EntryKind::Income, Decimal::from(10), date(2024, 1, 5));
        assert!(filter.matches_transaction(&txn));
        txn.date = None;
        assert!(filter.matches_transaction(&txn), "absent bounds impose nothing");
    }

    #[test]
    fn bounds_are_inclusive() {
        let filter = SummaryFilter::any().with_dates(date(2024, 1, 5), date(2024, 1, 10));
        assert!(filter.date_in_bounds(Some(date(2024, 1, 5))));
        assert!(filter.date_in_bounds(Some(date(2024, 1, 10))));
        assert!(!filter.date_in_bounds(Some(date(2024, 1, 4))));
        assert!(!filter.date_in_bounds(Some(date(2024, 1, 11))));
    }

    #[test]
    fn undated_row_fails_active_bound() {
        let filter = SummaryFilter::any().with_dates(date(2024, 1, 1), date(2024, 1, 31));
        assert!(!filter.date_in_bounds(None));
    }

    #[test]
    fn company_filter_does_not_match_null() {
        let filter = SummaryFilter::any().with_company(Uuid::new_v4());
        let txn = Transaction::new(EntryKind::Expense, Decimal::from(5), date(2024, 2, 1));
        assert!(!filter.matches_transaction(&txn));
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        let filter = SummaryFilter::any().with_dates(date(2024, 2, 1), date(2024, 1, 1));
        assert!(filter.validate().is_err());
    }

    #[test]
    fn single_day_window_is_valid() {
        let filter = SummaryFilter::any().with_dates(date(2024, 1, 1), date(2024, 1, 1));
        assert!(filter.validate().is_ok());
    }
}
