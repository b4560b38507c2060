use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{InvoiceStatus, SaleStatus, SummaryFilter};
use crate::storage::RevenueStore;

use super::ServiceResult;

/// Reconciled financial picture across the three revenue sources.
///
/// Ledger transactions contribute to both sides; sold product sales and
/// realized invoices only ever add to income.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenueSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

impl RevenueSummary {
    pub fn from_parts(
        total_income: Decimal,
        total_expenses: Decimal,
        income_count: usize,
        expense_count: usize,
    ) -> Self {
        Self {
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
            income_count,
            expense_count,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Computes revenue summaries against an injected store. Stateless and
/// reentrant; concurrent calls with different filters never interfere.
pub struct RevenueService {
    store: Arc<dyn RevenueStore>,
}

impl RevenueService {
    pub fn new(store: Arc<dyn RevenueStore>) -> Self {
        Self { store }
    }

    /// Unions ledger transactions, sold product sales, and realized invoices
    /// into one summary. The three reads run concurrently; if any of them
    /// fails the whole computation fails, so totals never under-report.
    pub async fn compute_summary(&self, filter: &SummaryFilter) -> ServiceResult<RevenueSummary> {
        filter.validate()?;

        let (transactions, sales, invoices) = tokio::try_join!(
            self.store.transactions(filter),
            self.store.product_sales(filter, SaleStatus::REVENUE),
            self.store.invoices(filter, InvoiceStatus::REALIZED),
        )?;

        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;
        let mut income_count = 0usize;
        let mut expense_count = 0usize;
        for txn in &transactions {
            if txn.is_income() {
                income_total += txn.amount;
                income_count += 1;
            } else {
                expense_total += txn.amount;
                expense_count += 1;
            }
        }
        for sale in &sales {
            income_total += sale.total_amount;
            income_count += 1;
        }
        for invoice in &invoices {
            income_total += invoice.total;
            income_count += 1;
        }

        tracing::debug!(
            transactions = transactions.len(),
            sales = sales.len(),
            invoices = invoices.len(),
            %income_total,
            %expense_total,
            "computed revenue summary"
        );

        Ok(RevenueSummary::from_parts(
            income_total,
            expense_total,
            income_count,
            expense_count,
        ))
    }
}
