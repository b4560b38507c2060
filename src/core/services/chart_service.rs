use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{EntryKind, Granularity, Transaction};

/// One fixed calendar period on a chart's time axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodBucket {
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

impl PeriodBucket {
    fn empty(label: String) -> Self {
        Self {
            label,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
        }
    }
}

/// Buckets an already-fetched transaction list into trailing calendar
/// periods. Pure functions; no retained state between calls.
pub struct ChartService;

impl ChartService {
    /// Returns exactly `period_count` buckets, oldest first, ending at the
    /// period containing `reference`. Periods with no activity stay
    /// zero-filled so charts keep a fixed-width time axis. Transactions
    /// outside the window, and rows whose date never decoded, are skipped.
    pub fn bucket_by_period(
        transactions: &[Transaction],
        period_count: usize,
        granularity: Granularity,
        reference: NaiveDate,
    ) -> Vec<PeriodBucket> {
        if period_count == 0 {
            return Vec::new();
        }

        let mut anchors = Vec::with_capacity(period_count);
        let mut anchor = granularity.anchor(reference);
        for _ in 0..period_count {
            anchors.push(anchor);
            anchor = granularity.previous(anchor);
        }
        anchors.reverse();

        let slots: HashMap<NaiveDate, usize> = anchors
            .iter()
            .enumerate()
            .map(|(index, anchor)| (*anchor, index))
            .collect();
        let mut buckets: Vec<PeriodBucket> = anchors
            .iter()
            .map(|anchor| PeriodBucket::empty(granularity.label(*anchor)))
            .collect();

        for txn in transactions {
            let Some(date) = txn.date else { continue };
            let Some(&slot) = slots.get(&granularity.anchor(date)) else {
                continue;
            };
            match txn.kind {
                EntryKind::Income => buckets[slot].income += txn.amount,
                EntryKind::Expense => buckets[slot].expenses += txn.amount,
            }
        }
        buckets
    }

    /// Convenience wrapper anchored at the current UTC date.
    pub fn bucket_trailing(
        transactions: &[Transaction],
        period_count: usize,
        granularity: Granularity,
    ) -> Vec<PeriodBucket> {
        Self::bucket_by_period(
            transactions,
            period_count,
            granularity,
            Utc::now().date_naive(),
        )
    }
}
