use chrono::NaiveDate;
use rust_decimal::Decimal;

use revenue_core::core::services::ChartService;
use revenue_core::domain::{EntryKind, Granularity, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn txn(kind: EntryKind, amount: i64, at: NaiveDate) -> Transaction {
    Transaction::new(kind, Decimal::from(amount), at)
}

#[test]
fn six_empty_buckets_end_at_the_reference_month() {
    let buckets = ChartService::bucket_by_period(&[], 6, Granularity::Month, date(2024, 6, 20));
    assert_eq!(buckets.len(), 6);
    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Jan 2024", "Feb 2024", "Mar 2024", "Apr 2024", "May 2024", "Jun 2024"]
    );
    assert!(buckets
        .iter()
        .all(|b| b.income == Decimal::ZERO && b.expenses == Decimal::ZERO));
}

#[test]
fn bucket_count_is_fixed_regardless_of_input() {
    let rows = vec![
        txn(EntryKind::Income, 10, date(2024, 6, 1)),
        txn(EntryKind::Income, 10, date(1999, 1, 1)),
    ];
    for count in [1, 3, 12] {
        let buckets =
            ChartService::bucket_by_period(&rows, count, Granularity::Month, date(2024, 6, 20));
        assert_eq!(buckets.len(), count);
    }
}

#[test]
fn income_and_expenses_accumulate_separately() {
    let rows = vec![
        txn(EntryKind::Income, 100, date(2024, 1, 5)),
        txn(EntryKind::Expense, 30, date(2024, 1, 10)),
        txn(EntryKind::Expense, 5, date(2024, 1, 20)),
    ];
    let buckets = ChartService::bucket_by_period(&rows, 1, Granularity::Month, date(2024, 1, 31));
    assert_eq!(buckets[0].income, Decimal::from(100));
    assert_eq!(buckets[0].expenses, Decimal::from(35));
}

#[test]
fn trailing_wrapper_keeps_the_fixed_width_axis() {
    let buckets = ChartService::bucket_trailing(&[], 6, Granularity::Month);
    assert_eq!(buckets.len(), 6);
}

#[test]
fn yearly_buckets_cover_whole_years() {
    let rows = vec![
        txn(EntryKind::Income, 10, date(2023, 2, 1)),
        txn(EntryKind::Income, 20, date(2023, 11, 30)),
        txn(EntryKind::Income, 40, date(2024, 1, 1)),
    ];
    let buckets = ChartService::bucket_by_period(&rows, 2, Granularity::Year, date(2024, 6, 1));
    assert_eq!(buckets[0].label, "2023");
    assert_eq!(buckets[0].income, Decimal::from(30));
    assert_eq!(buckets[1].income, Decimal::from(40));
}

#[test]
fn weekly_buckets_anchor_on_monday() {
    // 2024-06-20 is a Thursday; the current week starts 2024-06-17.
    let rows = vec![
        txn(EntryKind::Expense, 7, date(2024, 6, 17)),
        txn(EntryKind::Expense, 9, date(2024, 6, 16)),
    ];
    let buckets = ChartService::bucket_by_period(&rows, 2, Granularity::Week, date(2024, 6, 20));
    assert_eq!(buckets[0].expenses, Decimal::from(9));
    assert_eq!(buckets[1].expenses, Decimal::from(7));
}
