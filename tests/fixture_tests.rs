use std::sync::Arc;

use rust_decimal::Decimal;

use revenue_core::core::services::RevenueService;
use revenue_core::domain::SummaryFilter;
use revenue_core::storage::MemoryStore;

const FIXTURE: &str = r#"{
  "transactions": [
    {
      "id": "5f3c6f5a-5df4-4f3b-9c6a-111111111111",
      "company_id": "0a8f2d51-9f13-4f6c-8e58-222222222222",
      "type": "income",
      "amount": 100,
      "description": "January retainer",
      "date": "2024-01-05"
    },
    {
      "id": "5f3c6f5a-5df4-4f3b-9c6a-333333333333",
      "company_id": "0a8f2d51-9f13-4f6c-8e58-222222222222",
      "type": "expense",
      "amount": "30",
      "date": "2024-01-10"
    },
    {
      "id": "5f3c6f5a-5df4-4f3b-9c6a-444444444444",
      "type": "income",
      "amount": "not-a-number",
      "date": "someday"
    }
  ],
  "product_sales": [
    {
      "id": "7b1d2e90-0d4e-4a0f-b5ad-555555555555",
      "company_id": "0a8f2d51-9f13-4f6c-8e58-222222222222",
      "sold_by": "9c74a1de-31f7-4f55-a5a4-666666666666",
      "status": "sold",
      "total_amount": 50,
      "created_at": "2024-01-08T12:00:00Z",
      "sold_at": "2024-01-08T15:30:00Z"
    },
    {
      "id": "7b1d2e90-0d4e-4a0f-b5ad-777777777777",
      "company_id": "0a8f2d51-9f13-4f6c-8e58-222222222222",
      "sold_by": "9c74a1de-31f7-4f55-a5a4-666666666666",
      "status": "in_progress",
      "total_amount": 1000,
      "created_at": "2024-01-09T12:00:00Z"
    }
  ],
  "invoices": [
    {
      "id": "ccf2b7aa-4f43-4a93-86a1-888888888888",
      "company_id": "0a8f2d51-9f13-4f6c-8e58-222222222222",
      "created_by": "9c74a1de-31f7-4f55-a5a4-666666666666",
      "status": "paid",
      "total": 20,
      "created_at": "2024-01-09T09:00:00Z"
    }
  ]
}"#;

#[tokio::test]
async fn fixture_snapshot_summarizes_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, FIXTURE).expect("fixture written");

    let store = MemoryStore::from_fixture_path(&path).expect("fixture loads");
    let service = RevenueService::new(Arc::new(store));
    let summary = service
        .compute_summary(&SummaryFilter::any())
        .await
        .expect("summary succeeds");

    // The malformed third transaction is kept with a zero amount, so income
    // counts four rows: two well-formed transactions' worth of money plus
    // the sold sale and the paid invoice.
    assert_eq!(summary.total_income, Decimal::from(170));
    assert_eq!(summary.total_expenses, Decimal::from(30));
    assert_eq!(summary.net_profit, Decimal::from(140));
    assert_eq!(summary.income_count, 4);
    assert_eq!(summary.expense_count, 1);
}

#[test]
fn fixture_with_unknown_status_fails_to_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("snapshot.json");
    let broken = FIXTURE.replace("\"status\": \"sold\"", "\"status\": \"shipped\"");
    std::fs::write(&path, broken).expect("fixture written");
    assert!(MemoryStore::from_fixture_path(&path).is_err());
}
