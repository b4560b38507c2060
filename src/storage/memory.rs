//! In-memory backend used by tests and JSON-fixture snapshots.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Invoice, InvoiceStatus, ProductSale, SaleStatus, SummaryFilter, Transaction};

use super::rows::StoreSnapshot;
use super::{Result, RevenueStore, StoreError};

/// Holds the three tables in memory and applies the same filter semantics a
/// remote backend would. Reads can be poisoned to exercise the
/// all-or-nothing failure contract of the aggregation services.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    sales: Vec<ProductSale>,
    invoices: Vec<Invoice>,
    fail_transactions: Mutex<Option<String>>,
    fail_sales: Mutex<Option<String>>,
    fail_invoices: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot of the remote tables from a JSON fixture file.
    pub fn from_fixture_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&data)?;
        Self::from_snapshot(snapshot)
    }

    /// Maps every wire row through the typed boundary; one bad row fails the
    /// whole load.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut store = Self::new();
        for row in snapshot.transactions {
            store.transactions.push(row.into_domain()?);
        }
        for row in snapshot.product_sales {
            store.sales.push(row.into_domain()?);
        }
        for row in snapshot.invoices {
            store.invoices.push(row.into_domain()?);
        }
        Ok(store)
    }

    pub fn push_transaction(&mut self, transaction: Transaction) -> &mut Self {
        self.transactions.push(transaction);
        self
    }

    pub fn push_sale(&mut self, sale: ProductSale) -> &mut Self {
        self.sales.push(sale);
        self
    }

    pub fn push_invoice(&mut self, invoice: Invoice) -> &mut Self {
        self.invoices.push(invoice);
        self
    }

    /// Makes the next transaction read fail with the given message.
    pub fn poison_transactions(&self, message: impl Into<String>) {
        *self.fail_transactions.lock().unwrap() = Some(message.into());
    }

    /// Makes the next product-sale read fail with the given message.
    pub fn poison_sales(&self, message: impl Into<String>) {
        *self.fail_sales.lock().unwrap() = Some(message.into());
    }

    /// Makes the next invoice read fail with the given message.
    pub fn poison_invoices(&self, message: impl Into<String>) {
        *self.fail_invoices.lock().unwrap() = Some(message.into());
    }

    fn take_poison(slot: &Mutex<Option<String>>) -> Result<()> {
        match slot.lock().unwrap().take() {
            Some(message) => Err(StoreError::Backend(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RevenueStore for MemoryStore {
    async fn transactions(&self, filter: &SummaryFilter) -> Result<Vec<Transaction>> {
        Self::take_poison(&self.fail_transactions)?;
        Ok(self
            .transactions
            .iter()
            .filter(|txn| filter.matches_transaction(txn))
            .cloned()
            .collect())
    }

    async fn product_sales(
        &self,
        filter: &SummaryFilter,
        statuses: &[SaleStatus],
    ) -> Result<Vec<ProductSale>> {
        Self::take_poison(&self.fail_sales)?;
        Ok(self
            .sales
            .iter()
            .filter(|sale| statuses.contains(&sale.status) && filter.matches_sale(sale))
            .cloned()
            .collect())
    }

    async fn invoices(
        &self,
        filter: &SummaryFilter,
        statuses: &[InvoiceStatus],
    ) -> Result<Vec<Invoice>> {
        Self::take_poison(&self.fail_invoices)?;
        Ok(self
            .invoices
            .iter()
            .filter(|invoice| statuses.contains(&invoice.status) && filter.matches_invoice(invoice))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryKind;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[tokio::test]
    async fn status_allow_list_is_applied() {
        let company = Uuid::new_v4();
        let seller = Uuid::new_v4();
        let mut store = MemoryStore::new();
        let mut sold = ProductSale::new(company, seller, Decimal::from(50));
        sold.mark_sold(sold.created_at);
        store.push_sale(sold);
        store.push_sale(ProductSale::new(company, seller, Decimal::from(1000)));

        let sales = store
            .product_sales(&SummaryFilter::any(), SaleStatus::REVENUE)
            .await
            .expect("read succeeds");
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].total_amount, Decimal::from(50));
    }

    #[tokio::test]
    async fn filters_apply_to_each_table() {
        let company = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut store = MemoryStore::new();
        let mut txn = Transaction::new(EntryKind::Income, Decimal::from(10), date(2024, 1, 5));
        txn.company_id = Some(company);
        store.push_transaction(txn);
        let mut stray = Transaction::new(EntryKind::Income, Decimal::from(99), date(2024, 1, 5));
        stray.company_id = Some(other);
        store.push_transaction(stray);

        let filter = SummaryFilter::any().with_company(company);
        let rows = store.transactions(&filter).await.expect("read succeeds");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, Decimal::from(10));
    }

    #[tokio::test]
    async fn poisoned_read_fails_once() {
        let store = MemoryStore::new();
        store.poison_transactions("connection reset");
        let err = store
            .transactions(&SummaryFilter::any())
            .await
            .expect_err("poisoned read fails");
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(store.transactions(&SummaryFilter::any()).await.is_ok());
    }
}
