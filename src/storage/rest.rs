//! PostgREST-style HTTP backend.
//!
//! The external store exposes each table at `{base_url}/{table}` and accepts
//! `col=eq.v`, `col=gte.v` / `col=lt.v`, and `col=in.(a,b)` predicates.
//! Reads page with `limit`/`offset` under a deterministic ordering and go
//! through the bounded retry policy.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::StoreConfig;
use crate::domain::{Invoice, InvoiceStatus, ProductSale, SaleStatus, SummaryFilter, Transaction};

use super::rows::{invoice_status_literal, sale_status_literal, InvoiceRow, SaleRow, TransactionRow};
use super::{Result, RetryPolicy, RevenueStore, StoreError};

const TRANSACTIONS_TABLE: &str = "transactions";
const PRODUCT_SALES_TABLE: &str = "product_sales";
const INVOICES_TABLE: &str = "invoices";

pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    page_size: usize,
    request_timeout: Duration,
    retry: RetryPolicy,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size.max(1),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            retry: config.retry.to_policy(),
        })
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
    ) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        let mut offset = 0usize;
        loop {
            let page: Vec<T> = self
                .retry
                .run(|| self.request_page(table, query, offset))
                .await?;
            let fetched = page.len();
            tracing::debug!(table, offset, fetched, "fetched store page");
            rows.extend(page);
            if fetched < self.page_size {
                return Ok(rows);
            }
            offset += fetched;
        }
    }

    async fn request_page<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
        offset: usize,
    ) -> Result<Vec<T>> {
        let mut request = self
            .http
            .get(format!("{}/{}", self.base_url, table))
            .query(query)
            .query(&[
                ("limit", self.page_size.to_string()),
                ("offset", offset.to_string()),
            ]);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }
        let response = tokio::time::timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| StoreError::Timeout(self.request_timeout))??;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(StoreError::from)
    }
}

#[async_trait::async_trait]
impl RevenueStore for RestStore {
    async fn transactions(&self, filter: &SummaryFilter) -> Result<Vec<Transaction>> {
        let query = transaction_query(filter);
        let rows: Vec<TransactionRow> = self.fetch_rows(TRANSACTIONS_TABLE, &query).await?;
        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    async fn product_sales(
        &self,
        filter: &SummaryFilter,
        statuses: &[SaleStatus],
    ) -> Result<Vec<ProductSale>> {
        let literals: Vec<&str> = statuses.iter().copied().map(sale_status_literal).collect();
        let query = event_query(filter, "sold_by", &literals);
        let rows: Vec<SaleRow> = self.fetch_rows(PRODUCT_SALES_TABLE, &query).await?;
        rows.into_iter().map(SaleRow::into_domain).collect()
    }

    async fn invoices(
        &self,
        filter: &SummaryFilter,
        statuses: &[InvoiceStatus],
    ) -> Result<Vec<Invoice>> {
        let literals: Vec<&str> = statuses.iter().copied().map(invoice_status_literal).collect();
        let query = event_query(filter, "created_by", &literals);
        let rows: Vec<InvoiceRow> = self.fetch_rows(INVOICES_TABLE, &query).await?;
        rows.into_iter().map(InvoiceRow::into_domain).collect()
    }
}

/// Predicates for the transactions table, which carries a plain calendar
/// date column.
fn transaction_query(filter: &SummaryFilter) -> Vec<(String, String)> {
    let mut query = base_query();
    if let Some(company_id) = filter.company_id {
        query.push(("company_id".into(), format!("eq.{company_id}")));
    }
    if let Some(user_id) = filter.user_id {
        query.push(("user_id".into(), format!("eq.{user_id}")));
    }
    if let Some(start) = filter.start_date {
        query.push(("date".into(), format!("gte.{start}")));
    }
    if let Some(end) = filter.end_date {
        query.push(("date".into(), format!("lte.{end}")));
    }
    query
}

/// Predicates for sales and invoices, which filter on a creation timestamp
/// and a status allow-list. The inclusive end bound becomes a strict bound
/// on the following midnight.
fn event_query(filter: &SummaryFilter, actor_column: &str, statuses: &[&str]) -> Vec<(String, String)> {
    let mut query = base_query();
    if let Some(company_id) = filter.company_id {
        query.push(("company_id".into(), format!("eq.{company_id}")));
    }
    if let Some(user_id) = filter.user_id {
        query.push((actor_column.into(), format!("eq.{user_id}")));
    }
    if let Some(start) = filter.start_date {
        query.push(("created_at".into(), format!("gte.{start}")));
    }
    if let Some(end) = filter.end_date {
        match end.succ_opt() {
            Some(next_day) => query.push(("created_at".into(), format!("lt.{next_day}"))),
            None => query.push(("created_at".into(), format!("lte.{end}"))),
        }
    }
    match statuses {
        [single] => query.push(("status".into(), format!("eq.{single}"))),
        many => query.push(("status".into(), format!("in.({})", many.join(",")))),
    }
    query
}

fn base_query() -> Vec<(String, String)> {
    vec![
        ("select".into(), "*".into()),
        ("order".into(), "id.asc".into()),
    ]
}
