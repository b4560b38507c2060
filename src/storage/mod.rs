//! Read-only boundary against the external relational store.
//!
//! The aggregation services never touch wire rows or HTTP directly; they go
//! through [`RevenueStore`], and every backend funnels raw rows through the
//! typed mapping layer in [`rows`].

pub mod memory;
pub mod rest;
pub mod retry;
pub mod rows;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Invoice, InvoiceStatus, ProductSale, SaleStatus, SummaryFilter, Transaction};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure taxonomy for reads against the external store. Any variant aborts
/// the whole summary computation; partial results are never surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("undecodable row: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

impl StoreError {
    /// Transport hiccups, timeouts, and server-side failures are worth
    /// another attempt; everything else fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Transport(_) | StoreError::Timeout(_) => true,
            StoreError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Abstraction over backends capable of serving the three revenue reads.
///
/// Implementations apply the filter's equality and inclusive date-range
/// predicates plus the given status allow-lists, and page internally until
/// the full row set is collected.
#[async_trait]
pub trait RevenueStore: Send + Sync {
    async fn transactions(&self, filter: &SummaryFilter) -> Result<Vec<Transaction>>;

    async fn product_sales(
        &self,
        filter: &SummaryFilter,
        statuses: &[SaleStatus],
    ) -> Result<Vec<ProductSale>>;

    async fn invoices(
        &self,
        filter: &SummaryFilter,
        statuses: &[InvoiceStatus],
    ) -> Result<Vec<Invoice>>;
}

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use retry::RetryPolicy;
