//! Domain models consumed by the revenue aggregation services.

pub mod common;
pub mod filters;
pub mod invoice;
pub mod period;
pub mod sale;
pub mod transaction;

pub use common::Identifiable;
pub use filters::SummaryFilter;
pub use invoice::{Invoice, InvoiceStatus};
pub use period::Granularity;
pub use sale::{ProductSale, SaleStatus};
pub use transaction::{EntryKind, Transaction};
