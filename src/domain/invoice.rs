use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// Lifecycle of an issued invoice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Approved,
    Sent,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    /// Fixed allow-list of statuses that count as realized revenue.
    pub const REALIZED: &'static [InvoiceStatus] = &[InvoiceStatus::Approved, InvoiceStatus::Paid];

    pub fn is_realized(&self) -> bool {
        Self::REALIZED.contains(self)
    }
}

/// An invoice issued to a client on behalf of a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invoice {
    pub id: Uuid,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub status: InvoiceStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(company_id: Uuid, created_by: Uuid, total: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            created_by,
            status: InvoiceStatus::Draft,
            total,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for Invoice {
    fn id(&self) -> Uuid {
        self.id
    }
}
