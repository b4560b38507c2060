use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// Lifecycle of a product sale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SaleStatus {
    Pending,
    InProgress,
    Sold,
    Cancelled,
}

impl SaleStatus {
    /// Fixed allow-list of statuses that count as realized revenue.
    /// A sale is counted exactly once, at the moment it becomes `Sold`;
    /// pending, in-progress, and cancelled sales must never be summed.
    pub const REVENUE: &'static [SaleStatus] = &[SaleStatus::Sold];

    pub fn counts_as_revenue(&self) -> bool {
        Self::REVENUE.contains(self)
    }
}

/// A product sale tracked from first contact through hand-over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSale {
    pub id: Uuid,
    pub company_id: Uuid,
    pub sold_by: Uuid,
    pub status: SaleStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_at: Option<DateTime<Utc>>,
}

impl ProductSale {
    pub fn new(company_id: Uuid, sold_by: Uuid, total_amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            sold_by,
            status: SaleStatus::Pending,
            total_amount,
            created_at: Utc::now(),
            sold_at: None,
        }
    }

    /// Marks the sale as sold at the given moment.
    pub fn mark_sold(&mut self, at: DateTime<Utc>) {
        self.status = SaleStatus::Sold;
        self.sold_at = Some(at);
    }
}

impl Identifiable for ProductSale {
    fn id(&self) -> Uuid {
        self.id
    }
}
