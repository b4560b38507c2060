//! Wire-row shapes and the single mapping boundary into domain types.
//!
//! The external store serves loosely typed snake_case rows. All coercion
//! policy lives here: non-numeric amounts become zero (the row keeps
//! existing, so counts never silently drop), undecodable transaction dates
//! become `None` (the row is counted but never charted), and anything that
//! feeds the realized-revenue allow-lists fails the read loudly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{EntryKind, Invoice, InvoiceStatus, ProductSale, SaleStatus, Transaction};

use super::{Result, StoreError};

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRow {
    pub id: Uuid,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl TransactionRow {
    pub fn into_domain(self) -> Result<Transaction> {
        let kind = match self.kind.as_str() {
            "income" => EntryKind::Income,
            "expense" => EntryKind::Expense,
            other => {
                return Err(StoreError::Decode(format!(
                    "transaction {}: unknown type {other:?}",
                    self.id
                )))
            }
        };
        let amount = decimal_or_zero(&self.amount, "transaction", self.id);
        let date = self.date.as_deref().and_then(|raw| {
            let parsed = parse_wire_date(raw);
            if parsed.is_none() {
                tracing::warn!(row = %self.id, raw, "skipping undecodable transaction date");
            }
            parsed
        });
        Ok(Transaction {
            id: self.id,
            company_id: self.company_id,
            user_id: self.user_id,
            kind,
            amount,
            description: self.description,
            category: self.category,
            date,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaleRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub sold_by: Uuid,
    pub status: String,
    #[serde(default)]
    pub total_amount: Value,
    pub created_at: String,
    #[serde(default)]
    pub sold_at: Option<String>,
}

impl SaleRow {
    pub fn into_domain(self) -> Result<ProductSale> {
        let status = parse_sale_status(&self.status)
            .ok_or_else(|| StoreError::Decode(format!("sale {}: unknown status {:?}", self.id, self.status)))?;
        let total_amount = decimal_or_zero(&self.total_amount, "sale", self.id);
        let created_at = parse_wire_timestamp(&self.created_at)
            .ok_or_else(|| StoreError::Decode(format!("sale {}: bad created_at {:?}", self.id, self.created_at)))?;
        let sold_at = match self.sold_at.as_deref() {
            Some(raw) => Some(parse_wire_timestamp(raw).ok_or_else(|| {
                StoreError::Decode(format!("sale {}: bad sold_at {raw:?}", self.id))
            })?),
            None => None,
        };
        Ok(ProductSale {
            id: self.id,
            company_id: self.company_id,
            sold_by: self.sold_by,
            status,
            total_amount,
            created_at,
            sold_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub status: String,
    #[serde(default)]
    pub total: Value,
    pub created_at: String,
}

impl InvoiceRow {
    pub fn into_domain(self) -> Result<Invoice> {
        let status = parse_invoice_status(&self.status).ok_or_else(|| {
            StoreError::Decode(format!("invoice {}: unknown status {:?}", self.id, self.status))
        })?;
        let total = decimal_or_zero(&self.total, "invoice", self.id);
        let created_at = parse_wire_timestamp(&self.created_at).ok_or_else(|| {
            StoreError::Decode(format!("invoice {}: bad created_at {:?}", self.id, self.created_at))
        })?;
        Ok(Invoice {
            id: self.id,
            company_id: self.company_id,
            created_by: self.created_by,
            status,
            total,
            created_at,
        })
    }
}

/// Snapshot of the three remote tables, as persisted by fixture files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub transactions: Vec<TransactionRow>,
    #[serde(default)]
    pub product_sales: Vec<SaleRow>,
    #[serde(default)]
    pub invoices: Vec<InvoiceRow>,
}

/// Coercion-to-zero fallback for amounts: totals never crash on bad data,
/// and the row's existence still shows up in the counts.
fn decimal_or_zero(value: &Value, table: &str, id: Uuid) -> Decimal {
    let parsed = match value {
        Value::Number(number) => number.to_string().parse::<Decimal>().ok(),
        Value::String(raw) => raw.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!(%table, row = %id, raw = %value, "coercing non-numeric amount to zero");
        Decimal::ZERO
    })
}

fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // Some rows carry a full timestamp in the date column.
    parse_wire_timestamp(raw).map(|ts| ts.date_naive())
}

fn parse_wire_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Timestamps written without an offset are taken as UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .ok()
}

fn parse_sale_status(raw: &str) -> Option<SaleStatus> {
    match normalize_status(raw).as_str() {
        "pending" => Some(SaleStatus::Pending),
        "in-progress" => Some(SaleStatus::InProgress),
        "sold" => Some(SaleStatus::Sold),
        "cancelled" | "canceled" => Some(SaleStatus::Cancelled),
        _ => None,
    }
}

fn parse_invoice_status(raw: &str) -> Option<InvoiceStatus> {
    match normalize_status(raw).as_str() {
        "draft" => Some(InvoiceStatus::Draft),
        "pending" => Some(InvoiceStatus::Pending),
        "approved" => Some(InvoiceStatus::Approved),
        "sent" => Some(InvoiceStatus::Sent),
        "paid" => Some(InvoiceStatus::Paid),
        "cancelled" | "canceled" => Some(InvoiceStatus::Cancelled),
        _ => None,
    }
}

fn normalize_status(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace([' ', '_'], "-")
}

/// Wire spelling of a sale status, as the store's status column holds it.
pub fn sale_status_literal(status: SaleStatus) -> &'static str {
    match status {
        SaleStatus::Pending => "pending",
        SaleStatus::InProgress => "in-progress",
        SaleStatus::Sold => "sold",
        SaleStatus::Cancelled => "cancelled",
    }
}

/// Wire spelling of an invoice status.
pub fn invoice_status_literal(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => "draft",
        InvoiceStatus::Pending => "pending",
        InvoiceStatus::Approved => "approved",
        InvoiceStatus::Sent => "sent",
        InvoiceStatus::Paid => "paid",
        InvoiceStatus::Cancelled => "cancelled",
    }
}
