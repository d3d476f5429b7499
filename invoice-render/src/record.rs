//! Typed invoice input.
//!
//! Records arrive already validated. Deserialization is the only
//! mapping from stored data: unknown shapes fail here instead of being
//! copied field by field.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RenderError;
use crate::format::parse_date_like;

/// One invoice as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_number: String,
    #[serde(deserialize_with = "date_like")]
    pub invoice_date: NaiveDate,
    #[serde(deserialize_with = "date_like")]
    pub due_date: NaiveDate,
    pub company: Company,
    pub client: Client,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
}

/// The issuing company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Free text; line breaks are kept when rendered.
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// The billed party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    /// Free text; line breaks are kept when rendered.
    pub address: String,
    pub email: String,
}

/// One billable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// Amount persisted alongside the record, if any. Never rendered:
    /// the amount is always recomputed from quantity and unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            amount: None,
        }
    }
}

/// Invoice lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    /// Uppercase text shown on the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Overdue => "OVERDUE",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_ascii_lowercase())
    }
}

impl FromStr for InvoiceStatus {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RenderError::UnknownStatus(s.to_string()))
    }
}

fn date_like<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date_like(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert_eq!("OVERDUE".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Overdue);
        assert!(matches!(
            "void".parse::<InvoiceStatus>(),
            Err(RenderError::UnknownStatus(s)) if s == "void"
        ));
    }

    #[test]
    fn only_paid_is_paid() {
        let paid: Vec<_> = InvoiceStatus::ALL.iter().filter(|s| s.is_paid()).collect();
        assert_eq!(paid, [&InvoiceStatus::Paid]);
    }

    #[test]
    fn display_is_lowercase_label() {
        assert_eq!(InvoiceStatus::Cancelled.to_string(), "cancelled");
    }
}
