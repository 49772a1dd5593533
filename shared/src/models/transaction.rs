//! Other-transaction model
//!
//! Covers center income and expenses that are neither student fees nor
//! teacher salaries (facility rent, supplies, event income, ...).

use super::payment::PayMethod;
use crate::util::null_as_zero;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

/// A miscellaneous income or expense entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherTransaction {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Amount in VND, always positive; direction comes from `kind`
    #[serde(default, deserialize_with = "null_as_zero")]
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<String>,
    /// Date the transaction occurred
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: Option<PayMethod>,
}

/// Create/update body for the transaction endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PayMethod>,
}
