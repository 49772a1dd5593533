//! Student payment model

use crate::util::null_as_zero;
use serde::{Deserialize, Serialize};

/// Settlement status of a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fully settled
    Paid,
    /// Partially settled
    Partial,
    /// Nothing collected yet
    Pending,
}

/// Method used to settle a payment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMethod {
    #[default]
    Cash,
    Transfer,
    Card,
    Other,
}

/// Embedded student reference
///
/// Absent when the referenced student has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: String,
    pub name: String,
}

/// Embedded class reference
///
/// Absent when the referenced class has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRef {
    pub id: String,
    pub name: String,
}

/// A student's billed fees for one month
///
/// All amounts are VND in integer units. The backend emits `null` for unset
/// amounts; they normalize to zero at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayment {
    pub id: String,
    /// Gross fees before discount
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_amount: i64,
    /// Discount applied
    #[serde(default, deserialize_with = "null_as_zero")]
    pub discount_amount: i64,
    /// Net amount billed after discount
    #[serde(default, deserialize_with = "null_as_zero")]
    pub final_amount: i64,
    /// Amount collected so far
    #[serde(default, deserialize_with = "null_as_zero")]
    pub paid_amount: i64,
    /// Amount still owed
    #[serde(default, deserialize_with = "null_as_zero")]
    pub remaining_amount: i64,
    pub status: PaymentStatus,
    /// Billing month (1-12)
    pub month: u32,
    /// Billing year
    pub year: i32,
    #[serde(rename = "studentRef", default)]
    pub student: Option<StudentRef>,
    #[serde(rename = "classRef", default)]
    pub class: Option<ClassRef>,
}
