//! Teacher payment model

use super::payment::{ClassRef, PayMethod, PaymentStatus};
use crate::util::null_as_zero;
use serde::{Deserialize, Serialize};

/// Embedded teacher reference
///
/// Absent when the referenced teacher has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: String,
    pub name: String,
}

/// Lessons taught in one class during the billing month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherClassLessons {
    #[serde(rename = "classRef", default)]
    pub class: Option<ClassRef>,
    #[serde(default)]
    pub total_lessons: u32,
}

/// Salary owed to a teacher for one month
///
/// Amounts are VND in integer units with `null` normalized to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPayment {
    pub id: String,
    /// Contracted rate per lesson
    #[serde(default, deserialize_with = "null_as_zero")]
    pub salary_per_lesson: i64,
    /// Total salary owed for the month
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_amount: i64,
    /// Amount already paid out
    #[serde(default, deserialize_with = "null_as_zero")]
    pub paid_amount: i64,
    pub status: PaymentStatus,
    /// Billing month (1-12)
    pub month: u32,
    /// Billing year
    pub year: i32,
    #[serde(rename = "teacherRef", default)]
    pub teacher: Option<TeacherRef>,
    /// Per-class lesson counts backing the owed total
    #[serde(default)]
    pub classes: Vec<TeacherClassLessons>,
}

impl TeacherPayment {
    /// Salary still owed for the month
    pub fn remaining(&self) -> i64 {
        self.total_amount - self.paid_amount
    }
}

/// Payout request body for `POST /api/teacher-payments/{id}/pay`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayTeacherRequest {
    /// Payout amount, must be positive and at most the remaining balance
    pub amount: i64,
    pub method: PayMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
