//! In-memory dataset behind the mock API
//!
//! Seeded deterministically so integration tests can compute expected
//! aggregates by re-folding the same records. Failure-injection flags let
//! tests force individual endpoints to fail with 503.

use chrono::NaiveDate;
use shared::client::UserInfo;
use shared::models::{
    ClassRef, OtherTransaction, PayMethod, PaymentStatus, StudentPayment, StudentRef,
    TeacherClassLessons, TeacherPayment, TeacherProfile, TeacherRef, TeacherUser,
    TransactionKind,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Per-endpoint failure injection
///
/// A set flag makes the matching endpoint answer 503 until cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureFlags {
    pub payment_totals: bool,
    pub student_list: bool,
    pub teacher_list: bool,
    pub transaction_list: bool,
    pub transaction_summary: bool,
    pub writes: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct MockUser {
    pub password: String,
    pub info: UserInfo,
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub users: HashMap<String, MockUser>,
    /// token -> username
    pub tokens: HashMap<String, String>,
    pub student_payments: Vec<StudentPayment>,
    pub teacher_payments: Vec<TeacherPayment>,
    pub teachers: Vec<TeacherProfile>,
    pub transactions: Vec<OtherTransaction>,
    pub failures: FailureFlags,
    pub next_transaction_id: u32,
}

/// Mock API state
#[derive(Debug)]
pub struct MockState {
    pub(crate) inner: RwLock<Inner>,
}

impl MockState {
    /// State pre-populated with the deterministic dataset and the default
    /// `admin`/`admin123` account
    pub fn seeded() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "admin".to_string(),
            MockUser {
                password: "admin123".to_string(),
                info: UserInfo {
                    id: "user-1".to_string(),
                    username: "admin".to_string(),
                    role: "admin".to_string(),
                },
            },
        );

        Self {
            inner: RwLock::new(Inner {
                users,
                tokens: HashMap::new(),
                student_payments: seed_student_payments(),
                teacher_payments: seed_teacher_payments(),
                teachers: seed_teachers(),
                transactions: seed_transactions(),
                failures: FailureFlags::default(),
                next_transaction_id: 1000,
            }),
        }
    }

    /// Replace the failure-injection flags
    pub async fn set_failures(&self, failures: FailureFlags) {
        self.inner.write().await.failures = failures;
    }

    /// Register a token directly, bypassing the login endpoint
    pub async fn issue_token(&self, username: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.inner
            .write()
            .await
            .tokens
            .insert(token.clone(), username.to_string());
        token
    }

    /// Clone of the seeded student payments, for computing test expectations
    pub async fn student_payments(&self) -> Vec<StudentPayment> {
        self.inner.read().await.student_payments.clone()
    }

    /// Clone of the seeded teacher payments
    pub async fn teacher_payments(&self) -> Vec<TeacherPayment> {
        self.inner.read().await.teacher_payments.clone()
    }

    /// Clone of the current transactions
    pub async fn transactions(&self) -> Vec<OtherTransaction> {
        self.inner.read().await.transactions.clone()
    }
}

fn student(index: u32) -> StudentRef {
    let names = ["Nguyen Van An", "Tran Thi Mai", "Le Hoang Nam"];
    StudentRef {
        id: format!("stu-{index}"),
        name: names[(index as usize - 1) % names.len()].to_string(),
    }
}

fn class(index: u32) -> ClassRef {
    let names = ["Math 8A", "Physics 9B", "English 7C"];
    ClassRef {
        id: format!("cls-{index}"),
        name: names[(index as usize - 1) % names.len()].to_string(),
    }
}

fn seed_student_payments() -> Vec<StudentPayment> {
    let mut payments = Vec::new();
    for month in 1..=6u32 {
        for index in 1..=3u32 {
            let total = 2_000_000 + i64::from(index) * 100_000;
            let discount = if index == 2 { 200_000 } else { 0 };
            let final_amount = total - discount;
            let (status, paid) = match (month + index) % 3 {
                0 => (PaymentStatus::Paid, final_amount),
                1 => (PaymentStatus::Partial, final_amount / 2),
                _ => (PaymentStatus::Pending, 0),
            };
            payments.push(StudentPayment {
                id: format!("pay-{month}-{index}"),
                total_amount: total,
                discount_amount: discount,
                final_amount,
                paid_amount: paid,
                remaining_amount: final_amount - paid,
                status,
                month,
                year: 2025,
                student: Some(student(index)),
                class: Some(class(index)),
            });
        }
    }
    payments
}

fn seed_teacher_payments() -> Vec<TeacherPayment> {
    let mut payments = Vec::new();
    for month in 1..=6u32 {
        for index in 1..=2u32 {
            let rate = 250_000 + i64::from(index) * 50_000;
            let lessons = 14 + month + index;
            let total = rate * i64::from(lessons);
            let (status, paid) = match (month + index) % 3 {
                0 => (PaymentStatus::Paid, total),
                1 => (PaymentStatus::Partial, total / 2),
                _ => (PaymentStatus::Pending, 0),
            };
            payments.push(TeacherPayment {
                id: format!("tp-{month}-{index}"),
                salary_per_lesson: rate,
                total_amount: total,
                paid_amount: paid,
                status,
                month,
                year: 2025,
                teacher: Some(TeacherRef {
                    id: format!("t-{index}"),
                    name: teacher_name(index).to_string(),
                }),
                classes: vec![TeacherClassLessons {
                    class: Some(class(index)),
                    total_lessons: lessons,
                }],
            });
        }
    }
    payments
}

fn teacher_name(index: u32) -> &'static str {
    if index == 1 {
        "Tran Thi Binh"
    } else {
        "Le Van Cuong"
    }
}

fn seed_teachers() -> Vec<TeacherProfile> {
    (1..=2u32)
        .map(|index| TeacherProfile {
            id: format!("t-{index}"),
            user: TeacherUser {
                name: teacher_name(index).to_string(),
                email: Some(format!("teacher{index}@aula.example")),
                phone: Some(format!("09000000{index:02}")),
            },
            specialization: Some(if index == 1 { "Physics" } else { "English" }.to_string()),
            salary_per_lesson: 250_000 + i64::from(index) * 50_000,
        })
        .collect()
}

fn seed_transactions() -> Vec<OtherTransaction> {
    let mut transactions = Vec::new();
    for month in 1..=6u32 {
        transactions.push(OtherTransaction {
            id: format!("txn-{month}-1"),
            title: "Facility rent".to_string(),
            description: Some("Monthly rent for annex building".to_string()),
            amount: 12_000_000,
            kind: TransactionKind::Expense,
            category: Some("facilities".to_string()),
            date: NaiveDate::from_ymd_opt(2025, month, 5).expect("valid seed date"),
            payment_method: Some(PayMethod::Transfer),
        });
        transactions.push(OtherTransaction {
            id: format!("txn-{month}-2"),
            title: "Book sales".to_string(),
            description: None,
            amount: 1_500_000 + i64::from(month) * 50_000,
            kind: TransactionKind::Income,
            category: Some("materials".to_string()),
            date: NaiveDate::from_ymd_opt(2025, month, 12).expect("valid seed date"),
            payment_method: Some(PayMethod::Cash),
        });
    }
    transactions
}
