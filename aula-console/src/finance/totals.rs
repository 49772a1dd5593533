//! Overview-card aggregates and the pure folds that feed them

use shared::models::{OtherTransaction, StudentPayment, TeacherPayment, TransactionKind};

/// Derived totals shown on the overview cards
///
/// Recomputed on every filter change and after any mutating action; never
/// persisted. All amounts are VND in integer units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalStatistics {
    pub total_student_fees: i64,
    pub total_paid_amount: i64,
    pub total_remaining_amount: i64,
    pub total_teacher_salary: i64,
    pub total_other_income: i64,
    pub total_other_expense: i64,
}

/// Fold raw student payments into `(fees, paid, remaining)`
///
/// The remaining figure sums `remainingAmount` directly rather than
/// deriving `fees - paid`, tolerating backend inconsistency between the
/// per-record fields.
pub fn fold_student_payments(records: &[StudentPayment]) -> (i64, i64, i64) {
    records.iter().fold((0, 0, 0), |(fees, paid, remaining), p| {
        (
            fees + p.final_amount,
            paid + p.paid_amount,
            remaining + p.remaining_amount,
        )
    })
}

/// Sum of salary owed across teacher payments
pub fn fold_teacher_salary(records: &[TeacherPayment]) -> i64 {
    records.iter().map(|p| p.total_amount).sum()
}

/// Split transactions into `(income, expense)` sums
pub fn fold_transactions(records: &[OtherTransaction]) -> (i64, i64) {
    records.iter().fold((0, 0), |(income, expense), t| {
        match t.kind {
            TransactionKind::Income => (income + t.amount, expense),
            TransactionKind::Expense => (income, expense + t.amount),
        }
    })
}
