//! Passive state container behind the finance panel
//!
//! All mutation happens under the panel's write lock; each fetch writes
//! only its own slice. The generation counter and per-collection issue
//! sequences let completions detect that they have been superseded.

use crate::finance::pay_teacher::PayTeacherFlow;
use crate::finance::totals::{fold_teacher_salary, fold_transactions, TotalStatistics};
use crate::finance::transactions::TransactionForm;
use crate::notify::NotificationQueue;
use shared::models::{OtherTransaction, StudentPayment, TeacherPayment};
use shared::query::{PeriodFilter, StatusFilter};
use shared::response::Paginated;

/// Default page size for the three paginated collections
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page/limit/totals tuple governing one paginated collection view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total_pages: 1,
            total_results: 0,
        }
    }
}

impl PaginationState {
    /// Record a landed page
    pub fn apply<T>(&mut self, page: u32, payload: &Paginated<T>) {
        self.page = page;
        self.total_pages = payload.total_pages;
        self.total_results = payload.total_results;
    }
}

/// View state of the finance statistics panel
#[derive(Debug, Default)]
pub struct FinanceState {
    // ---- filters ----
    pub period: PeriodFilter,
    pub status: StatusFilter,

    // ---- coordination guards ----
    /// Bumped on every filter change; stale completions compare against it
    pub(crate) generation: u64,
    pub(crate) student_seq: u64,
    pub(crate) teacher_seq: u64,
    pub(crate) transaction_seq: u64,

    // ---- student payments (lazy tab) ----
    pub student_payments: Vec<StudentPayment>,
    pub student_pagination: PaginationState,
    pub student_loading: bool,
    /// Set once the first student fetch for the current filter has landed
    pub student_loaded: bool,
    /// Whether the student detail view is currently shown
    pub student_view_active: bool,

    // ---- teacher payments ----
    pub teacher_payments: Vec<TeacherPayment>,
    pub teacher_pagination: PaginationState,
    pub teacher_loading: bool,

    // ---- other transactions ----
    pub transactions: Vec<OtherTransaction>,
    pub transaction_pagination: PaginationState,
    pub transaction_loading: bool,

    // ---- derived + dialogs ----
    pub totals: TotalStatistics,
    pub notifications: NotificationQueue,
    pub pay_flow: PayTeacherFlow,
    pub transaction_form: Option<TransactionForm>,
    /// Transaction id awaiting delete confirmation
    pub pending_delete: Option<String>,
}

impl FinanceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset pagination and lazy-tab bookkeeping for a filter change
    ///
    /// The student tab only drops its rows when inactive; an active tab is
    /// refetched immediately by the coordinator instead.
    pub(crate) fn reset_for_filter_change(&mut self) {
        self.generation += 1;
        self.student_pagination = PaginationState::default();
        self.teacher_pagination = PaginationState::default();
        self.transaction_pagination = PaginationState::default();
        if !self.student_view_active {
            self.student_loaded = false;
            self.student_loading = false;
            self.student_payments.clear();
        }
    }

    /// Salary sum over the currently loaded teacher page (table footer)
    pub fn page_salary_total(&self) -> i64 {
        fold_teacher_salary(&self.teacher_payments)
    }

    /// Income/expense sums over the currently loaded transaction page
    pub fn page_income_expense(&self) -> (i64, i64) {
        fold_transactions(&self.transactions)
    }
}
