//! Filter-driven fetch coordinator for the finance panel
//!
//! A filter change bumps the fetch generation, resets pagination, and
//! issues the collection and aggregate fetches concurrently; completions
//! are unordered and each writes only its own state slice. Every
//! completion re-checks its generation snapshot (and the per-collection
//! issue sequence for page turns) under the write lock, so a superseded
//! response is dropped instead of overwriting fresher state.
//!
//! Read-path failures degrade silently: the affected collection shows an
//! empty list with default pagination and only a warn trace records the
//! error. Write-path failures surface notifications carrying the server
//! message.

use crate::finance::pay_teacher::PayTeacherFlow;
use crate::finance::state::{FinanceState, PaginationState};
use crate::finance::totals::{fold_student_payments, fold_teacher_salary};
use crate::finance::transactions::TransactionForm;
use crate::notify::Notification;
use aula_client::{CenterApi, ClientResult};
use shared::models::{PayMethod, PayTeacherRequest, TeacherProfile};
use shared::query::{
    PaymentListQuery, PeriodFilter, PeriodQuery, StatusFilter, TransactionListQuery,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Page size for the one-shot full-set fetches (raw-record totals fallback
/// and the teacher-salary card)
const UNPAGINATED_LIMIT: u32 = 1000;

/// The finance statistics panel
///
/// Cheap to clone; clones share the same state and API client.
#[derive(Clone)]
pub struct FinancePanel {
    api: Arc<dyn CenterApi>,
    state: Arc<RwLock<FinanceState>>,
}

impl FinancePanel {
    /// Create a panel over an injected API client
    ///
    /// No fetch is issued here; the embedding shell calls [`refresh`]
    /// (or a filter setter) once the panel is mounted.
    ///
    /// [`refresh`]: FinancePanel::refresh
    pub fn new(api: Arc<dyn CenterApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FinanceState::new())),
        }
    }

    /// Shared handle to the panel state
    pub fn state(&self) -> Arc<RwLock<FinanceState>> {
        Arc::clone(&self.state)
    }

    /// Take all queued user-facing notifications
    pub async fn drain_notifications(&self) -> Vec<Notification> {
        self.state.write().await.notifications.drain()
    }

    // ========== Filters ==========

    /// Change the reporting period and refresh everything
    pub async fn set_period(&self, period: PeriodFilter) {
        self.state.write().await.period = period;
        self.refresh().await;
    }

    /// Change the payment-status filter and refresh everything
    ///
    /// The status applies to student and teacher payments only; the
    /// transaction queries never carry it.
    pub async fn set_status(&self, status: StatusFilter) {
        self.state.write().await.status = status;
        self.refresh().await;
    }

    /// Re-run all fetches for the current filter
    ///
    /// Resets the three paginations to page 1. Student payments are only
    /// fetched when the student view is active; an inactive tab just drops
    /// its stale rows and loads on next activation.
    pub async fn refresh(&self) {
        let (generation, period, status, student_active) = {
            let mut st = self.state.write().await;
            st.reset_for_filter_change();
            (
                st.generation,
                st.period.resolve(),
                st.status,
                st.student_view_active,
            )
        };
        tracing::debug!(generation, ?period, "refreshing finance panel");

        tokio::join!(
            self.fetch_teacher_page(generation, period, status, 1),
            self.fetch_transaction_page(generation, period, 1),
            self.refresh_payment_totals(generation, period),
            self.refresh_salary_total(generation, period, status),
            self.refresh_transaction_summary(generation, period),
            self.fetch_student_page_if(student_active, generation, period, status, 1),
        );
    }

    async fn filter_snapshot(&self) -> (u64, PeriodQuery, StatusFilter) {
        let st = self.state.read().await;
        (st.generation, st.period.resolve(), st.status)
    }

    // ========== Student tab ==========

    /// Show the student detail view, fetching its first page on first visit
    pub async fn activate_student_view(&self) {
        let pending = {
            let mut st = self.state.write().await;
            st.student_view_active = true;
            if st.student_loaded {
                None
            } else {
                Some((st.generation, st.period.resolve(), st.status))
            }
        };
        if let Some((generation, period, status)) = pending {
            self.fetch_student_page(generation, period, status, 1).await;
        }
    }

    /// Leave the student detail view
    pub async fn deactivate_student_view(&self) {
        self.state.write().await.student_view_active = false;
    }

    // ========== Page turns ==========

    /// Turn the student-payment page; siblings are untouched
    pub async fn set_student_page(&self, page: u32) {
        let (generation, period, status) = self.filter_snapshot().await;
        self.fetch_student_page(generation, period, status, page)
            .await;
    }

    /// Turn the teacher-payment page; siblings are untouched
    pub async fn set_teacher_page(&self, page: u32) {
        let (generation, period, status) = self.filter_snapshot().await;
        self.fetch_teacher_page(generation, period, status, page)
            .await;
    }

    /// Turn the transaction page; siblings are untouched
    pub async fn set_transaction_page(&self, page: u32) {
        let (generation, period, _) = self.filter_snapshot().await;
        self.fetch_transaction_page(generation, period, page).await;
    }

    // ========== Collection fetches ==========

    async fn fetch_student_page_if(
        &self,
        active: bool,
        generation: u64,
        period: PeriodQuery,
        status: StatusFilter,
        page: u32,
    ) {
        if active {
            self.fetch_student_page(generation, period, status, page)
                .await;
        }
    }

    async fn fetch_student_page(
        &self,
        generation: u64,
        period: PeriodQuery,
        status: StatusFilter,
        page: u32,
    ) {
        let Some((seq, limit)) = ({
            let mut st = self.state.write().await;
            if st.generation != generation {
                None
            } else {
                st.student_seq += 1;
                st.student_loading = true;
                Some((st.student_seq, st.student_pagination.limit))
            }
        }) else {
            return;
        };

        let query = PaymentListQuery::new(period, status.as_status(), page, limit);
        let result = self.api.list_student_payments(&query).await;

        let mut st = self.state.write().await;
        if st.generation != generation || st.student_seq != seq {
            tracing::debug!(generation, "discarding stale student-payment response");
            return;
        }
        st.student_loading = false;
        // A failed attempt still counts as loaded so activation does not loop
        st.student_loaded = true;
        match result {
            Ok(payload) => {
                st.student_pagination.apply(query.page, &payload);
                st.student_payments = payload.data;
            }
            Err(err) => {
                tracing::warn!(error = %err, "student-payment fetch failed, showing empty list");
                st.student_payments.clear();
                st.student_pagination = PaginationState::default();
            }
        }
    }

    async fn fetch_teacher_page(
        &self,
        generation: u64,
        period: PeriodQuery,
        status: StatusFilter,
        page: u32,
    ) {
        let Some((seq, limit)) = ({
            let mut st = self.state.write().await;
            if st.generation != generation {
                None
            } else {
                st.teacher_seq += 1;
                st.teacher_loading = true;
                Some((st.teacher_seq, st.teacher_pagination.limit))
            }
        }) else {
            return;
        };

        let query = PaymentListQuery::new(period, status.as_status(), page, limit);
        let result = self.api.list_teacher_payments(&query).await;

        let mut st = self.state.write().await;
        if st.generation != generation || st.teacher_seq != seq {
            tracing::debug!(generation, "discarding stale teacher-payment response");
            return;
        }
        st.teacher_loading = false;
        match result {
            Ok(payload) => {
                st.teacher_pagination.apply(query.page, &payload);
                st.teacher_payments = payload.data;
            }
            Err(err) => {
                tracing::warn!(error = %err, "teacher-payment fetch failed, showing empty list");
                st.teacher_payments.clear();
                st.teacher_pagination = PaginationState::default();
            }
        }
    }

    async fn fetch_transaction_page(&self, generation: u64, period: PeriodQuery, page: u32) {
        let Some((seq, limit)) = ({
            let mut st = self.state.write().await;
            if st.generation != generation {
                None
            } else {
                st.transaction_seq += 1;
                st.transaction_loading = true;
                Some((st.transaction_seq, st.transaction_pagination.limit))
            }
        }) else {
            return;
        };

        let query = TransactionListQuery::new(period, page, limit);
        let result = self.api.list_transactions(&query).await;

        let mut st = self.state.write().await;
        if st.generation != generation || st.transaction_seq != seq {
            tracing::debug!(generation, "discarding stale transaction response");
            return;
        }
        st.transaction_loading = false;
        match result {
            Ok(payload) => {
                st.transaction_pagination.apply(query.page, &payload);
                st.transactions = payload.data;
            }
            Err(err) => {
                tracing::warn!(error = %err, "transaction fetch failed, showing empty list");
                st.transactions.clear();
                st.transaction_pagination = PaginationState::default();
            }
        }
    }

    // ========== Aggregates ==========

    /// Student-fee totals: aggregate endpoint first, raw-record fold when
    /// it fails, zeros when both fail
    async fn refresh_payment_totals(&self, generation: u64, period: PeriodQuery) {
        match self.api.payment_totals(&period).await {
            Ok(totals) => {
                let mut st = self.state.write().await;
                if st.generation != generation {
                    return;
                }
                st.totals.total_student_fees = totals.total;
                st.totals.total_paid_amount = totals.paid;
                st.totals.total_remaining_amount = totals.total - totals.paid;
            }
            Err(err) => {
                tracing::warn!(error = %err, "aggregate totals failed, folding raw records");
                let query = PaymentListQuery::new(period, None, 1, UNPAGINATED_LIMIT);
                let folded = self
                    .api
                    .list_student_payments(&query)
                    .await
                    .map(|payload| fold_student_payments(&payload.data));

                let mut st = self.state.write().await;
                if st.generation != generation {
                    return;
                }
                match folded {
                    Ok((fees, paid, remaining)) => {
                        st.totals.total_student_fees = fees;
                        st.totals.total_paid_amount = paid;
                        st.totals.total_remaining_amount = remaining;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "raw-record fallback failed, zeroing student totals");
                        st.totals.total_student_fees = 0;
                        st.totals.total_paid_amount = 0;
                        st.totals.total_remaining_amount = 0;
                    }
                }
            }
        }
    }

    /// Teacher-salary card over the full filtered set; falls back to the
    /// loaded page when the unpaginated fetch fails
    async fn refresh_salary_total(
        &self,
        generation: u64,
        period: PeriodQuery,
        status: StatusFilter,
    ) {
        let query = PaymentListQuery::new(period, status.as_status(), 1, UNPAGINATED_LIMIT);
        let result = self.api.list_teacher_payments(&query).await;

        let mut st = self.state.write().await;
        if st.generation != generation {
            return;
        }
        match result {
            Ok(payload) => {
                st.totals.total_teacher_salary = fold_teacher_salary(&payload.data);
            }
            Err(err) => {
                tracing::warn!(error = %err, "salary fetch failed, folding loaded page");
                st.totals.total_teacher_salary = st.page_salary_total();
            }
        }
    }

    /// Other income/expense cards over the full filtered set; falls back
    /// to the loaded page when the summary endpoint fails
    async fn refresh_transaction_summary(&self, generation: u64, period: PeriodQuery) {
        let result = self.api.transaction_summary(&period).await;

        let mut st = self.state.write().await;
        if st.generation != generation {
            return;
        }
        match result {
            Ok(summary) => {
                st.totals.total_other_income = summary.income;
                st.totals.total_other_expense = summary.expense;
            }
            Err(err) => {
                tracing::warn!(error = %err, "transaction summary failed, folding loaded page");
                let (income, expense) = st.page_income_expense();
                st.totals.total_other_income = income;
                st.totals.total_other_expense = expense;
            }
        }
    }

    /// Recompute every overview card for the current filter
    async fn recompute_totals(&self) {
        let (generation, period, status) = self.filter_snapshot().await;
        tokio::join!(
            self.refresh_payment_totals(generation, period),
            self.refresh_salary_total(generation, period, status),
            self.refresh_transaction_summary(generation, period),
        );
    }

    // ========== Teacher payout flow ==========

    /// Open the payout dialog for a loaded teacher payment
    pub async fn begin_pay(&self, payment_id: &str) -> bool {
        let mut st = self.state.write().await;
        let payment = st
            .teacher_payments
            .iter()
            .find(|p| p.id == payment_id)
            .cloned();
        match payment {
            Some(payment) => {
                st.pay_flow = PayTeacherFlow::begin(&payment);
                true
            }
            None => {
                st.notifications.error("Teacher payment not found");
                false
            }
        }
    }

    pub async fn set_pay_amount(&self, amount: i64) {
        self.state.write().await.pay_flow.set_amount(amount);
    }

    pub async fn set_pay_method(&self, method: PayMethod) {
        self.state.write().await.pay_flow.set_method(method);
    }

    pub async fn set_pay_note(&self, note: Option<String>) {
        self.state.write().await.pay_flow.set_note(note);
    }

    /// Validate the entered amount and open the confirmation dialog
    pub async fn request_pay_confirm(&self) -> bool {
        let mut st = self.state.write().await;
        match st.pay_flow.request_confirm() {
            Ok(()) => true,
            Err(message) => {
                st.notifications.warning(message);
                false
            }
        }
    }

    /// Close the payout dialog, discarding the draft
    pub async fn cancel_pay(&self) {
        self.state.write().await.pay_flow.cancel();
    }

    /// Submit the confirmed payout
    ///
    /// Success refetches the current teacher page and recomputes totals;
    /// failure reopens the amount entry with the draft intact.
    pub async fn confirm_and_submit_pay(&self) {
        let Some(draft) = ({ self.state.write().await.pay_flow.begin_submit() }) else {
            return;
        };

        let request = PayTeacherRequest {
            amount: draft.amount,
            method: draft.method,
            note: draft.note.clone(),
        };
        let result = self
            .api
            .pay_teacher(&draft.payment_id, draft.month, draft.year, &request)
            .await;

        match result {
            Ok(()) => {
                tracing::info!(payment_id = %draft.payment_id, amount = draft.amount, "teacher payout recorded");
                let page = {
                    let mut st = self.state.write().await;
                    st.pay_flow.finish();
                    st.notifications.success("Teacher payout recorded");
                    st.teacher_pagination.page
                };
                let (generation, period, status) = self.filter_snapshot().await;
                tokio::join!(
                    self.fetch_teacher_page(generation, period, status, page),
                    self.recompute_totals(),
                );
            }
            Err(err) => {
                tracing::info!(error = %err, "teacher payout rejected");
                let mut st = self.state.write().await;
                st.pay_flow.submit_failed();
                st.notifications
                    .error(err.server_message("Failed to record teacher payout"));
            }
        }
    }

    /// Fetch a teacher profile for the payout dialog header
    pub async fn teacher_profile(&self, id: &str) -> ClientResult<TeacherProfile> {
        self.api.teacher_profile(id).await
    }

    // ========== Transaction CRUD flow ==========

    /// Open an empty add form
    pub async fn open_transaction_form(&self) {
        self.state.write().await.transaction_form = Some(TransactionForm::add());
    }

    /// Open the edit form seeded from a loaded transaction
    pub async fn edit_transaction(&self, id: &str) -> bool {
        let mut st = self.state.write().await;
        let form = st
            .transactions
            .iter()
            .find(|t| t.id == id)
            .map(TransactionForm::edit);
        match form {
            Some(form) => {
                st.transaction_form = Some(form);
                true
            }
            None => {
                st.notifications.error("Transaction not found");
                false
            }
        }
    }

    /// Mutate the open form in place
    pub async fn with_transaction_form<F: FnOnce(&mut TransactionForm)>(&self, f: F) {
        if let Some(form) = self.state.write().await.transaction_form.as_mut() {
            f(form);
        }
    }

    /// Close the form without saving
    pub async fn close_transaction_form(&self) {
        self.state.write().await.transaction_form = None;
    }

    /// Validate and submit the open form (create or update)
    ///
    /// A validation failure notifies and issues no request. Success closes
    /// the form, refetches the current transaction page, and recomputes
    /// totals; failure keeps the form open for retry.
    pub async fn save_transaction(&self) {
        let (payload, id) = {
            let mut st = self.state.write().await;
            let Some(form) = st.transaction_form.clone() else {
                return;
            };
            match form.payload(chrono::Local::now().date_naive()) {
                Ok(payload) => (payload, form.id),
                Err(message) => {
                    st.notifications.warning(message);
                    return;
                }
            }
        };

        let result = match &id {
            Some(id) => self.api.update_transaction(id, &payload).await.map(|_| ()),
            None => self.api.create_transaction(&payload).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                {
                    let mut st = self.state.write().await;
                    st.transaction_form = None;
                    st.notifications.success("Transaction saved");
                }
                self.refetch_transactions_and_totals().await;
            }
            Err(err) => {
                let mut st = self.state.write().await;
                st.notifications
                    .error(err.server_message("Failed to save transaction"));
            }
        }
    }

    /// Stage a transaction for deletion pending explicit confirmation
    pub async fn request_delete_transaction(&self, id: &str) {
        self.state.write().await.pending_delete = Some(id.to_string());
    }

    /// Drop the staged deletion
    pub async fn cancel_delete(&self) {
        self.state.write().await.pending_delete = None;
    }

    /// Delete the staged transaction
    ///
    /// Without a prior [`request_delete_transaction`] this is a no-op and
    /// issues no network call.
    ///
    /// [`request_delete_transaction`]: FinancePanel::request_delete_transaction
    pub async fn confirm_delete_transaction(&self) {
        let Some(id) = ({ self.state.write().await.pending_delete.take() }) else {
            return;
        };

        match self.api.delete_transaction(&id).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .notifications
                    .success("Transaction deleted");
                self.refetch_transactions_and_totals().await;
            }
            Err(err) => {
                let mut st = self.state.write().await;
                st.notifications
                    .error(err.server_message("Failed to delete transaction"));
            }
        }
    }

    async fn refetch_transactions_and_totals(&self) {
        let (generation, period, page) = {
            let st = self.state.read().await;
            (
                st.generation,
                st.period.resolve(),
                st.transaction_pagination.page,
            )
        };
        tokio::join!(
            self.fetch_transaction_page(generation, period, page),
            self.recompute_totals(),
        );
    }
}
