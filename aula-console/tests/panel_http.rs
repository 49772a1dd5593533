//! End-to-end tests: the finance panel over a real HTTP client against
//! the mock center API
//!
//! Expected aggregates are computed by re-folding the mock's own seeded
//! records, so the assertions hold even when the seed dataset changes.

use aula_api_mock::{FailureFlags, MockState};
use aula_client::{ClientConfig, HttpClient};
use aula_console::{FinancePanel, NotifyLevel, PayTeacherFlow};
use chrono::{Datelike, NaiveDate};
use shared::models::{PaymentStatus, TransactionKind};
use shared::query::PeriodFilter;
use std::sync::Arc;

async fn spawn_mock() -> (Arc<MockState>, String) {
    let state = Arc::new(MockState::seeded());
    let router = aula_api_mock::router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (state, format!("http://{addr}"))
}

async fn panel_for(url: &str, dir: &std::path::Path) -> FinancePanel {
    let config = ClientConfig::new(url).with_credentials_dir(dir);
    let client = HttpClient::new(&config).unwrap();
    client.login("admin", "admin123").await.unwrap();
    FinancePanel::new(Arc::new(client))
}

fn march() -> PeriodFilter {
    PeriodFilter::Month {
        year: 2025,
        month: 3,
    }
}

#[tokio::test]
async fn overview_matches_refolded_seed_data() {
    let (state, url) = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let panel = panel_for(&url, dir.path()).await;
    panel.set_period(march()).await;

    let students: Vec<_> = state
        .student_payments()
        .await
        .into_iter()
        .filter(|p| p.month == 3)
        .collect();
    let teachers: Vec<_> = state
        .teacher_payments()
        .await
        .into_iter()
        .filter(|p| p.month == 3)
        .collect();
    let (fees, paid) = students
        .iter()
        .fold((0, 0), |(f, p), pay| (f + pay.final_amount, p + pay.paid_amount));
    let salary: i64 = teachers.iter().map(|p| p.total_amount).sum();
    let (income, expense) = state
        .transactions()
        .await
        .iter()
        .filter(|t| t.date.month() == 3)
        .fold((0, 0), |(i, e), t| match t.kind {
            TransactionKind::Income => (i + t.amount, e),
            TransactionKind::Expense => (i, e + t.amount),
        });

    let shared_state = panel.state();
    let st = shared_state.read().await;
    assert_eq!(st.totals.total_student_fees, fees);
    assert_eq!(st.totals.total_paid_amount, paid);
    assert_eq!(st.totals.total_remaining_amount, fees - paid);
    assert_eq!(st.totals.total_teacher_salary, salary);
    assert_eq!(st.totals.total_other_income, income);
    assert_eq!(st.totals.total_other_expense, expense);
    assert_eq!(st.teacher_payments.len(), teachers.len());
    assert_eq!(st.teacher_pagination.total_results, teachers.len() as u64);
    assert_eq!(st.transactions.len(), 2);
}

#[tokio::test]
async fn aggregate_outage_falls_back_to_raw_fold() {
    let (state, url) = spawn_mock().await;
    state
        .set_failures(FailureFlags {
            payment_totals: true,
            ..FailureFlags::default()
        })
        .await;
    let dir = tempfile::tempdir().unwrap();
    let panel = panel_for(&url, dir.path()).await;
    panel.set_period(march()).await;

    let (fees, paid) = state
        .student_payments()
        .await
        .iter()
        .filter(|p| p.month == 3)
        .fold((0, 0), |(f, p), pay| (f + pay.final_amount, p + pay.paid_amount));

    let shared_state = panel.state();
    let st = shared_state.read().await;
    assert_eq!(st.totals.total_student_fees, fees);
    assert_eq!(st.totals.total_paid_amount, paid);
    assert_eq!(st.totals.total_remaining_amount, fees - paid);
}

#[tokio::test]
async fn teacher_outage_degrades_only_that_slice() {
    let (state, url) = spawn_mock().await;
    state
        .set_failures(FailureFlags {
            teacher_list: true,
            ..FailureFlags::default()
        })
        .await;
    let dir = tempfile::tempdir().unwrap();
    let panel = panel_for(&url, dir.path()).await;
    panel.set_period(march()).await;

    let shared_state = panel.state();
    let st = shared_state.read().await;
    assert!(st.teacher_payments.is_empty());
    assert_eq!(st.teacher_pagination.page, 1);
    assert_eq!(st.teacher_pagination.total_results, 0);
    assert_eq!(st.totals.total_teacher_salary, 0);
    // Siblings keep their data
    assert_eq!(st.transactions.len(), 2);
    assert!(st.totals.total_student_fees > 0);
    drop(st);

    assert!(panel.drain_notifications().await.is_empty());
}

#[tokio::test]
async fn settling_a_teacher_payment_updates_backend_and_panel() {
    let (state, url) = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let panel = panel_for(&url, dir.path()).await;
    panel.set_period(march()).await;

    // tp-3-1 is seeded partially paid
    let target = state
        .teacher_payments()
        .await
        .into_iter()
        .find(|p| p.id == "tp-3-1")
        .unwrap();
    assert_eq!(target.status, PaymentStatus::Partial);
    let remaining = target.remaining();
    assert!(remaining > 0);

    // The payout dialog header resolves the teacher profile
    let profile = panel.teacher_profile("t-1").await.unwrap();
    assert_eq!(profile.user.name, "Tran Thi Binh");

    assert!(panel.begin_pay("tp-3-1").await);
    panel.set_pay_amount(remaining).await;
    assert!(panel.request_pay_confirm().await);
    panel.confirm_and_submit_pay().await;

    let settled = state
        .teacher_payments()
        .await
        .into_iter()
        .find(|p| p.id == "tp-3-1")
        .unwrap();
    assert_eq!(settled.paid_amount, settled.total_amount);
    assert_eq!(settled.status, PaymentStatus::Paid);

    // The refetched page shows the settled row
    let shared_state = panel.state();
    {
        let st = shared_state.read().await;
        let row = st.teacher_payments.iter().find(|p| p.id == "tp-3-1").unwrap();
        assert_eq!(row.remaining(), 0);
        assert!(st.pay_flow.is_idle());
    }
    let notes = panel.drain_notifications().await;
    assert!(notes.iter().any(|n| n.level == NotifyLevel::Success));
}

#[tokio::test]
async fn write_outage_surfaces_server_message_and_keeps_draft() {
    let (state, url) = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let panel = panel_for(&url, dir.path()).await;
    panel.set_period(march()).await;

    state
        .set_failures(FailureFlags {
            writes: true,
            ..FailureFlags::default()
        })
        .await;

    assert!(panel.begin_pay("tp-3-2").await);
    panel.set_pay_amount(100_000).await;
    assert!(panel.request_pay_confirm().await);
    panel.confirm_and_submit_pay().await;

    let shared_state = panel.state();
    {
        let st = shared_state.read().await;
        match &st.pay_flow {
            PayTeacherFlow::AmountEntered(draft) => assert_eq!(draft.amount, 100_000),
            other => panic!("expected AmountEntered, got {other:?}"),
        }
    }
    let notes = panel.drain_notifications().await;
    assert!(notes
        .iter()
        .any(|n| n.level == NotifyLevel::Error && n.message == "writes unavailable"));

    // Backend state is untouched
    let payment = state
        .teacher_payments()
        .await
        .into_iter()
        .find(|p| p.id == "tp-3-2")
        .unwrap();
    assert_eq!(payment.paid_amount, 0);
}

#[tokio::test]
async fn transaction_lifecycle_round_trips() {
    let (state, url) = spawn_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let panel = panel_for(&url, dir.path()).await;
    panel.set_period(march()).await;

    // Create
    panel.open_transaction_form().await;
    panel
        .with_transaction_form(|form| {
            form.title = "Spring fair".to_string();
            form.amount = 2_500_000;
            form.kind = TransactionKind::Income;
            form.date = NaiveDate::from_ymd_opt(2025, 3, 20);
        })
        .await;
    panel.save_transaction().await;

    let created = state
        .transactions()
        .await
        .into_iter()
        .find(|t| t.title == "Spring fair")
        .expect("transaction was created");

    let expected_income: i64 = state
        .transactions()
        .await
        .iter()
        .filter(|t| t.date.month() == 3 && t.kind == TransactionKind::Income)
        .map(|t| t.amount)
        .sum();

    let shared_state = panel.state();
    {
        let st = shared_state.read().await;
        assert!(st.transactions.iter().any(|t| t.id == created.id));
        assert!(st.transaction_form.is_none());
        assert_eq!(st.totals.total_other_income, expected_income);
    }

    // Edit
    assert!(panel.edit_transaction(&created.id).await);
    panel
        .with_transaction_form(|form| form.amount = 3_000_000)
        .await;
    panel.save_transaction().await;
    let updated = state
        .transactions()
        .await
        .into_iter()
        .find(|t| t.id == created.id)
        .unwrap();
    assert_eq!(updated.amount, 3_000_000);

    // Delete, with the confirmation step
    panel.request_delete_transaction(&created.id).await;
    panel.confirm_delete_transaction().await;
    assert!(
        !state
            .transactions()
            .await
            .iter()
            .any(|t| t.id == created.id)
    );
    let st = shared_state.read().await;
    assert!(!st.transactions.iter().any(|t| t.id == created.id));
    assert_eq!(st.transactions.len(), 2);
}
