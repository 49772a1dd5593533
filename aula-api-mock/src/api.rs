//! Mock center API handlers
//!
//! Implements the REST contract the console depends on: auth, student and
//! teacher payment lists, aggregate totals, transaction CRUD plus summary,
//! and teacher profiles. Data lives in [`MockState`]; responses use the
//! standard `{code, message, data}` envelope.

use crate::state::MockState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;
use serde::Deserialize;
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    OtherTransaction, PayTeacherRequest, PaymentStatus, StudentPayment, TeacherPayment,
    TeacherProfile, TransactionKind, TransactionPayload,
};
use shared::query::{PaymentListQuery, PeriodQuery, TransactionListQuery};
use shared::response::{Paginated, PaymentTotals, TransactionSummary};
use std::sync::Arc;

type SharedState = Arc<MockState>;
type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Resolve the bearer token to a username, or reject with 401
async fn authenticate(state: &MockState, headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err(AppError::not_authenticated());
    };

    state
        .inner
        .read()
        .await
        .tokens
        .get(token)
        .cloned()
        .ok_or_else(|| AppError::invalid_token("Unknown or expired token"))
}

// ========== Auth ==========

async fn login(
    State(state): State<SharedState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let mut inner = state.inner.write().await;

    let Some(user) = inner.users.get(&request.username) else {
        return Err(AppError::invalid_credentials());
    };
    if user.password != request.password {
        return Err(AppError::invalid_credentials());
    }

    let info = user.info.clone();
    let token = uuid::Uuid::new_v4().to_string();
    inner.tokens.insert(token.clone(), request.username.clone());
    tracing::info!(username = %request.username, "login");

    Ok(ApiResponse::success(LoginResponse { token, user: info }))
}

async fn me(State(state): State<SharedState>, headers: HeaderMap) -> ApiResult<UserInfo> {
    let username = authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    let user = inner
        .users
        .get(&username)
        .ok_or_else(|| AppError::not_found("user"))?;
    Ok(ApiResponse::success(user.info.clone()))
}

async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> ApiResult<()> {
    authenticate(&state, &headers).await?;
    if let Some(token) = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        state.inner.write().await.tokens.remove(token);
    }
    Ok(ApiResponse::ok())
}

// ========== Student payments ==========

fn status_matches(status: Option<PaymentStatus>, record_status: PaymentStatus) -> bool {
    status.is_none_or(|s| s == record_status)
}

async fn list_payments(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PaymentListQuery>,
) -> ApiResult<Paginated<StudentPayment>> {
    authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    if inner.failures.student_list {
        return Err(AppError::unavailable("payments unavailable"));
    }

    let period = query.period();
    let matches: Vec<StudentPayment> = inner
        .student_payments
        .iter()
        .filter(|p| period.contains(p.year, p.month))
        .filter(|p| status_matches(query.status, p.status))
        .cloned()
        .collect();

    Ok(ApiResponse::success(Paginated::from_full_set(
        matches,
        query.page,
        query.limit,
    )))
}

async fn payment_totals(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(period): Query<PeriodQuery>,
) -> ApiResult<PaymentTotals> {
    authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    if inner.failures.payment_totals {
        return Err(AppError::unavailable("aggregate totals unavailable"));
    }

    let mut totals = PaymentTotals::default();
    for payment in inner
        .student_payments
        .iter()
        .filter(|p| period.contains(p.year, p.month))
    {
        totals.total += payment.final_amount;
        totals.paid += payment.paid_amount;
    }
    Ok(ApiResponse::success(totals))
}

// ========== Teacher payments ==========

async fn list_teacher_payments(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PaymentListQuery>,
) -> ApiResult<Paginated<TeacherPayment>> {
    authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    if inner.failures.teacher_list {
        return Err(AppError::unavailable("teacher payments unavailable"));
    }

    let period = query.period();
    let matches: Vec<TeacherPayment> = inner
        .teacher_payments
        .iter()
        .filter(|p| period.contains(p.year, p.month))
        .filter(|p| status_matches(query.status, p.status))
        .cloned()
        .collect();

    Ok(ApiResponse::success(Paginated::from_full_set(
        matches,
        query.page,
        query.limit,
    )))
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PayPeriodQuery {
    month: u32,
    year: i32,
}

async fn pay_teacher(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(period): Query<PayPeriodQuery>,
    Json(request): Json<PayTeacherRequest>,
) -> ApiResult<()> {
    authenticate(&state, &headers).await?;
    let mut inner = state.inner.write().await;
    if inner.failures.writes {
        return Err(AppError::unavailable("writes unavailable"));
    }

    let payment = inner
        .teacher_payments
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::TeacherPaymentNotFound))?;

    if payment.month != period.month || payment.year != period.year {
        return Err(AppError::with_message(
            ErrorCode::PaymentPeriodInvalid,
            format!(
                "Payment {id} belongs to {}/{}, not {}/{}",
                payment.month, payment.year, period.month, period.year
            ),
        ));
    }
    if payment.status == PaymentStatus::Paid {
        return Err(AppError::new(ErrorCode::TeacherPaymentSettled));
    }
    if request.amount <= 0 {
        return Err(AppError::new(ErrorCode::PayAmountInvalid));
    }
    if request.amount > payment.remaining() {
        return Err(AppError::new(ErrorCode::PayExceedsRemaining));
    }

    payment.paid_amount += request.amount;
    payment.status = if payment.paid_amount >= payment.total_amount {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };
    tracing::info!(%id, amount = request.amount, "teacher payout recorded");

    Ok(ApiResponse::ok())
}

async fn get_teacher(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<TeacherProfile> {
    authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    let teacher = inner
        .teachers
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::TeacherNotFound))?;
    Ok(ApiResponse::success(teacher))
}

// ========== Transactions ==========

fn transaction_in_period(period: &PeriodQuery, transaction: &OtherTransaction) -> bool {
    period.contains(transaction.date.year(), transaction.date.month())
}

async fn list_transactions(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<Paginated<OtherTransaction>> {
    authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    if inner.failures.transaction_list {
        return Err(AppError::unavailable("transactions unavailable"));
    }

    let period = query.period();
    let matches: Vec<OtherTransaction> = inner
        .transactions
        .iter()
        .filter(|t| transaction_in_period(&period, t))
        .cloned()
        .collect();

    Ok(ApiResponse::success(Paginated::from_full_set(
        matches,
        query.page,
        query.limit,
    )))
}

async fn transaction_summary(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(period): Query<PeriodQuery>,
) -> ApiResult<TransactionSummary> {
    authenticate(&state, &headers).await?;
    let inner = state.inner.read().await;
    if inner.failures.transaction_summary {
        return Err(AppError::unavailable("transaction summary unavailable"));
    }

    let mut summary = TransactionSummary::default();
    for transaction in inner
        .transactions
        .iter()
        .filter(|t| transaction_in_period(&period, t))
    {
        match transaction.kind {
            TransactionKind::Income => summary.income += transaction.amount,
            TransactionKind::Expense => summary.expense += transaction.amount,
        }
    }
    Ok(ApiResponse::success(summary))
}

fn validate_payload(payload: &TransactionPayload) -> Result<(), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::validation("title must not be empty"));
    }
    if payload.amount <= 0 {
        return Err(AppError::validation("amount must be positive"));
    }
    Ok(())
}

async fn create_transaction(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<TransactionPayload>,
) -> ApiResult<OtherTransaction> {
    authenticate(&state, &headers).await?;
    let mut inner = state.inner.write().await;
    if inner.failures.writes {
        return Err(AppError::unavailable("writes unavailable"));
    }
    validate_payload(&payload)?;

    inner.next_transaction_id += 1;
    let transaction = OtherTransaction {
        id: format!("txn-{}", inner.next_transaction_id),
        title: payload.title,
        description: payload.description,
        amount: payload.amount,
        kind: payload.kind,
        category: payload.category,
        date: payload.date,
        payment_method: payload.payment_method,
    };
    inner.transactions.push(transaction.clone());
    tracing::info!(id = %transaction.id, "transaction created");

    Ok(ApiResponse::success(transaction))
}

async fn update_transaction(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<TransactionPayload>,
) -> ApiResult<OtherTransaction> {
    authenticate(&state, &headers).await?;
    let mut inner = state.inner.write().await;
    if inner.failures.writes {
        return Err(AppError::unavailable("writes unavailable"));
    }
    validate_payload(&payload)?;

    let transaction = inner
        .transactions
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::TransactionNotFound))?;

    transaction.title = payload.title;
    transaction.description = payload.description;
    transaction.amount = payload.amount;
    transaction.kind = payload.kind;
    transaction.category = payload.category;
    transaction.date = payload.date;
    transaction.payment_method = payload.payment_method;
    tracing::info!(%id, "transaction updated");

    Ok(ApiResponse::success(transaction.clone()))
}

async fn delete_transaction(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<()> {
    authenticate(&state, &headers).await?;
    let mut inner = state.inner.write().await;
    if inner.failures.writes {
        return Err(AppError::unavailable("writes unavailable"));
    }

    let before = inner.transactions.len();
    inner.transactions.retain(|t| t.id != id);
    if inner.transactions.len() == before {
        return Err(AppError::new(ErrorCode::TransactionNotFound));
    }
    tracing::info!(%id, "transaction deleted");

    Ok(ApiResponse::ok())
}

/// Build the mock API router
pub fn router(state: SharedState) -> Router {
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/payments", get(list_payments))
        .route("/api/payments/total", get(payment_totals))
        .route("/api/teacher-payments", get(list_teacher_payments))
        .route("/api/teacher-payments/{id}/pay", post(pay_teacher))
        .route("/api/teachers/{id}", get(get_teacher))
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/api/transactions/summary", get(transaction_summary))
        .route(
            "/api/transactions/{id}",
            axum::routing::put(update_transaction).delete(delete_transaction),
        )
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}
