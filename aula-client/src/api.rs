//! Typed endpoint surface of the center API
//!
//! [`CenterApi`] is the seam between the console core and the backend. The
//! console only ever sees this trait, so integration tests substitute a
//! scripted in-process fake where [`HttpClient`] talks to the real wire.

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::Serialize;
use shared::models::{
    OtherTransaction, PayTeacherRequest, StudentPayment, TeacherPayment, TeacherProfile,
    TransactionPayload,
};
use shared::query::{PaymentListQuery, PeriodQuery, TransactionListQuery};
use shared::response::{Paginated, PaymentTotals, TransactionSummary};

/// REST surface the console depends on
#[async_trait]
pub trait CenterApi: Send + Sync {
    /// `GET /api/payments`
    async fn list_student_payments(
        &self,
        query: &PaymentListQuery,
    ) -> ClientResult<Paginated<StudentPayment>>;

    /// `GET /api/teacher-payments`
    async fn list_teacher_payments(
        &self,
        query: &PaymentListQuery,
    ) -> ClientResult<Paginated<TeacherPayment>>;

    /// `GET /api/payments/total`
    async fn payment_totals(&self, period: &PeriodQuery) -> ClientResult<PaymentTotals>;

    /// `POST /api/teacher-payments/{id}/pay`
    async fn pay_teacher(
        &self,
        id: &str,
        month: u32,
        year: i32,
        request: &PayTeacherRequest,
    ) -> ClientResult<()>;

    /// `GET /api/teachers/{id}`
    async fn teacher_profile(&self, id: &str) -> ClientResult<TeacherProfile>;

    /// `GET /api/transactions`
    async fn list_transactions(
        &self,
        query: &TransactionListQuery,
    ) -> ClientResult<Paginated<OtherTransaction>>;

    /// `GET /api/transactions/summary`
    async fn transaction_summary(&self, period: &PeriodQuery)
        -> ClientResult<TransactionSummary>;

    /// `POST /api/transactions`
    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> ClientResult<OtherTransaction>;

    /// `PUT /api/transactions/{id}`
    async fn update_transaction(
        &self,
        id: &str,
        payload: &TransactionPayload,
    ) -> ClientResult<OtherTransaction>;

    /// `DELETE /api/transactions/{id}`
    async fn delete_transaction(&self, id: &str) -> ClientResult<()>;
}

/// Billing period carried in the pay-teacher query string
#[derive(Debug, Clone, Copy, Serialize)]
struct PayPeriod {
    month: u32,
    year: i32,
}

#[async_trait]
impl CenterApi for HttpClient {
    async fn list_student_payments(
        &self,
        query: &PaymentListQuery,
    ) -> ClientResult<Paginated<StudentPayment>> {
        self.get_query("api/payments", query).await
    }

    async fn list_teacher_payments(
        &self,
        query: &PaymentListQuery,
    ) -> ClientResult<Paginated<TeacherPayment>> {
        self.get_query("api/teacher-payments", query).await
    }

    async fn payment_totals(&self, period: &PeriodQuery) -> ClientResult<PaymentTotals> {
        self.get_query("api/payments/total", period).await
    }

    async fn pay_teacher(
        &self,
        id: &str,
        month: u32,
        year: i32,
        request: &PayTeacherRequest,
    ) -> ClientResult<()> {
        let path = format!("api/teacher-payments/{id}/pay");
        self.post_query_unit(&path, &PayPeriod { month, year }, request)
            .await
    }

    async fn teacher_profile(&self, id: &str) -> ClientResult<TeacherProfile> {
        self.get(&format!("api/teachers/{id}")).await
    }

    async fn list_transactions(
        &self,
        query: &TransactionListQuery,
    ) -> ClientResult<Paginated<OtherTransaction>> {
        self.get_query("api/transactions", query).await
    }

    async fn transaction_summary(
        &self,
        period: &PeriodQuery,
    ) -> ClientResult<TransactionSummary> {
        self.get_query("api/transactions/summary", period).await
    }

    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> ClientResult<OtherTransaction> {
        self.post("api/transactions", payload).await
    }

    async fn update_transaction(
        &self,
        id: &str,
        payload: &TransactionPayload,
    ) -> ClientResult<OtherTransaction> {
        self.put(&format!("api/transactions/{id}"), payload).await
    }

    async fn delete_transaction(&self, id: &str) -> ClientResult<()> {
        self.delete_unit(&format!("api/transactions/{id}")).await
    }
}
