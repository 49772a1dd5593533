//! Finance console core for the Aula admin front-end
//!
//! Holds the statistics-panel state machine: period-filter driven fetch
//! coordination over the [`aula_client::CenterApi`] seam, client-side
//! aggregation with fallback, and the teacher-payout and other-transaction
//! mutation flows. Rendering is out of scope; an embedding shell reads the
//! state snapshot and drains the notification queue.

pub mod finance;
pub mod notify;

pub use finance::{
    FinancePanel, FinanceState, PaginationState, PayDraft, PayTeacherFlow, TotalStatistics,
    TransactionForm,
};
pub use notify::{Notification, NotificationQueue, NotifyLevel};
