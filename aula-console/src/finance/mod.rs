//! Finance statistics panel
//!
//! The panel is split into the passive state container ([`FinanceState`]),
//! pure aggregation folds ([`totals`]), the two mutation flows, and the
//! fetch coordinator ([`FinancePanel`]) that drives everything over the
//! injected API client.

pub mod panel;
pub mod pay_teacher;
pub mod state;
pub mod totals;
pub mod transactions;

pub use panel::FinancePanel;
pub use pay_teacher::{PayDraft, PayTeacherFlow};
pub use state::{FinanceState, PaginationState};
pub use totals::TotalStatistics;
pub use transactions::TransactionForm;
