//! Shared types for the Aula platform
//!
//! Common types used across the client, console, and mock API crates:
//! data models, query parameters, response envelopes, and error types.

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};

// Query and envelope re-exports
pub use query::{PaymentListQuery, PeriodFilter, PeriodQuery, StatusFilter, TransactionListQuery};
pub use response::{Paginated, PaymentTotals, TransactionSummary};
