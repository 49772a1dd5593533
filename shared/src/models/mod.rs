//! Data models
//!
//! Wire types shared between the center API and the admin console client.
//! All IDs are backend document IDs (`String`); all money fields are VND in
//! integer units and normalize `null` to zero at deserialization.

pub mod payment;
pub mod teacher;
pub mod teacher_payment;
pub mod transaction;

// Re-exports
pub use payment::*;
pub use teacher::*;
pub use teacher_payment::*;
pub use transaction::*;
