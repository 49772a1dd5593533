//! In-memory mock of the Aula center API
//!
//! Serves the REST contract the console and client depend on, backed by a
//! deterministic seeded dataset. Used as a dev backend (see `main.rs`) and
//! embedded in integration tests via [`router`].

pub mod api;
pub mod state;

pub use api::router;
pub use state::{FailureFlags, MockState};
