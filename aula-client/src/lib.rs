//! HTTP client for the Aula center API
//!
//! Wraps reqwest with bearer-token auth, response-envelope unwrapping, and
//! credential persistence. The typed endpoint surface is the [`CenterApi`]
//! trait; the console consumes only the trait so test doubles can stand in
//! for the real backend.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;

pub use api::CenterApi;
pub use config::ClientConfig;
pub use credentials::{CredentialError, CredentialStorage, StoredCredential};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
