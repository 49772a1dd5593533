//! HTTP transport for the center API
//!
//! Every request carries `Authorization: Bearer <token>` when a token is
//! held. Responses arrive inside the `{code, message, data}` envelope and
//! are unwrapped here so callers receive payloads directly. Any 401 clears
//! the in-memory token and the persisted credential file; the embedding
//! shell reacts to [`ClientError::Unauthorized`] by routing to login.

use crate::{ClientConfig, ClientError, ClientResult, CredentialStorage, StoredCredential};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::error::ApiResponse;
use tokio::sync::RwLock;

/// HTTP client for the center API
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    credentials: CredentialStorage,
}

impl HttpClient {
    /// Create a client from configuration
    ///
    /// A token persisted by a previous session is picked up from the
    /// credential file, so a restart does not force a fresh login.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let credentials = CredentialStorage::new(&config.credentials_dir);
        let token = credentials.load()?.map(|c| c.token);
        if token.is_some() {
            tracing::debug!("Hydrated session token from credential file");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
            credentials,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session token, if any
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the session token without touching the credential file
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn auth_header(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| format!("Bearer {t}"))
    }

    async fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header().await {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    /// Drop the session: in-memory token and persisted credential file
    async fn clear_session(&self) {
        *self.token.write().await = None;
        if let Err(err) = self.credentials.clear() {
            tracing::warn!("Failed to clear stored credentials: {err}");
        }
    }

    /// Unwrap a response into its envelope payload
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Received 401, clearing session");
            self.clear_session().await;
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await?;
            // Structured error envelope first, plain status mapping as fallback
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
                if let Some(code) = envelope.code.filter(|c| *c != 0) {
                    return Err(ClientError::Api {
                        code,
                        message: envelope.message,
                    });
                }
            }
            return match status {
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.is_success() {
            return Err(ClientError::Api {
                code: envelope.code.unwrap_or(1),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }

    fn expect_data<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }

    // ========== Generic verbs ==========

    /// GET returning the envelope payload
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path))).await;
        let response = request.send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// GET with query parameters
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync,
    {
        let request = self
            .authorize(self.client.get(self.url(path)).query(query))
            .await;
        let response = request.send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// POST with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let request = self
            .authorize(self.client.post(self.url(path)).json(body))
            .await;
        let response = request.send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// POST with query parameters and a JSON body, tolerating an empty payload
    pub async fn post_query_unit<B, Q>(&self, path: &str, query: &Q, body: &B) -> ClientResult<()>
    where
        B: Serialize + Sync,
        Q: Serialize + Sync,
    {
        let request = self
            .authorize(self.client.post(self.url(path)).query(query).json(body))
            .await;
        let response = request.send().await?;
        self.handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// POST without a body, tolerating an empty payload
    pub async fn post_empty_unit(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(self.client.post(self.url(path))).await;
        let response = request.send().await?;
        self.handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// PUT with a JSON body
    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let request = self
            .authorize(self.client.put(self.url(path)).json(body))
            .await;
        let response = request.send().await?;
        Self::expect_data(self.handle_response(response).await?)
    }

    /// DELETE, tolerating an empty payload
    pub async fn delete_unit(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(self.client.delete(self.url(path))).await;
        let response = request.send().await?;
        self.handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    // ========== Auth API ==========

    /// Login with username and password
    ///
    /// On success the token is held in memory and persisted to the
    /// credential file.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let login: LoginResponse = self.post("api/auth/login", &request).await?;

        *self.token.write().await = Some(login.token.clone());
        self.credentials
            .save(&StoredCredential::new(&login.token, username))?;
        tracing::info!(username, "Logged in");
        Ok(login)
    }

    /// Get the current user
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("api/auth/me").await
    }

    /// Logout and drop the session
    pub async fn logout(&self) -> ClientResult<()> {
        self.post_empty_unit("api/auth/logout").await?;
        self.clear_session().await;
        Ok(())
    }
}
