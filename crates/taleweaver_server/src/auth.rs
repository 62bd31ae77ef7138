//! Session verification against the managed auth service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use taleweaver_error::{AuthError, TaleweaverResult};
use taleweaver_interface::SessionVerifier;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
}

/// Verifies bearer credentials by asking the auth service who they belong to.
#[derive(Debug, Clone)]
pub struct HttpSessionVerifier {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpSessionVerifier {
    /// Create a verifier for the given auth service endpoint.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    #[instrument(skip(self, bearer_token))]
    async fn verify(&self, bearer_token: &str) -> TaleweaverResult<String> {
        if bearer_token.is_empty() {
            Err(AuthError::new("missing bearer credential"))?;
        }

        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(bearer_token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| AuthError::new(format!("session lookup failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "Auth service rejected the credential");
            Err(AuthError::new(format!(
                "session rejected with status {status}"
            )))?;
        }

        let user: UserInfo = response
            .json()
            .await
            .map_err(|e| AuthError::new(format!("unexpected session payload: {e}")))?;

        debug!(user_id = %user.id, "Session verified");
        Ok(user.id)
    }
}
