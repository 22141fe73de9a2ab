//! Authorized-user OAuth credentials stored as a JSON file.
//!
//! The file is created once by an interactive consent flow outside this
//! tool. Here it is only read, refreshed with the refresh-token grant when
//! the access token has expired, and written back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PublishError, PublishResult};

/// Google OAuth token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed early.
const EXPIRY_SKEW_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Contents of the credential file.
///
/// Unknown fields (scopes, account, ...) are preserved on write-back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUserToken {
    /// Current access token
    #[serde(default)]
    pub token: Option<String>,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthorizedUserToken {
    /// Whether the access token is absent or about to expire at `now`.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (None, _) => true,
            (Some(token), _) if token.is_empty() => true,
            (Some(_), Some(expiry)) => expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now,
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Reads, refreshes and persists one credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    http: Client,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>, http: Client) -> Self {
        Self {
            path: path.into(),
            http,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the credential file.
    pub async fn load(&self) -> PublishResult<AuthorizedUserToken> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PublishError::CredentialMissing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|e| {
            PublishError::credential_invalid(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Write the credential file back in place.
    pub async fn save(&self, token: &AuthorizedUserToken) -> PublishResult<()> {
        let json = serde_json::to_string_pretty(token)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Saved credential file");
        Ok(())
    }

    /// A valid access token, refreshing and persisting it first if needed.
    pub async fn access_token(&self) -> PublishResult<String> {
        let mut token = self.load().await?;

        if token.needs_refresh(Utc::now()) {
            self.refresh(&mut token).await?;
            self.save(&token).await?;
        }

        token
            .token
            .ok_or_else(|| PublishError::credential_invalid("no access token after refresh"))
    }

    /// Exchange the refresh token for a new access token.
    pub async fn refresh(&self, token: &mut AuthorizedUserToken) -> PublishResult<()> {
        info!(token_uri = %token.token_uri, "Refreshing OAuth access token");

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", token.refresh_token.as_str()),
            ("client_id", token.client_id.as_str()),
            ("client_secret", token.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&token.token_uri)
            .form(&form)
            .send()
            .await
            .map_err(|e| PublishError::refresh_failed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::refresh_failed(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| PublishError::refresh_failed(format!("invalid response: {}", e)))?;

        token.token = Some(refreshed.access_token);
        token.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        if let Some(rotated) = refreshed.refresh_token {
            token.refresh_token = rotated;
        }

        Ok(())
    }
}
