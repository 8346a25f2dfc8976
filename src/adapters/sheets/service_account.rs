//! Service-account authentication for the spreadsheet API.
//!
//! Exchanges a self-signed RS256 assertion for a bearer token at the token
//! endpoint, then reuses the token until shortly before it expires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::ports::StoreError;

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Default token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion, in seconds.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens this close to expiry are refreshed.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Credentials of a service account.
#[derive(Debug, Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    private_key: Secret<String>,
    pub token_uri: String,
}

impl ServiceAccountCredentials {
    /// Create credentials from the account email and its PEM private key.
    ///
    /// Keys pasted into environment variables often carry literal `\n`
    /// sequences; those are turned back into newlines.
    pub fn new(client_email: impl Into<String>, private_key: impl AsRef<str>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: Secret::new(normalize_private_key(private_key.as_ref())),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        }
    }

    /// Sets the token endpoint.
    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }

    fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }
}

/// Undo escaping applied to PEM keys stored in env files.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\\\n", "\n")
        .replace("\\n", "\n")
        .trim()
        .to_string()
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

struct CachedToken {
    token: Secret<String>,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + REFRESH_MARGIN < self.expires_at
    }
}

/// Issues bearer tokens for a service account.
pub struct ServiceAccountAuthenticator {
    credentials: ServiceAccountCredentials,
    client: Client,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuthenticator {
    pub fn new(credentials: ServiceAccountCredentials, client: Client) -> Self {
        Self {
            credentials,
            client,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.credentials.client_email
    }

    /// Get a bearer token, using the cached one while it is still fresh.
    pub async fn access_token(&self) -> Result<Secret<String>, StoreError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.is_fresh() {
                    return Ok(cached.token.clone());
                }
            }
        }

        let assertion = self.sign_assertion()?;
        let fetched = self.exchange(&assertion).await?;
        let token = fetched.token.clone();
        *self.cache.write().await = Some(fetched);
        Ok(token)
    }

    /// Drop the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    fn sign_assertion(&self) -> Result<String, StoreError> {
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key().as_bytes())
            .map_err(|e| StoreError::Unauthorized(format!("invalid private key: {}", e)))?;

        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.credentials.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.credentials.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StoreError::Unauthorized(format!("failed to sign assertion: {}", e)))
    }

    async fn exchange(&self, assertion: &str) -> Result<CachedToken, StoreError> {
        tracing::debug!(
            client_email = %self.credentials.client_email,
            "Requesting spreadsheet access token"
        );

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Token endpoint rejected assertion");
            return Err(StoreError::Unauthorized(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;

        Ok(CachedToken {
            token: Secret::new(parsed.access_token),
            expires_at: Instant::now() + Duration::from_secs(parsed.expires_in),
        })
    }
}
