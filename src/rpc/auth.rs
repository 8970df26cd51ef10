//! Service-account OAuth token source (JWT bearer grant).

use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::credentials::{CredentialError, ServiceAccountKey};
use crate::rpc::rpc::{with_retry, ReportError, RetryConfig};

pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

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
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: tokio::time::Instant,
}

/// Mints and caches access tokens for one service account.
pub struct ServiceAccountTokenSource {
    client_email: String,
    token_uri: String,
    scope: String,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    retry: RetryConfig,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ServiceAccountTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountTokenSource")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("scope", &self.scope)
            .finish()
    }
}

impl ServiceAccountTokenSource {
    /// Fails when the private key is not a usable RSA PEM key.
    pub fn new(
        key: &ServiceAccountKey,
        http: reqwest::Client,
        retry: RetryConfig,
    ) -> Result<Self, CredentialError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CredentialError::InvalidKey(e.to_string()))?;

        Ok(Self {
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            scope: ANALYTICS_READONLY_SCOPE.to_string(),
            encoding_key,
            http,
            retry,
            cached: Mutex::new(None),
        })
    }

    /// Return a valid access token, exchanging a fresh assertion when needed.
    pub async fn access_token(&self) -> Result<String, ReportError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > tokio::time::Instant::now() + EXPIRY_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.sign_assertion(chrono::Utc::now().timestamp())?;
        let response = with_retry(&self.retry, "oauth2_token", || {
            self.exchange(assertion.as_str())
        })
        .await?;

        let lifetime = Duration::from_secs(
            response
                .expires_in
                .unwrap_or(ASSERTION_LIFETIME_SECS as u64),
        );
        tracing::debug!(
            client_email = self.client_email.as_str(),
            expires_in_secs = lifetime.as_secs(),
            "Obtained access token"
        );

        let token = CachedToken {
            value: response.access_token,
            expires_at: tokio::time::Instant::now() + lifetime,
        };
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn sign_assertion(&self, issued_at: i64) -> Result<String, ReportError> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: &self.scope,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| ReportError::Auth(format!("failed to sign assertion: {}", e)))
    }

    async fn exchange(&self, assertion: &str) -> Result<TokenResponse, ReportError> {
        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<TokenResponse>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => match err.error_description {
                Some(description) => format!("{}: {}", err.error, description),
                None => err.error,
            },
            Err(_) => body,
        };

        if status.is_server_error() {
            Err(ReportError::Api {
                code: status.as_u16(),
                status: "TOKEN_ENDPOINT_UNAVAILABLE".to_string(),
                message,
            })
        } else {
            Err(ReportError::Auth(format!("{} ({})", message, status.as_u16())))
        }
    }
}
