// SPDX-License-Identifier: Apache-2.0

//! Bearer-token verification against an external identity provider.
//!
//! The provider sits behind a trait so the server never hard-wires a
//! vendor, and tests swap in [`FakeAuthProvider`]. Token verification
//! happens before any core logic runs; the resolved identity is mapped to
//! the internal user row by the caller.

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Stable external subject; maps to `users.subject`.
    pub subject: String,
    pub name: String,
}

#[derive(Debug)]
pub enum AuthError {
    InvalidToken,
    Provider(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken => f.write_str("invalid or expired token"),
            Self::Provider(msg) => write!(f, "identity provider failure: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError>;
}

/// Pull the bearer token out of the `Authorization` header. A bare token
/// without the `Bearer ` prefix is accepted for parity with existing
/// clients.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get("authorization")?.to_str().ok()?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Verifies tokens with `GET {base_url}/user` and an `Authorization:
/// Bearer` header, the shape Supabase-style providers expose.
pub struct HttpAuthProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthProvider {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        let url = format!("{}/user", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AuthError::InvalidToken);
        }
        if !response.status().is_success() {
            warn!(status = %response.status(), "identity provider returned non-success");
            return Err(AuthError::Provider(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        let subject = body
            .get("id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::InvalidToken)?
            .to_string();
        let name = body
            .pointer("/user_metadata/name")
            .and_then(Value::as_str)
            .or_else(|| body.get("email").and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
            .to_string();
        Ok(AuthIdentity { subject, name })
    }
}

/// In-memory provider for tests: a token is valid iff it was registered.
#[derive(Default)]
pub struct FakeAuthProvider {
    pub tokens: Mutex<HashMap<String, AuthIdentity>>,
}

impl FakeAuthProvider {
    pub async fn allow(&self, token: &str, subject: &str, name: &str) {
        self.tokens.lock().await.insert(
            token.to_string(),
            AuthIdentity {
                subject: subject.to_string(),
                name: name.to_string(),
            },
        );
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        self.tokens
            .lock()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_prefix_is_optional() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer tok-1"));
        assert_eq!(bearer_token(&headers), Some("tok-1"));

        headers.insert("authorization", HeaderValue::from_static("tok-2"));
        assert_eq!(bearer_token(&headers), Some("tok-2"));

        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);

        headers.remove("authorization");
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn fake_provider_only_knows_registered_tokens() {
        let fake = FakeAuthProvider::default();
        fake.allow("tok", "sub-1", "Site Lead").await;
        let identity = fake.verify("tok").await.expect("registered token");
        assert_eq!(identity.subject, "sub-1");
        assert!(matches!(
            fake.verify("other").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
