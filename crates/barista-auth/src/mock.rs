//! Mock verifier for tests — accepts a fixed token string and hands out
//! configurable permissions without touching the network.

use async_trait::async_trait;
use serde_json::json;

use crate::error::AuthError;
use crate::verifier::{Claims, TokenVerifier};

/// Accepts exactly one token value; everything else is rejected the way a
/// bad signature would be.
pub struct MockVerifier {
    token: String,
    permissions: Option<Vec<String>>,
}

impl MockVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            permissions: Some(vec![]),
        }
    }

    /// Grant a permission to the mock subject.
    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions
            .get_or_insert_with(Vec::new)
            .push(permission.to_string());
        self
    }

    /// Simulate a tenant without RBAC: tokens verify but carry no
    /// `permissions` claim at all.
    pub fn without_permissions_claim(mut self) -> Self {
        self.permissions = None;
        self
    }
}

#[async_trait]
impl TokenVerifier for MockVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token != self.token {
            return Err(AuthError::InvalidHeader("signature mismatch".into()));
        }
        Ok(Claims {
            sub: "auth0|mock".into(),
            aud: json!("http://127.0.0.1:5000"),
            iss: "https://mock.auth0.com/".into(),
            exp: u64::MAX,
            permissions: self.permissions.clone(),
        })
    }
}
