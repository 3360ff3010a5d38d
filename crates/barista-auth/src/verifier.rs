use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::jwks::JwksCache;
use barista_config::Environment;

/// Claims carried by a verified access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier).
    pub sub: String,
    /// Audience — string or array, depending on the tenant.
    pub aud: serde_json::Value,
    /// Issuer.
    pub iss: String,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
    /// RBAC permissions granted to the subject, e.g. "post:drinks".
    /// Absent entirely when RBAC is not enabled on the tenant.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// Pull the token out of an `Authorization` header value.
///
/// The header must be present, its scheme must be `Bearer`
/// (case-insensitive), and it must contain exactly the scheme and the
/// token.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let mut parts = header.split_whitespace();

    let scheme = parts.next().ok_or_else(|| {
        AuthError::MalformedHeader("Authorization header is empty".into())
    })?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader(
            "Authorization header must start with \"Bearer\"".into(),
        ));
    }

    let token = parts.next().ok_or_else(|| {
        AuthError::MalformedHeader("Authorization header must contain a bearer token".into())
    })?;
    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader(
            "Authorization header must be of the form \"Bearer <token>\"".into(),
        ));
    }
    Ok(token)
}

/// Check that the decoded claims grant the required permission.
///
/// A token without a `permissions` claim is rejected outright (the tenant
/// has RBAC misconfigured); a token whose permissions lack the required
/// entry is forbidden.
pub fn check_permission(claims: &Claims, required: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::MissingPermissions)?;
    if permissions.iter().any(|p| p == required) {
        Ok(())
    } else {
        warn!(required, subject = %claims.sub, "permission denied");
        Err(AuthError::Forbidden(required.to_string()))
    }
}

/// Seam between the HTTP layer and the identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw token string and return its claims.
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Production verifier: validates RS256 tokens against the tenant's JWKS,
/// enforcing signature, expiry, audience, and issuer.
pub struct Auth0Verifier {
    jwks: JwksCache,
    audience: String,
    issuer: String,
}

impl Auth0Verifier {
    /// Default time-to-live for cached signing keys.
    pub const JWKS_TTL: Duration = Duration::from_secs(3600);

    pub fn new(jwks_url: String, audience: String, issuer: String) -> Self {
        Self {
            jwks: JwksCache::new(jwks_url, Self::JWKS_TTL),
            audience,
            issuer,
        }
    }

    /// Build a verifier from the loaded environment configuration:
    /// the JWKS URL and issuer derive from the tenant prefix, the
    /// audience is taken as configured.
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(
            environment.auth0.jwks_url(),
            environment.auth0.audience.clone(),
            environment.auth0.issuer(),
        )
    }
}

#[async_trait]
impl TokenVerifier for Auth0Verifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        // The header is decoded unverified first, only to pick the key.
        let header = decode_header(token)
            .map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidHeader("token header has no kid".into()))?;

        let keys = self.jwks.get().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidHeader(format!("no signing key for kid {kid}")))?;

        if jwk.kty != "RSA" {
            return Err(AuthError::InvalidHeader(format!(
                "unsupported key type: {}",
                jwk.kty
            )));
        }
        let n = jwk
            .n
            .as_deref()
            .ok_or_else(|| AuthError::InvalidHeader("RSA key missing modulus".into()))?;
        let e = jwk
            .e
            .as_deref()
            .ok_or_else(|| AuthError::InvalidHeader("RSA key missing exponent".into()))?;
        let key = DecodingKey::from_rsa_components(n, e)
            .map_err(|e| AuthError::InvalidHeader(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                    AuthError::InvalidClaims(e.to_string())
                }
                _ => AuthError::InvalidHeader(e.to_string()),
            }
        })?;

        debug!(subject = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}
