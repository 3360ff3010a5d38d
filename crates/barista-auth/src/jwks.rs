use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::AuthError;

/// JSON Web Key Set published by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// A single key from the set. Only RSA keys are used; the modulus and
/// exponent stay in their base64url form for `DecodingKey` construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default, rename = "use")]
    pub usage: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

impl JwkSet {
    /// Find the key matching a token header's `kid`.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// Fetches and caches the tenant JWKS. Keys rotate rarely; a fetched set
/// is reused until the TTL elapses, then refreshed on the next lookup.
pub struct JwksCache {
    url: String,
    ttl: Duration,
    client: reqwest::Client,
    cached: RwLock<Option<(Instant, Arc<JwkSet>)>>,
}

impl JwksCache {
    pub fn new(url: String, ttl: Duration) -> Self {
        Self {
            url,
            ttl,
            client: reqwest::Client::new(),
            cached: RwLock::new(None),
        }
    }

    /// JWKS endpoint this cache is bound to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the key set, fetching from the identity provider when the
    /// cached copy is missing or stale.
    pub async fn get(&self) -> Result<Arc<JwkSet>, AuthError> {
        if let Some((fetched_at, ref keys)) = *self.cached.read() {
            if fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(keys));
            }
        }
        self.refresh().await
    }

    /// Force a fetch, replacing any cached copy.
    pub async fn refresh(&self) -> Result<Arc<JwkSet>, AuthError> {
        debug!(url = %self.url, "fetching JWKS");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AuthError::Jwks(e.to_string()))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "JWKS endpoint returned an error");
            return Err(AuthError::Jwks(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::Jwks(format!("invalid JWKS body: {e}")))?;

        if jwks.keys.is_empty() {
            return Err(AuthError::Jwks("JWKS contains no keys".into()));
        }

        debug!(count = jwks.keys.len(), "fetched JWKS");
        let keys = Arc::new(jwks);
        *self.cached.write() = Some((Instant::now(), Arc::clone(&keys)));
        Ok(keys)
    }

    /// Drop the cached copy (used when key rotation is suspected).
    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }
}
