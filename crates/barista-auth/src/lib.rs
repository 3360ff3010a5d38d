//! # barista-auth
//!
//! Token verification for the Barista API. Extracts bearer tokens from the
//! `Authorization` header, fetches the tenant's JWKS, validates RS256
//! signatures and claims, and checks per-route permissions.
//!
//! The [`TokenVerifier`] trait is the seam between the HTTP layer and the
//! identity provider; [`mock::MockVerifier`] stands in for Auth0 in tests.

pub mod error;
pub mod jwks;
pub mod mock;
pub mod verifier;

pub use error::AuthError;
pub use jwks::{Jwk, JwkSet, JwksCache};
pub use verifier::{Auth0Verifier, Claims, TokenVerifier, check_permission, extract_bearer};
