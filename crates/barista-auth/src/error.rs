use thiserror::Error;

/// Authentication/authorization failure. Each variant carries a stable
/// machine-readable code and maps to an HTTP status; the wire body is
/// `{"code": ..., "description": ...}`.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("{0}")]
    MalformedHeader(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Incorrect claims. Please check the audience and issuer: {0}")]
    InvalidClaims(String),

    #[error("Unable to parse authentication token: {0}")]
    InvalidHeader(String),

    #[error("Unable to find permissions in token")]
    MissingPermissions,

    #[error("User does not have the required permission: {0}")]
    Forbidden(String),

    #[error("Failed to retrieve signing keys: {0}")]
    Jwks(String),
}

impl AuthError {
    /// Stable error code, as exposed on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "missing_auth_header",
            AuthError::MalformedHeader(_) => "invalid_auth_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::InvalidHeader(_) => "invalid_header",
            AuthError::MissingPermissions => "invalid_token",
            AuthError::Forbidden(_) => "forbidden",
            AuthError::Jwks(_) => "jwks_error",
        }
    }

    /// HTTP status this failure responds with.
    pub fn status(&self) -> u16 {
        match self {
            AuthError::Forbidden(_) => 403,
            AuthError::Jwks(_) => 500,
            _ => 401,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        assert_eq!(AuthError::MissingHeader.code(), "missing_auth_header");
        assert_eq!(AuthError::MissingHeader.status(), 401);
        assert_eq!(AuthError::TokenExpired.code(), "token_expired");
        assert_eq!(AuthError::Forbidden("post:drinks".into()).status(), 403);
        assert_eq!(AuthError::MissingPermissions.code(), "invalid_token");
        assert_eq!(AuthError::Jwks("timeout".into()).status(), 500);
    }
}
