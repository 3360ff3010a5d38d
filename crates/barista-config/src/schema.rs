use serde::{Deserialize, Serialize};

/// Root environment configuration — maps to `barista.toml`.
///
/// Exactly six fields: the build-mode flag, the API base address, and the
/// four identity-provider parameters under `[auth0]`. The struct is a plain
/// value; cloning it hands out an independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Whether this is a production build.
    pub production: bool,
    /// Base address of the backend API this deployment serves.
    pub api_server_url: String,
    /// Identity-provider (Auth0) parameters.
    pub auth0: Auth0Config,
}

/// Auth0 integration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Auth0Config {
    /// Tenant domain prefix, e.g. "fsnd-tyler.us". No scheme, no
    /// ".auth0.com" suffix — that suffix is appended by [`Auth0Config::tenant_domain`].
    pub url: String,
    /// Identifier of the protected resource access tokens are scoped to.
    /// Conventionally equal to `api_server_url` in this deployment profile.
    pub audience: String,
    /// Public identifier of the registered client application.
    pub client_id: String,
    /// Address the identity provider redirects back to after login.
    pub callback_url: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self::development()
    }
}

impl Default for Auth0Config {
    fn default() -> Self {
        Self {
            url: "fsnd-tyler.us".into(),
            audience: "http://127.0.0.1:5000".into(),
            client_id: "dTCaPa43kvXjpFivNkAmiVEOtJlkW40u".into(),
            callback_url: "http://127.0.0.1:8100".into(),
        }
    }
}

impl Environment {
    /// Development profile — local API server and the local client callback.
    pub fn development() -> Self {
        Self {
            production: false,
            api_server_url: "http://127.0.0.1:5000".into(),
            auth0: Auth0Config::default(),
        }
    }

    /// Production profile. Identical identity-provider parameters with the
    /// production flag set; deployments override the addresses via their
    /// `barista.production.toml`.
    pub fn production() -> Self {
        Self {
            production: true,
            ..Self::development()
        }
    }

    /// Socket address the API server binds to, derived from
    /// `api_server_url`. The configuration carries one address for both
    /// sides of the contract: clients dial it, the server listens on it.
    pub fn bind_addr(&self) -> barista_core::Result<String> {
        let parsed = url::Url::parse(&self.api_server_url).map_err(|e| {
            barista_core::BaristaError::Config(format!(
                "api_server_url is not a valid URL: {e}"
            ))
        })?;
        let host = parsed.host_str().ok_or_else(|| {
            barista_core::BaristaError::Config("api_server_url has no host".into())
        })?;
        let port = parsed.port_or_known_default().ok_or_else(|| {
            barista_core::BaristaError::Config("api_server_url has no port".into())
        })?;
        Ok(format!("{host}:{port}"))
    }
}

impl Auth0Config {
    /// Full tenant domain, e.g. "fsnd-tyler.us.auth0.com".
    pub fn tenant_domain(&self) -> String {
        format!("{}.auth0.com", self.url)
    }

    /// Issuer string as it appears in tokens minted by this tenant.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.tenant_domain())
    }

    /// JWKS endpoint publishing the tenant's token-signing keys.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.tenant_domain())
    }

    /// Login URL a client sends the user's browser to. The identity
    /// provider redirects back to `callback_url` with a token for
    /// `audience` on success.
    pub fn authorize_url(&self) -> String {
        format!(
            "https://{}/authorize?audience={}&response_type=token&client_id={}&redirect_uri={}",
            self.tenant_domain(),
            self.audience,
            self.client_id,
            self.callback_url,
        )
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
            WarningSeverity::Info => "💡",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl Environment {
    /// Validate the environment and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Required fields ───
        let required = [
            ("api_server_url", &self.api_server_url),
            ("auth0.url", &self.auth0.url),
            ("auth0.audience", &self.auth0.audience),
            ("auth0.client_id", &self.auth0.client_id),
            ("auth0.callback_url", &self.auth0.callback_url),
        ];
        for (field, value) in required {
            if value.is_empty() {
                warnings.push(ConfigWarning {
                    field: field.into(),
                    message: "value is empty".into(),
                    severity: WarningSeverity::Error,
                    hint: Some("All six environment fields must be set".into()),
                });
            }
        }

        // ── URL fields must parse ───
        for (field, value) in [
            ("api_server_url", &self.api_server_url),
            ("auth0.audience", &self.auth0.audience),
            ("auth0.callback_url", &self.auth0.callback_url),
        ] {
            if !value.is_empty() && url::Url::parse(value).is_err() {
                warnings.push(ConfigWarning {
                    field: field.into(),
                    message: format!("'{}' is not a valid URL", value),
                    severity: WarningSeverity::Error,
                    hint: Some("Use an absolute URL, e.g. 'http://127.0.0.1:5000'".into()),
                });
            }
        }

        // ── Tenant prefix is domain-only ───
        if self.auth0.url.contains("://") {
            warnings.push(ConfigWarning {
                field: "auth0.url".into(),
                message: format!(
                    "tenant prefix '{}' must not carry a scheme",
                    self.auth0.url
                ),
                severity: WarningSeverity::Error,
                hint: Some("Use the bare domain prefix, e.g. 'fsnd-tyler.us'".into()),
            });
        } else if self.auth0.url.ends_with(".auth0.com") {
            warnings.push(ConfigWarning {
                field: "auth0.url".into(),
                message: "tenant prefix already ends in '.auth0.com'".into(),
                severity: WarningSeverity::Warning,
                hint: Some("The suffix is appended automatically; drop it from the prefix".into()),
            });
        }

        // ── Deployment convention: audience matches the API address ───
        if !self.api_server_url.is_empty()
            && !self.auth0.audience.is_empty()
            && self.api_server_url != self.auth0.audience
        {
            warnings.push(ConfigWarning {
                field: "auth0.audience".into(),
                message: format!(
                    "audience '{}' differs from api_server_url '{}'",
                    self.auth0.audience, self.api_server_url
                ),
                severity: WarningSeverity::Warning,
                hint: Some(
                    "Tokens are validated against the audience; in this deployment \
                     profile it conventionally matches the API address"
                        .into(),
                ),
            });
        }

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!(
                "Environment configuration errors:\n  • {}",
                errors.join("\n  • ")
            ));
        }

        Ok(warnings)
    }
}
