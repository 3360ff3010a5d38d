use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::Environment;

/// Loads the environment configuration. The result is a plain snapshot:
/// there is no reload or watch mechanism — swapping environments means
/// loading a different profile file at startup.
pub struct EnvironmentLoader;

impl EnvironmentLoader {
    /// Resolve the config path: explicit path > BARISTA_CONFIG env >
    /// ~/.barista/barista.toml. A profile name rewrites the file name to
    /// `barista.<profile>.toml` in the same directory.
    pub fn resolve_path(explicit: Option<&Path>, profile: Option<&str>) -> PathBuf {
        let base = if let Some(p) = explicit {
            p.to_path_buf()
        } else if let Ok(p) = std::env::var("BARISTA_CONFIG") {
            PathBuf::from(p)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".barista")
                .join("barista.toml")
        };

        match profile {
            Some(profile) => base.with_file_name(format!("barista.{profile}.toml")),
            None => base,
        }
    }

    /// Load the environment from disk, falling back to the built-in
    /// profile when no file exists ("production" selects
    /// [`Environment::production`], anything else the development profile).
    pub fn load(
        path: Option<&Path>,
        profile: Option<&str>,
    ) -> barista_core::Result<Environment> {
        let config_path = Self::resolve_path(path, profile);
        let environment = if config_path.exists() {
            info!(?config_path, "loading environment configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Environment>(&raw).map_err(|e| {
                barista_core::BaristaError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using built-in profile");
            match profile {
                Some("production") => Environment::production(),
                _ => Environment::development(),
            }
        };

        let environment = Self::apply_env_overrides(environment);

        // Validate — log warnings, fail on errors
        match environment.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(barista_core::BaristaError::Config(e));
            }
        }

        Ok(environment)
    }

    /// Apply env var overrides. These exist for packaging, not for runtime
    /// reconfiguration: they are read once at load and never again.
    fn apply_env_overrides(mut environment: Environment) -> Environment {
        if let Ok(v) = std::env::var("BARISTA_API_SERVER_URL") {
            environment.api_server_url = v;
        }
        if let Ok(v) = std::env::var("BARISTA_AUTH0_URL") {
            environment.auth0.url = v;
        }
        if let Ok(v) = std::env::var("BARISTA_AUTH0_AUDIENCE") {
            environment.auth0.audience = v;
        }
        if let Ok(v) = std::env::var("BARISTA_AUTH0_CLIENT_ID") {
            environment.auth0.client_id = v;
        }
        if let Ok(v) = std::env::var("BARISTA_AUTH0_CALLBACK_URL") {
            environment.auth0.callback_url = v;
        }
        environment
    }
}
