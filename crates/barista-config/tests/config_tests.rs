#[cfg(test)]
mod tests {
    use barista_config::EnvironmentLoader;
    use barista_config::schema::*;
    use std::io::Write;

    // ── Default profile tests ──────────────────────────────────

    #[test]
    fn test_development_profile_literals() {
        let env = Environment::development();
        assert!(!env.production);
        assert_eq!(env.api_server_url, "http://127.0.0.1:5000");
        assert_eq!(env.auth0.url, "fsnd-tyler.us");
        assert_eq!(env.auth0.audience, "http://127.0.0.1:5000");
        assert_eq!(env.auth0.client_id, "dTCaPa43kvXjpFivNkAmiVEOtJlkW40u");
        assert_eq!(env.auth0.callback_url, "http://127.0.0.1:8100");
    }

    #[test]
    fn test_production_profile_sets_flag_only() {
        let dev = Environment::development();
        let prod = Environment::production();
        assert!(prod.production);
        assert_eq!(prod.api_server_url, dev.api_server_url);
        assert_eq!(prod.auth0, dev.auth0);
    }

    #[test]
    fn test_default_matches_development() {
        assert_eq!(Environment::default(), Environment::development());
    }

    #[test]
    fn test_repeated_construction_is_identical() {
        // Side-effect-free: building the environment twice yields
        // structurally identical values.
        assert_eq!(Environment::development(), Environment::development());
    }

    // ── Derived addresses ──────────────────────────────────────

    #[test]
    fn test_tenant_domain_and_derived_urls() {
        let auth0 = Auth0Config::default();
        assert_eq!(auth0.tenant_domain(), "fsnd-tyler.us.auth0.com");
        assert_eq!(auth0.issuer(), "https://fsnd-tyler.us.auth0.com/");
        assert_eq!(
            auth0.jwks_url(),
            "https://fsnd-tyler.us.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_authorize_url_carries_all_parameters() {
        let auth0 = Auth0Config::default();
        let url = auth0.authorize_url();
        assert!(url.starts_with("https://fsnd-tyler.us.auth0.com/authorize?"));
        assert!(url.contains("audience=http://127.0.0.1:5000"));
        assert!(url.contains("client_id=dTCaPa43kvXjpFivNkAmiVEOtJlkW40u"));
        assert!(url.contains("redirect_uri=http://127.0.0.1:8100"));
        assert!(url.contains("response_type=token"));
    }

    #[test]
    fn test_bind_addr_from_api_server_url() {
        let env = Environment::development();
        assert_eq!(env.bind_addr().unwrap(), "127.0.0.1:5000");
    }

    // ── Validation ─────────────────────────────────────────────

    #[test]
    fn test_default_environment_validates_clean() {
        let warnings = Environment::development().validate().unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_empty_client_id_is_an_error() {
        let mut env = Environment::development();
        env.auth0.client_id.clear();
        let err = env.validate().unwrap_err();
        assert!(err.contains("auth0.client_id"));
    }

    #[test]
    fn test_scheme_in_tenant_prefix_is_an_error() {
        let mut env = Environment::development();
        env.auth0.url = "https://fsnd-tyler.us".into();
        let err = env.validate().unwrap_err();
        assert!(err.contains("auth0.url"));
    }

    #[test]
    fn test_invalid_api_url_is_an_error() {
        let mut env = Environment::development();
        env.api_server_url = "not a url".into();
        assert!(env.validate().is_err());
    }

    #[test]
    fn test_audience_mismatch_is_a_warning_not_error() {
        let mut env = Environment::development();
        env.auth0.audience = "http://api.example.com".into();
        let warnings = env.validate().unwrap();
        assert!(
            warnings
                .iter()
                .any(|w| w.field == "auth0.audience"
                    && w.severity == WarningSeverity::Warning)
        );
    }

    // ── TOML roundtrip tests ───────────────────────────────────

    #[test]
    fn test_environment_toml_roundtrip() {
        let env = Environment::development();
        let toml_str = toml::to_string_pretty(&env).unwrap();
        let restored: Environment = toml::from_str(&toml_str).unwrap();
        assert_eq!(restored, env);
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let toml_str = r#"
production = true

[auth0]
url = "my-shop.eu"
"#;
        let env: Environment = toml::from_str(toml_str).unwrap();
        assert!(env.production);
        assert_eq!(env.auth0.url, "my-shop.eu");
        // Defaults should fill in
        assert_eq!(env.api_server_url, "http://127.0.0.1:5000");
        assert_eq!(env.auth0.client_id, "dTCaPa43kvXjpFivNkAmiVEOtJlkW40u");
    }

    // ── JSON roundtrip ─────────────────────────────────────────

    #[test]
    fn test_environment_json_roundtrip() {
        let env = Environment::development();
        let json = serde_json::to_string(&env).unwrap();
        let restored: Environment = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, env);
    }

    #[test]
    fn test_environment_has_exactly_six_fields() {
        let value = serde_json::to_value(Environment::development()).unwrap();
        let mut top: Vec<&str> =
            value.as_object().unwrap().keys().map(String::as_str).collect();
        top.sort_unstable();
        assert_eq!(top, ["api_server_url", "auth0", "production"]);
        let mut auth0: Vec<&str> = value["auth0"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        auth0.sort_unstable();
        assert_eq!(auth0, ["audience", "callback_url", "client_id", "url"]);
    }

    // ── EnvironmentLoader tests ────────────────────────────────

    #[test]
    fn test_loader_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("barista.toml");
        let mut f = std::fs::File::create(&config_path).unwrap();
        writeln!(
            f,
            r#"
production = false
api_server_url = "http://127.0.0.1:5000"

[auth0]
url = "fsnd-tyler.us"
audience = "http://127.0.0.1:5000"
client_id = "dTCaPa43kvXjpFivNkAmiVEOtJlkW40u"
callback_url = "http://127.0.0.1:8100"
"#
        )
        .unwrap();

        let env = EnvironmentLoader::load(Some(config_path.as_path()), None).unwrap();
        assert_eq!(env.auth0.client_id, "dTCaPa43kvXjpFivNkAmiVEOtJlkW40u");
        assert_eq!(env.api_server_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_loader_twice_yields_identical_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("barista.toml");
        std::fs::write(&config_path, "production = true\n").unwrap();

        let a = EnvironmentLoader::load(Some(config_path.as_path()), None).unwrap();
        let b = EnvironmentLoader::load(Some(config_path.as_path()), None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_loader_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("barista.toml");
        std::fs::write(
            &config_path,
            r#"
[auth0]
url = "https://with-scheme.example"
"#,
        )
        .unwrap();

        assert!(EnvironmentLoader::load(Some(config_path.as_path()), None).is_err());
    }

    #[test]
    fn test_profile_rewrites_file_name() {
        let base = std::path::Path::new("/etc/barista/barista.toml");
        let resolved = EnvironmentLoader::resolve_path(Some(base), Some("production"));
        assert_eq!(
            resolved,
            std::path::PathBuf::from("/etc/barista/barista.production.toml")
        );
    }

    #[test]
    fn test_missing_production_profile_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("barista.toml");
        // barista.production.toml does not exist in this directory
        let env =
            EnvironmentLoader::load(Some(config_path.as_path()), Some("production")).unwrap();
        assert!(env.production);
    }
}
