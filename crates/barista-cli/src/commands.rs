use std::path::PathBuf;
use std::sync::Arc;

use barista_config::Environment;
use barista_menu::MenuStore;

/// Run the API server against the loaded environment.
pub(crate) async fn cmd_serve(
    environment: Environment,
    db: Option<PathBuf>,
) -> barista_core::Result<()> {
    println!("☕ Barista v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "   Profile: {}",
        if environment.production { "production" } else { "development" }
    );
    println!("   API:     {}", environment.api_server_url);
    println!("   Tenant:  {}", environment.auth0.tenant_domain());
    println!();

    let db_path = match db {
        Some(p) => p,
        None => {
            let dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".barista");
            std::fs::create_dir_all(&dir)?;
            dir.join("menu.db")
        }
    };
    let store = Arc::new(MenuStore::open(&db_path)?);

    barista_server::start_server(environment, store).await
}

/// Print the loaded environment as TOML.
pub(crate) fn cmd_config_show(environment: &Environment) -> barista_core::Result<()> {
    let rendered = toml::to_string_pretty(environment)
        .map_err(|e| barista_core::BaristaError::Config(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}

/// Re-run validation and print every warning. Load already failed on hard
/// errors, so this surfaces the soft ones.
pub(crate) fn cmd_config_validate(environment: &Environment) -> barista_core::Result<()> {
    match environment.validate() {
        Ok(warnings) if warnings.is_empty() => {
            println!("✅ environment configuration is valid");
        }
        Ok(warnings) => {
            println!("✅ environment configuration is valid, with warnings:");
            for w in &warnings {
                println!("{w}");
            }
        }
        Err(e) => {
            return Err(barista_core::BaristaError::Config(e));
        }
    }
    Ok(())
}
