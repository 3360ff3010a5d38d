//! # barista-config
//!
//! Environment configuration for the Barista service. Reads from
//! `barista.toml` (or a profile variant such as `barista.production.toml`),
//! with environment-variable overrides applied at load time.
//!
//! The loaded [`Environment`] is a snapshot: consumers read fields directly
//! and nothing mutates it after load. Changing environments means loading a
//! different profile file, not editing the object at runtime.

pub mod loader;
pub mod schema;

pub use loader::EnvironmentLoader;
pub use schema::{Auth0Config, ConfigWarning, Environment, WarningSeverity};
