//! # barista-core
//!
//! Core types and error types for the Barista coffee-shop service.
//! This crate defines the shared vocabulary used by every other crate
//! in the workspace.

pub mod drink;
pub mod error;

pub use drink::{Drink, RecipePart};
pub use error::{BaristaError, Result};
