//! # barista-menu
//!
//! Persistent drink menu backed by SQLite. Recipes are stored as JSON in a
//! single `drinks` table; the store hands out [`Drink`] values and leaves
//! representation (short vs long) to the caller.

pub mod store;

pub use store::MenuStore;

pub use barista_core::{Drink, RecipePart};
