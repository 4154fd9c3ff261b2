//! Core business logic - framework-agnostic storefront operations.
//!
//! Everything here works on a `SeaORM` connection and the typed records in
//! [`crate::models`]; the HTTP layer in [`crate::api`] only translates requests
//! and errors.

pub mod catalog;
pub mod data;
pub mod health;
pub mod history;
pub mod newsletter;
pub mod seed;
pub mod settings;
pub mod theme;
