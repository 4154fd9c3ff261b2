/// Process configuration read from the environment
pub mod app;

/// Database connection and table creation
pub mod database;

/// Seed dataset loading from TOML
pub mod seed;

pub use app::AppConfig;
