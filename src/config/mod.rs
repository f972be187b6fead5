/// Database configuration and connection management
pub mod database;

/// Environment variables (tokens)
pub mod env;

/// Material seed loading from config.toml
pub mod materials;
