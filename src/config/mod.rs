/// Database configuration and connection management
pub mod database;

/// Sample application rows for first-run seeding
pub mod seed;

/// Application settings loaded from config.toml
pub mod settings;
