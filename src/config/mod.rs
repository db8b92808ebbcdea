/// Database configuration, connection, and schema management
pub mod database;

/// Holiday seed data loading from config.toml
pub mod seeds;
