//! Holiday seed data loading from config.toml
//!
//! On a fresh database the holidays listed in config.toml are inserted so
//! the system starts with a usable calendar. Seeding is skipped entirely
//! once any holiday row exists, so re-running the bootstrap never
//! duplicates or overwrites admin edits.

use crate::core::holiday;
use crate::entities::Holiday;
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of holidays to seed on an empty database
    pub holidays: Vec<HolidayConfig>,
}

/// Seed data for a single holiday
#[derive(Debug, Deserialize, Clone)]
pub struct HolidayConfig {
    /// Display name of the holiday
    pub name: String,
    /// Calendar date, "YYYY-MM-DD"
    pub date: NaiveDate,
    /// Last date on which hours may be worked off, "YYYY-MM-DD"
    pub deadline: NaiveDate,
    /// Per-employee overtime hour budget
    pub max_hours: i32,
    /// Whether the holiday starts out accepting submissions
    pub active: bool,
}

/// Loads holiday seed configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads holiday seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Inserts the configured holidays when the table is empty.
///
/// Returns how many were inserted; zero means the table already had rows
/// and nothing was touched.
pub async fn seed_holidays(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let existing = Holiday::find().count(db).await?;
    if existing > 0 {
        return Ok(0);
    }

    for seed in &config.holidays {
        holiday::create(db, &seed.name, seed.date, seed.active, seed.deadline, seed.max_hours)
            .await?;
    }

    info!(count = config.holidays.len(), "seeded holidays from config");
    Ok(config.holidays.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn sample_config() -> Config {
        let toml_str = r#"
            [[holidays]]
            name = "Carnaval"
            date = "2026-02-17"
            deadline = "2026-03-31"
            max_hours = 2
            active = true

            [[holidays]]
            name = "Natal"
            date = "2026-12-25"
            deadline = "2027-01-31"
            max_hours = 2
            active = false
        "#;
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_parse_holiday_config() {
        let config = sample_config();
        assert_eq!(config.holidays.len(), 2);
        assert_eq!(config.holidays[0].name, "Carnaval");
        assert_eq!(
            config.holidays[0].date,
            NaiveDate::parse_from_str("2026-02-17", "%Y-%m-%d").unwrap()
        );
        assert_eq!(config.holidays[0].max_hours, 2);
        assert!(config.holidays[0].active);
        assert!(!config.holidays[1].active);
    }

    #[tokio::test]
    async fn test_seed_holidays_fills_empty_table() -> Result<()> {
        let db = setup_test_db().await?;

        let inserted = seed_holidays(&db, &sample_config()).await?;
        assert_eq!(inserted, 2);

        let holidays = holiday::all(&db).await?;
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].name, "Carnaval");

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_holidays_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        seed_holidays(&db, &sample_config()).await?;
        let second_run = seed_holidays(&db, &sample_config()).await?;
        assert_eq!(second_run, 0);

        let holidays = holiday::all(&db).await?;
        assert_eq!(holidays.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_holidays_skips_non_empty_table() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_holiday(&db, "Existing").await?;

        let inserted = seed_holidays(&db, &sample_config()).await?;
        assert_eq!(inserted, 0);

        let holidays = holiday::all(&db).await?;
        assert_eq!(holidays.len(), 1);

        Ok(())
    }
}
