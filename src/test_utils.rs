//! Shared test utilities for `HourBank`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{catalog::SHIFT_OPTIONS, holiday, user},
    entities::{self, UserRole},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test employee account derived from an email address.
///
/// # Arguments
/// * `db` - Database connection
/// * `email` - Email, whose local part becomes the first name
///
/// # Defaults
/// * `last_name`: "Silva"
/// * `role`: `UserRole::Employee`
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    let first_name = first_name_from_email(email);
    user::register(db, &first_name, "Silva", email, UserRole::Employee).await
}

/// Creates a test admin account derived from an email address.
pub async fn create_test_admin(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    let first_name = first_name_from_email(email);
    user::register(db, &first_name, "Silva", email, UserRole::Admin).await
}

fn first_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Test".to_string(),
    }
}

/// Creates a test holiday with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Holiday name
///
/// # Defaults
/// * `date`: today
/// * `active`: true
/// * `deadline`: sixty days out
/// * `max_hours`: 2
pub async fn create_test_holiday(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::holiday::Model> {
    create_custom_holiday(db, name, true, 2).await
}

/// Creates a test holiday with custom parameters.
/// Use this when you need an inactive holiday or a different budget.
pub async fn create_custom_holiday(
    db: &DatabaseConnection,
    name: &str,
    active: bool,
    max_hours: i32,
) -> Result<entities::holiday::Model> {
    let date = chrono::Utc::now().date_naive();
    holiday::create(db, name, date, active, date + chrono::Duration::days(60), max_hours).await
}

/// Inserts an overtime record directly, bypassing quota validation.
/// Use this to put the books in a specific state before the test runs.
///
/// The shift option fields are filled from the first catalog entry worth
/// the requested hours.
pub async fn create_test_overtime_record(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
    hours: i32,
) -> Result<entities::overtime_record::Model> {
    let option = SHIFT_OPTIONS.iter().find(|option| option.hours == hours);
    let (option_id, option_label) = match option {
        Some(option) => (option.id.to_string(), option.label.to_string()),
        None => (format!("custom_{hours}h"), format!("{hours}h extras")),
    };

    let record = entities::overtime_record::ActiveModel {
        user_id: Set(user_id.to_string()),
        holiday_id: Set(holiday_id),
        holiday_name: Set("Test Holiday".to_string()),
        date: Set(chrono::Utc::now().date_naive()),
        option_id: Set(option_id),
        option_label: Set(option_label),
        hours: Set(hours),
        start_time: Set(None),
        end_time: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with one employee and one holiday.
/// Returns (db, user, holiday) for common test scenarios.
pub async fn setup_with_user_and_holiday() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::holiday::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "employee@example.com").await?;
    let holiday = create_test_holiday(&db, "Test Holiday").await?;
    Ok((db, user, holiday))
}
