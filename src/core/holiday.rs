//! Holiday business logic - Admin management of the holidays employees
//! credit overtime against.
//!
//! Deactivating a holiday stops new overtime submissions without touching
//! existing records or stats.

use crate::{
    entities::{Holiday, holiday},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Optional fields for a partial holiday update.
#[derive(Clone, Debug, Default)]
pub struct HolidayUpdate {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub active: Option<bool>,
    pub deadline: Option<NaiveDate>,
    pub max_hours: Option<i32>,
}

/// Creates a holiday with its overtime budget.
///
/// # Errors
/// `Validation` for a blank name or a non-positive budget.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    date: NaiveDate,
    active: bool,
    deadline: NaiveDate,
    max_hours: i32,
) -> Result<holiday::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Holiday name cannot be empty".to_string(),
        });
    }
    if max_hours <= 0 {
        return Err(Error::Validation {
            message: format!("Holiday budget must be positive, got {max_hours}"),
        });
    }

    let row = holiday::ActiveModel {
        name: Set(name.to_string()),
        date: Set(date),
        active: Set(active),
        deadline: Set(deadline),
        max_hours: Set(max_hours),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a holiday, refreshing `updated_at`.
///
/// Unset fields keep their stored values; set fields pass the same
/// validations as creation.
pub async fn update(
    db: &DatabaseConnection,
    holiday_id: i64,
    changes: HolidayUpdate,
) -> Result<holiday::Model> {
    let row = Holiday::find_by_id(holiday_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Holiday",
            id: holiday_id.to_string(),
        })?;

    if let Some(name) = &changes.name
        && name.trim().is_empty()
    {
        return Err(Error::Validation {
            message: "Holiday name cannot be empty".to_string(),
        });
    }
    if let Some(max_hours) = changes.max_hours
        && max_hours <= 0
    {
        return Err(Error::Validation {
            message: format!("Holiday budget must be positive, got {max_hours}"),
        });
    }

    let mut model: holiday::ActiveModel = row.into();
    if let Some(name) = changes.name {
        model.name = Set(name.trim().to_string());
    }
    if let Some(date) = changes.date {
        model.date = Set(date);
    }
    if let Some(flag) = changes.active {
        model.active = Set(flag);
    }
    if let Some(deadline) = changes.deadline {
        model.deadline = Set(deadline);
    }
    if let Some(max_hours) = changes.max_hours {
        model.max_hours = Set(max_hours);
    }
    model.updated_at = Set(Some(chrono::Utc::now()));

    model.update(db).await.map_err(Into::into)
}

/// Flips a holiday between accepting and refusing new submissions.
pub async fn toggle_active(db: &DatabaseConnection, holiday_id: i64) -> Result<holiday::Model> {
    let row = Holiday::find_by_id(holiday_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Holiday",
            id: holiday_id.to_string(),
        })?;

    let flipped = !row.active;
    let mut model: holiday::ActiveModel = row.into();
    model.active = Set(flipped);
    model.updated_at = Set(Some(chrono::Utc::now()));

    model.update(db).await.map_err(Into::into)
}

/// Finds a holiday by id.
pub async fn get(db: &DatabaseConnection, holiday_id: i64) -> Result<Option<holiday::Model>> {
    Holiday::find_by_id(holiday_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Every holiday, earliest date first.
pub async fn all(db: &DatabaseConnection) -> Result<Vec<holiday::Model>> {
    Holiday::find()
        .order_by_asc(holiday::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Holidays still accepting submissions, earliest date first.
pub async fn active(db: &DatabaseConnection) -> Result<Vec<holiday::Model>> {
    Holiday::find()
        .filter(holiday::Column::Active.eq(true))
        .order_by_asc(holiday::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}
