//! Overtime record business logic - Submitting, editing, and listing the
//! hours employees credit against holiday budgets.
//!
//! Creation goes through the quota ledger: requests beyond the remaining
//! budget are capped, and a holiday stops accepting new submissions once
//! deactivated. Edits swap the shift option in place and are rejected when
//! the post-edit total would overshoot the budget.

use crate::{
    core::{catalog, quota},
    entities::{Holiday, OvertimeRecord, overtime_record},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::warn;

/// Creates an overtime record for a chosen shift option.
///
/// The holiday must exist and still be active; the credited hours are the
/// option's hours capped at the remaining budget. The holiday name and date
/// are snapshotted onto the record, and the option's catalog window is
/// stored as the worked times.
///
/// # Errors
/// `Validation` for unknown options or inactive holidays, `NotFound` for a
/// missing holiday, `QuotaExceeded` when no budget remains.
pub async fn create_record(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
    option_id: &str,
) -> Result<overtime_record::Model> {
    let option = catalog::find(option_id).ok_or_else(|| Error::Validation {
        message: format!("Unknown shift option: {option_id}"),
    })?;

    insert_validated(db, user_id, holiday_id, option, option.start, option.end).await
}

/// Classifies a clocked window and creates the record in one step.
///
/// Unlike [`create_record`], the actually worked times are stored instead of
/// the option's catalog window.
pub async fn create_record_from_window(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
    start_time: &str,
    end_time: &str,
) -> Result<overtime_record::Model> {
    let option = catalog::classify(start_time, end_time)?;
    insert_validated(db, user_id, holiday_id, option, start_time, end_time).await
}

/// Shared create path: holiday gate, quota cap, snapshot, insert.
async fn insert_validated(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
    option: &catalog::ShiftOption,
    start_time: &str,
    end_time: &str,
) -> Result<overtime_record::Model> {
    let holiday = Holiday::find_by_id(holiday_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Holiday",
            id: holiday_id.to_string(),
        })?;

    if !holiday.active {
        return Err(Error::Validation {
            message: format!("Holiday '{}' is not accepting new submissions", holiday.name),
        });
    }

    let stats = quota::user_holiday_stats(db, user_id, holiday_id).await?;
    let granted = quota::grantable_hours(stats, option.hours)?;
    if granted < option.hours {
        warn!(
            user_id,
            holiday_id,
            requested = option.hours,
            granted,
            "overtime request capped at remaining budget"
        );
    }

    let record = overtime_record::ActiveModel {
        user_id: Set(user_id.to_string()),
        holiday_id: Set(holiday_id),
        holiday_name: Set(holiday.name),
        date: Set(holiday.date),
        option_id: Set(option.id.to_string()),
        option_label: Set(option.label.to_string()),
        hours: Set(granted),
        start_time: Set(Some(start_time.to_string())),
        end_time: Set(Some(end_time.to_string())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Swaps a record onto a different shift option.
///
/// Only the option fields and the credited hours change; the worked times
/// keep whatever was clocked originally. The edit must keep the user's
/// holiday total within budget.
pub async fn update_record(
    db: &DatabaseConnection,
    record_id: i64,
    new_option_id: &str,
) -> Result<overtime_record::Model> {
    let record = get_record_by_id(db, record_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Overtime record",
            id: record_id.to_string(),
        })?;

    let option = catalog::find(new_option_id).ok_or_else(|| Error::Validation {
        message: format!("Unknown shift option: {new_option_id}"),
    })?;

    let stats = quota::user_holiday_stats(db, &record.user_id, record.holiday_id).await?;
    quota::fits_after_edit(stats, record.hours, option.hours)?;

    let mut model: overtime_record::ActiveModel = record.into();
    model.option_id = Set(option.id.to_string());
    model.option_label = Set(option.label.to_string());
    model.hours = Set(option.hours);
    model.updated_at = Set(Some(chrono::Utc::now()));

    model.update(db).await.map_err(Into::into)
}

/// Deletes an overtime record, freeing its hours for the budget.
pub async fn delete_record(db: &DatabaseConnection, record_id: i64) -> Result<()> {
    let result = OvertimeRecord::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            what: "Overtime record",
            id: record_id.to_string(),
        });
    }
    Ok(())
}

/// Retrieves a specific overtime record by its unique ID.
pub async fn get_record_by_id(
    db: &DatabaseConnection,
    record_id: i64,
) -> Result<Option<overtime_record::Model>> {
    OvertimeRecord::find_by_id(record_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All of a user's overtime records, newest first.
pub async fn records_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<overtime_record::Model>> {
    OvertimeRecord::find()
        .filter(overtime_record::Column::UserId.eq(user_id))
        .order_by_desc(overtime_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// A user's overtime records for one holiday, newest first.
pub async fn records_for_user_and_holiday(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
) -> Result<Vec<overtime_record::Model>> {
    OvertimeRecord::find()
        .filter(overtime_record::Column::UserId.eq(user_id))
        .filter(overtime_record::Column::HolidayId.eq(holiday_id))
        .order_by_desc(overtime_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every overtime record in the system, newest first.
pub async fn all_records(db: &DatabaseConnection) -> Result<Vec<overtime_record::Model>> {
    OvertimeRecord::find()
        .order_by_desc(overtime_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The shift options a record could be edited to without overshooting its
/// holiday budget.
pub async fn available_options_for_edit(
    db: &DatabaseConnection,
    record_id: i64,
) -> Result<Vec<&'static catalog::ShiftOption>> {
    let record = get_record_by_id(db, record_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Overtime record",
            id: record_id.to_string(),
        })?;

    let stats = quota::user_holiday_stats(db, &record.user_id, record.holiday_id).await?;
    Ok(quota::options_within_budget(stats, record.hours))
}
