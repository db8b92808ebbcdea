//! Time clock business logic - Raw clock-in/clock-out tracking for holiday
//! shifts.
//!
//! A user holds at most one open clock per holiday. Clocking out fixes the
//! overtime amount from the worked window; turning that into a credited
//! overtime record is a separate step through the overtime module.

use crate::{
    core::catalog,
    entities::{ClockStatus, Holiday, TimeClockRecord, time_clock_record},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Opens a clock record for a holiday shift.
///
/// # Errors
/// `InvalidTime` for a malformed start time, `NotFound` for a missing
/// holiday, `ClockAlreadyActive` when an open record already exists for the
/// (user, holiday) pair.
pub async fn clock_in(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
    date: NaiveDate,
    start_time: &str,
) -> Result<time_clock_record::Model> {
    catalog::parse_time(start_time)?;

    Holiday::find_by_id(holiday_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Holiday",
            id: holiday_id.to_string(),
        })?;

    if active_clock(db, user_id, holiday_id).await?.is_some() {
        return Err(Error::ClockAlreadyActive { holiday_id });
    }

    let record = time_clock_record::ActiveModel {
        user_id: Set(user_id.to_string()),
        holiday_id: Set(holiday_id),
        date: Set(date),
        start_time: Set(start_time.to_string()),
        end_time: Set(None),
        status: Set(ClockStatus::Active),
        overtime_hours: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Closes an open clock record and fixes its overtime amount.
///
/// The overtime hours are computed from the clocked window against the
/// standard day, minute-precise.
///
/// # Errors
/// `NotFound` for a missing record, `Validation` when it is already
/// completed, `InvalidTime` for a malformed end time.
pub async fn clock_out(
    db: &DatabaseConnection,
    record_id: i64,
    end_time: &str,
) -> Result<time_clock_record::Model> {
    let record = TimeClockRecord::find_by_id(record_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Time clock record",
            id: record_id.to_string(),
        })?;

    if record.status != ClockStatus::Active {
        return Err(Error::Validation {
            message: format!("Time clock record {record_id} is already completed"),
        });
    }

    let overtime_hours = catalog::window_hours(&record.start_time, end_time)?;

    let mut model: time_clock_record::ActiveModel = record.into();
    model.end_time = Set(Some(end_time.to_string()));
    model.status = Set(ClockStatus::Completed);
    model.overtime_hours = Set(overtime_hours);
    model.updated_at = Set(Some(chrono::Utc::now()));

    model.update(db).await.map_err(Into::into)
}

/// The open clock record for a (user, holiday) pair, if any.
pub async fn active_clock(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
) -> Result<Option<time_clock_record::Model>> {
    TimeClockRecord::find()
        .filter(time_clock_record::Column::UserId.eq(user_id))
        .filter(time_clock_record::Column::HolidayId.eq(holiday_id))
        .filter(time_clock_record::Column::Status.eq(ClockStatus::Active))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All of a user's clock records, newest first.
pub async fn records_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<time_clock_record::Model>> {
    TimeClockRecord::find()
        .filter(time_clock_record::Column::UserId.eq(user_id))
        .order_by_desc(time_clock_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
