//! Absence request business logic - Creation, proof upload, approval, and
//! expiry of employee absence requests.
//!
//! Requests start as `Pending` regardless of reason. Attaching a proof
//! document moves them to `Completed`; an admin approval moves them to
//! `Approved` from any state. There is no rejection transition. A request
//! expires 30 days after its first absence date and then stops counting as
//! active, but stays queryable.

use crate::{
    entities::{
        AbsenceReason, AbsenceRecord, AbsenceStatus, DateList, DateRange, absence_record,
    },
    errors::{Error, Result},
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Upper bound enforced by the upload boundary on proof documents.
pub const MAX_PROOF_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for proof documents.
pub const ALLOWED_PROOF_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "application/pdf"];

/// How long a request stays active past its first absence date.
const EXPIRY_DAYS: i64 = 30;

/// Creates an absence request.
///
/// The `Other` reason requires a non-blank custom reason; at least one date
/// must be requested and none may lie before today (today itself is fine).
/// Dates are stored ascending and deduplicated, and the expiry clock starts
/// at the earliest one. The rules are checked in order and the first
/// violation is returned.
///
/// # Errors
/// `Validation` for any violated rule.
pub async fn create(
    db: &DatabaseConnection,
    user_id: &str,
    reason: AbsenceReason,
    custom_reason: Option<String>,
    dates: Vec<NaiveDate>,
    date_range: Option<DateRange>,
) -> Result<absence_record::Model> {
    let custom_reason = custom_reason.filter(|text| !text.trim().is_empty());
    if reason == AbsenceReason::Other && custom_reason.is_none() {
        return Err(Error::Validation {
            message: "A custom reason is required when the reason is 'other'".to_string(),
        });
    }

    if dates.is_empty() {
        return Err(Error::Validation {
            message: "At least one absence date must be selected".to_string(),
        });
    }

    let today = Utc::now().date_naive();
    if let Some(past) = dates.iter().find(|date| **date < today) {
        return Err(Error::Validation {
            message: format!("Absence dates cannot be in the past: {past}"),
        });
    }

    let mut dates = dates;
    dates.sort_unstable();
    dates.dedup();

    // Sorted and non-empty, so the first entry is the earliest date
    let expires_at = dates[0].and_time(NaiveTime::MIN).and_utc() + Duration::days(EXPIRY_DAYS);

    let record = absence_record::ActiveModel {
        user_id: Set(user_id.to_string()),
        reason: Set(reason),
        custom_reason: Set(custom_reason),
        dates: Set(DateList(dates)),
        date_range: Set(date_range),
        status: Set(AbsenceStatus::Pending),
        proof_document: Set(None),
        created_at: Set(Utc::now()),
        expires_at: Set(expires_at),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Records an uploaded proof document and moves the request to `Completed`.
///
/// Only the MIME type is validated here; the upload boundary enforces
/// [`MAX_PROOF_BYTES`] before the blob reference ever reaches this call.
/// The transition is unconditional, approval included.
pub async fn attach_proof(
    db: &DatabaseConnection,
    record_id: i64,
    blob_ref: String,
    mime_type: &str,
) -> Result<absence_record::Model> {
    if !ALLOWED_PROOF_TYPES.contains(&mime_type) {
        return Err(Error::UnsupportedProofType {
            mime: mime_type.to_string(),
        });
    }

    let record = AbsenceRecord::find_by_id(record_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Absence record",
            id: record_id.to_string(),
        })?;

    let mut model: absence_record::ActiveModel = record.into();
    model.proof_document = Set(Some(blob_ref));
    model.status = Set(AbsenceStatus::Completed);
    model.updated_at = Set(Some(Utc::now()));

    model.update(db).await.map_err(Into::into)
}

/// Marks a request as `Approved`, from any prior state.
pub async fn approve(db: &DatabaseConnection, record_id: i64) -> Result<absence_record::Model> {
    let record = AbsenceRecord::find_by_id(record_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: "Absence record",
            id: record_id.to_string(),
        })?;

    let mut model: absence_record::ActiveModel = record.into();
    model.status = Set(AbsenceStatus::Approved);
    model.updated_at = Set(Some(Utc::now()));

    model.update(db).await.map_err(Into::into)
}

/// Deletes an absence request.
pub async fn delete(db: &DatabaseConnection, record_id: i64) -> Result<()> {
    let result = AbsenceRecord::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            what: "Absence record",
            id: record_id.to_string(),
        });
    }
    Ok(())
}

/// Whether a request still counts against upcoming dates.
#[must_use]
pub fn is_active(record: &absence_record::Model) -> bool {
    Utc::now() < record.expires_at
}

/// All of a user's absence requests, newest first.
pub async fn records_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<absence_record::Model>> {
    AbsenceRecord::find()
        .filter(absence_record::Column::UserId.eq(user_id))
        .order_by_desc(absence_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// A user's unexpired requests, newest first.
pub async fn active_records_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<absence_record::Model>> {
    AbsenceRecord::find()
        .filter(absence_record::Column::UserId.eq(user_id))
        .filter(absence_record::Column::ExpiresAt.gt(Utc::now()))
        .order_by_desc(absence_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every absence request in the system, newest first.
pub async fn all_records(db: &DatabaseConnection) -> Result<Vec<absence_record::Model>> {
    AbsenceRecord::find()
        .order_by_desc(absence_record::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
