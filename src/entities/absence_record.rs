//! Absence record entity - An employee request to be absent on specific dates.
//!
//! The selected dates are stored as a JSON array (ordered, deduplicated);
//! when the selection came from a range pick the original endpoints are kept
//! alongside in `date_range`. Requests expire 30 days after their first date.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Why the employee will be absent, stored as a lowercase string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum AbsenceReason {
    #[sea_orm(string_value = "medical")]
    Medical,
    #[sea_orm(string_value = "personal")]
    Personal,
    #[sea_orm(string_value = "vacation")]
    Vacation,
    /// Free-text reason carried in `custom_reason`
    #[sea_orm(string_value = "other")]
    Other,
}

/// Lifecycle state of an absence request, stored as a lowercase string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum AbsenceStatus {
    /// Submitted, no proof attached yet
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Proof document attached
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Accepted by an admin
    #[sea_orm(string_value = "approved")]
    Approved,
}

/// Ordered, deduplicated set of requested dates, stored as a JSON array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DateList(pub Vec<Date>);

/// Endpoints of a range selection, stored as a JSON object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// Absence record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "absence_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee requesting the absence
    pub user_id: String,
    /// Reason category for the request
    pub reason: AbsenceReason,
    /// Free-text reason, required when `reason` is `Other`
    pub custom_reason: Option<String>,
    /// Requested dates, ascending and unique
    pub dates: DateList,
    /// Range endpoints when the dates came from a range selection
    pub date_range: Option<DateRange>,
    /// Current lifecycle state
    pub status: AbsenceStatus,
    /// Opaque reference to the uploaded proof blob, if any
    pub proof_document: Option<String>,
    /// When the request was submitted
    pub created_at: DateTimeUtc,
    /// Set on proof upload and approval, None until then
    pub updated_at: Option<DateTimeUtc>,
    /// First requested date plus 30 days; the request is inactive after this
    pub expires_at: DateTimeUtc,
}

/// Defines relationships between AbsenceRecord and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
