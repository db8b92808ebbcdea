//! Time clock record entity - A raw clock-in/clock-out pair for a holiday shift.
//!
//! At most one `Active` record may exist per (user, holiday); clocking out
//! completes the record and fixes its computed `overtime_hours`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Clock record state, stored as a lowercase string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ClockStatus {
    /// Clocked in, not yet clocked out
    #[sea_orm(string_value = "active")]
    Active,
    /// Clocked out; `overtime_hours` is final
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Time clock record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_clock_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee who clocked in
    pub user_id: String,
    /// Holiday the shift counts against
    pub holiday_id: i64,
    /// Calendar date of the shift
    pub date: Date,
    /// Clock-in time, "HH:MM"
    pub start_time: String,
    /// Clock-out time, "HH:MM", None while active
    pub end_time: Option<String>,
    /// Whether the record is still open
    pub status: ClockStatus,
    /// Overtime hours computed at clock-out, 0 while active
    pub overtime_hours: i32,
    /// When the clock-in happened
    pub created_at: DateTimeUtc,
    /// Set at clock-out, None until then
    pub updated_at: Option<DateTimeUtc>,
}

/// Defines relationships between TimeClockRecord and other entities
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
    /// Each record belongs to one holiday
    #[sea_orm(
        belongs_to = "super::holiday::Entity",
        from = "Column::HolidayId",
        to = "super::holiday::Column::Id",
        on_delete = "Cascade"
    )]
    Holiday,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::holiday::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holiday.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
