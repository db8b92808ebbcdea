//! Overtime record entity - One employee submission of hours against a holiday.
//!
//! Each record snapshots the `holiday_name` and the shift option
//! (`option_id`, `option_label`, `hours`) chosen at submission time, plus the
//! clocked window when the record came from a time clock.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Overtime record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "overtime_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee the hours belong to
    pub user_id: String,
    /// Holiday the hours count against
    pub holiday_id: i64,
    /// Holiday name as it was at submission time
    pub holiday_name: String,
    /// Calendar date of the holiday
    pub date: Date,
    /// Shift option identifier (e.g., `"7h_18h"`)
    pub option_id: String,
    /// Shift option display label (e.g., `"7h às 18h"`)
    pub option_label: String,
    /// Overtime hours credited by the option
    pub hours: i32,
    /// Worked window start, "HH:MM", when known
    pub start_time: Option<String>,
    /// Worked window end, "HH:MM", when known
    pub end_time: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// Set on every edit, None until then
    pub updated_at: Option<DateTimeUtc>,
}

/// Defines relationships between OvertimeRecord and other entities
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
