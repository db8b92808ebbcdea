//! Holiday entity - A calendar holiday that grants an overtime hour budget.
//!
//! `max_hours` is the per-employee quota for the holiday; `active` gates
//! whether employees may still submit new overtime against it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Holiday database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "holidays")]
pub struct Model {
    /// Unique identifier for the holiday
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Carnaval")
    pub name: String,
    /// Calendar date of the holiday itself
    pub date: Date,
    /// Whether new overtime submissions are accepted
    pub active: bool,
    /// Last date on which hours may be worked off
    pub deadline: Date,
    /// Per-employee overtime hour quota
    pub max_hours: i32,
    /// When the holiday row was created
    pub created_at: DateTimeUtc,
    /// Set on every admin update, None until then
    pub updated_at: Option<DateTimeUtc>,
}

/// Defines relationships between Holiday and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One holiday has many overtime records
    #[sea_orm(has_many = "super::overtime_record::Entity")]
    OvertimeRecords,
    /// One holiday has many time clock records
    #[sea_orm(has_many = "super::time_clock_record::Entity")]
    TimeClockRecords,
}

impl Related<super::overtime_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OvertimeRecords.def()
    }
}

impl Related<super::time_clock_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeClockRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
