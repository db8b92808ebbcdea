//! User entity - Represents an employee or administrator account.
//!
//! Each user has a system-generated UUID id and a derived unique username.
//! The role controls which views and operations the account may use.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role, stored as a lowercase string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "employee")]
    Employee,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// UUID string generated at registration
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Given name as entered at registration
    pub first_name: String,
    /// Family name as entered at registration
    pub last_name: String,
    /// Login email, unique across the system
    #[sea_orm(unique)]
    pub email: String,
    /// Generated `first.last` handle, unique across the system
    #[sea_orm(unique)]
    pub username: String,
    /// Whether the account is an employee or an admin
    pub role: UserRole,
    /// When the account was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many overtime records
    #[sea_orm(has_many = "super::overtime_record::Entity")]
    OvertimeRecords,
    /// One user has many time clock records
    #[sea_orm(has_many = "super::time_clock_record::Entity")]
    TimeClockRecords,
    /// One user has many absence records
    #[sea_orm(has_many = "super::absence_record::Entity")]
    AbsenceRecords,
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

impl Related<super::absence_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AbsenceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
