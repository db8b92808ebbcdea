//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod absence_record;
pub mod holiday;
pub mod overtime_record;
pub mod time_clock_record;
pub mod user;

// Re-export specific types to avoid conflicts
pub use absence_record::{
    AbsenceReason, AbsenceStatus, Column as AbsenceRecordColumn, DateList, DateRange,
    Entity as AbsenceRecord, Model as AbsenceRecordModel,
};
pub use holiday::{Column as HolidayColumn, Entity as Holiday, Model as HolidayModel};
pub use overtime_record::{
    Column as OvertimeRecordColumn, Entity as OvertimeRecord, Model as OvertimeRecordModel,
};
pub use time_clock_record::{
    ClockStatus, Column as TimeClockRecordColumn, Entity as TimeClockRecord,
    Model as TimeClockRecordModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, UserRole};
