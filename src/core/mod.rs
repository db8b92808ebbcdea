//! Core business logic - framework-agnostic rules for overtime quotas,
//! absence requests, and reporting. Functions take a database connection
//! and return typed results; nothing here knows about the UI boundary.

/// Absence request lifecycle: creation, proof upload, approval, expiry
pub mod absence;
/// The fixed shift option catalog and window classification
pub mod catalog;
/// Date range selection and inclusive expansion
pub mod date_range;
/// Admin management of holidays and their budgets
pub mod holiday;
/// Overtime record submission, editing, and listing
pub mod overtime;
/// Quota accounting against per-holiday budgets
pub mod quota;
/// System-wide statistics and the per-employee report
pub mod summary;
/// Clock-in/clock-out tracking for holiday shifts
pub mod time_clock;
/// User registration, lookup, and deletion
pub mod user;
