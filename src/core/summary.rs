//! Summary aggregation - System-wide statistics and the per-employee
//! holiday report.
//!
//! The system summary is deliberately infallible: data is fetched in a
//! fixed order (users, holidays, overtime, absences) and the first failure
//! is logged and returned as a partial summary, with everything not yet
//! computed left at zero. The derived availability and completion figures
//! are only filled in when every fetch succeeded.

use crate::{
    core::{absence, holiday, overtime, user},
    entities::{AbsenceStatus, UserRole},
    errors::Result,
};
use sea_orm::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::error;

/// System-wide counters shown on the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SystemSummary {
    /// Employee-role accounts
    pub total_employees: usize,
    /// All holidays, active or not
    pub total_holidays: usize,
    /// Holidays still accepting submissions
    pub total_active_holidays: usize,
    /// Sum of hours over every overtime record
    pub total_hours_registered: i64,
    /// Employees times the summed budgets of all holidays
    pub total_hours_available: i64,
    /// Registered over available, as a percentage; 0 when nothing is available
    pub completion_rate: f64,
    /// All absence requests
    pub total_absences: usize,
    /// Absence requests still pending
    pub pending_absences: usize,
}

/// Computes the system summary, degrading to a partial one on failure.
pub async fn system_summary(db: &DatabaseConnection) -> SystemSummary {
    let mut summary = SystemSummary::default();

    let users = match user::all(db).await {
        Ok(users) => users,
        Err(err) => {
            error!(error = %err, "summary: user fetch failed");
            return summary;
        }
    };
    let employees = users
        .iter()
        .filter(|account| account.role == UserRole::Employee)
        .count();
    summary.total_employees = employees;

    let holidays = match holiday::all(db).await {
        Ok(holidays) => holidays,
        Err(err) => {
            error!(error = %err, "summary: holiday fetch failed");
            return summary;
        }
    };
    summary.total_holidays = holidays.len();
    summary.total_active_holidays = holidays.iter().filter(|h| h.active).count();

    let records = match overtime::all_records(db).await {
        Ok(records) => records,
        Err(err) => {
            error!(error = %err, "summary: overtime fetch failed");
            return summary;
        }
    };
    summary.total_hours_registered = records.iter().map(|record| i64::from(record.hours)).sum();

    let absences = match absence::all_records(db).await {
        Ok(absences) => absences,
        Err(err) => {
            error!(error = %err, "summary: absence fetch failed");
            return summary;
        }
    };
    summary.total_absences = absences.len();
    summary.pending_absences = absences
        .iter()
        .filter(|request| request.status == AbsenceStatus::Pending)
        .count();

    let budget_per_employee: i64 = holidays.iter().map(|h| i64::from(h.max_hours)).sum();
    summary.total_hours_available = employees as i64 * budget_per_employee;
    summary.completion_rate = if summary.total_hours_available > 0 {
        summary.total_hours_registered as f64 / summary.total_hours_available as f64 * 100.0
    } else {
        0.0
    };

    summary
}

/// Filters for the per-employee holiday report.
#[derive(Clone, Debug, Default)]
pub struct ReportFilters {
    /// Keep rows for this employee id only
    pub employee: Option<String>,
    /// Keep rows for this holiday id only
    pub holiday: Option<i64>,
    /// Case-insensitive substring match on employee label or holiday name
    pub search_term: Option<String>,
}

/// One row of the per-employee holiday report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmployeeHolidayRow {
    pub employee_id: String,
    /// `"First Last (email)"` display label
    pub employee_name: String,
    pub holiday_id: i64,
    pub holiday_name: String,
    pub max_hours: i32,
    pub hours_completed: i32,
    /// Budget minus completed; negative when over-allocated
    pub hours_remaining: i32,
    /// Latest record activity, None for zero-record rows
    pub last_updated: Option<DateTimeUtc>,
}

/// Builds the cross product of every employee and every holiday, folding
/// the matching overtime records into each row.
///
/// Employees without records get zero-filled rows; that the full grid is
/// visible is the point of the view. Rows are sorted by employee label,
/// then holiday name.
pub async fn employee_holiday_report(
    db: &DatabaseConnection,
    filters: &ReportFilters,
) -> Result<Vec<EmployeeHolidayRow>> {
    let employees = user::employees(db).await?;
    let holidays = holiday::all(db).await?;
    let records = overtime::all_records(db).await?;

    // (hours, latest activity) folded per (user, holiday)
    let mut folded: HashMap<(&str, i64), (i32, DateTimeUtc)> = HashMap::new();
    for record in &records {
        let touched = record.updated_at.unwrap_or(record.created_at);
        let entry = folded
            .entry((record.user_id.as_str(), record.holiday_id))
            .or_insert((0, touched));
        entry.0 += record.hours;
        entry.1 = entry.1.max(touched);
    }

    let mut rows = Vec::with_capacity(employees.len() * holidays.len());
    for employee in &employees {
        let label = format!(
            "{} {} ({})",
            employee.first_name, employee.last_name, employee.email
        );
        for holiday in &holidays {
            let (hours_completed, last_updated) = folded
                .get(&(employee.id.as_str(), holiday.id))
                .map_or((0, None), |(hours, touched)| (*hours, Some(*touched)));

            rows.push(EmployeeHolidayRow {
                employee_id: employee.id.clone(),
                employee_name: label.clone(),
                holiday_id: holiday.id,
                holiday_name: holiday.name.clone(),
                max_hours: holiday.max_hours,
                hours_completed,
                hours_remaining: holiday.max_hours - hours_completed,
                last_updated,
            });
        }
    }

    if let Some(employee_id) = &filters.employee {
        rows.retain(|row| &row.employee_id == employee_id);
    }
    if let Some(holiday_id) = filters.holiday {
        rows.retain(|row| row.holiday_id == holiday_id);
    }
    if let Some(term) = &filters.search_term {
        let term = term.to_lowercase();
        rows.retain(|row| {
            row.employee_name.to_lowercase().contains(&term)
                || row.holiday_name.to_lowercase().contains(&term)
        });
    }

    rows.sort_by(|a, b| {
        (&a.employee_name, &a.holiday_name).cmp(&(&b.employee_name, &b.holiday_name))
    });

    Ok(rows)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        entities::{AbsenceReason, HolidayModel, UserModel},
        test_utils::*,
    };
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_summary_of_empty_system_is_all_zeros() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = system_summary(&db).await;
        assert_eq!(summary, SystemSummary::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_availability_and_completion_rate() -> Result<()> {
        let db = setup_test_db().await?;

        // Two employees, one admin that must not count
        let ana = create_test_user(&db, "ana@example.com").await?;
        create_test_user(&db, "bruno@example.com").await?;
        create_test_admin(&db, "admin@example.com").await?;

        let holiday = create_test_holiday(&db, "Carnaval").await?;

        // One one-hour record against a 2 x 2h pool
        overtime::create_record(&db, &ana.id, holiday.id, "8h_18h").await?;

        let summary = system_summary(&db).await;
        assert_eq!(summary.total_employees, 2);
        assert_eq!(summary.total_holidays, 1);
        assert_eq!(summary.total_hours_registered, 1);
        assert_eq!(summary.total_hours_available, 4);
        assert_eq!(summary.completion_rate, 25.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_counts_holidays_and_absences() -> Result<()> {
        let db = setup_test_db().await?;

        let ana = create_test_user(&db, "ana@example.com").await?;
        create_test_holiday(&db, "Carnaval").await?;
        create_custom_holiday(&db, "Tiradentes", false, 2).await?;

        let today = chrono::Utc::now().date_naive();
        absence::create(&db, &ana.id, AbsenceReason::Personal, None, vec![today], None).await?;
        let completed =
            absence::create(&db, &ana.id, AbsenceReason::Medical, None, vec![today], None).await?;
        absence::attach_proof(&db, completed.id, "blobs/a.pdf".to_string(), "application/pdf")
            .await?;

        let summary = system_summary(&db).await;
        assert_eq!(summary.total_holidays, 2);
        assert_eq!(summary.total_active_holidays, 1);
        assert_eq!(summary.total_absences, 2);
        assert_eq!(summary.pending_absences, 1);
        // Inactive holidays still contribute budget to availability
        assert_eq!(summary.total_hours_available, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_degrades_to_partial_on_fetch_failure() {
        let employee = UserModel {
            id: "u1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: "ana@example.com".to_string(),
            username: "ana.silva".to_string(),
            role: UserRole::Employee,
            created_at: chrono::Utc::now(),
        };
        let carnaval = HolidayModel {
            id: 1,
            name: "Carnaval".to_string(),
            date: chrono::Utc::now().date_naive(),
            active: true,
            deadline: chrono::Utc::now().date_naive(),
            max_hours: 2,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };

        // Users and holidays load, the overtime fetch blows up
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![employee]])
            .append_query_results([vec![carnaval]])
            .append_query_errors([DbErr::Custom("connection lost".to_string())])
            .into_connection();

        let summary = system_summary(&db).await;
        assert_eq!(summary.total_employees, 1);
        assert_eq!(summary.total_holidays, 1);
        assert_eq!(summary.total_active_holidays, 1);
        // Everything downstream of the failure stays zero
        assert_eq!(summary.total_hours_registered, 0);
        assert_eq!(summary.total_hours_available, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.total_absences, 0);
    }

    #[tokio::test]
    async fn test_report_cross_joins_employees_and_holidays() -> Result<()> {
        let db = setup_test_db().await?;

        let ana = create_test_user(&db, "ana@example.com").await?;
        let bruno = create_test_user(&db, "bruno@example.com").await?;
        create_test_admin(&db, "admin@example.com").await?;
        let carnaval = create_test_holiday(&db, "Carnaval").await?;
        let natal = create_test_holiday(&db, "Natal").await?;

        overtime::create_record(&db, &ana.id, carnaval.id, "7h_18h").await?;

        let rows = employee_holiday_report(&db, &ReportFilters::default()).await?;
        // Two employees times two holidays, the admin invisible
        assert_eq!(rows.len(), 4);

        let ana_carnaval = rows
            .iter()
            .find(|row| row.employee_id == ana.id && row.holiday_id == carnaval.id)
            .unwrap();
        assert_eq!(ana_carnaval.hours_completed, 2);
        assert_eq!(ana_carnaval.hours_remaining, 0);
        assert!(ana_carnaval.last_updated.is_some());
        assert!(ana_carnaval.employee_name.contains("(ana@example.com)"));

        // Zero-filled rows keep the full budget open and no activity stamp
        let bruno_natal = rows
            .iter()
            .find(|row| row.employee_id == bruno.id && row.holiday_id == natal.id)
            .unwrap();
        assert_eq!(bruno_natal.hours_completed, 0);
        assert_eq!(bruno_natal.hours_remaining, natal.max_hours);
        assert!(bruno_natal.last_updated.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_report_rows_are_sorted_by_label_then_holiday() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_user(&db, "zoe@example.com").await?;
        create_test_user(&db, "ana@example.com").await?;
        create_test_holiday(&db, "Natal").await?;
        create_test_holiday(&db, "Carnaval").await?;

        let rows = employee_holiday_report(&db, &ReportFilters::default()).await?;
        let keys: Vec<_> = rows
            .iter()
            .map(|row| (row.employee_name.clone(), row.holiday_name.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        Ok(())
    }

    #[tokio::test]
    async fn test_report_filters() -> Result<()> {
        let db = setup_test_db().await?;

        let ana = create_test_user(&db, "ana@example.com").await?;
        create_test_user(&db, "bruno@example.com").await?;
        let carnaval = create_test_holiday(&db, "Carnaval").await?;
        create_test_holiday(&db, "Natal").await?;

        let rows = employee_holiday_report(
            &db,
            &ReportFilters {
                employee: Some(ana.id.clone()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.employee_id == ana.id));

        let rows = employee_holiday_report(
            &db,
            &ReportFilters {
                holiday: Some(carnaval.id),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.holiday_id == carnaval.id));

        let rows = employee_holiday_report(
            &db,
            &ReportFilters {
                search_term: Some("CARNA".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.holiday_name == "Carnaval"));

        Ok(())
    }
}
