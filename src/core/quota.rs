//! Quota ledger - Tracks overtime hours used against per-holiday budgets.
//!
//! Stats are always computed from the overtime records on demand; nothing is
//! cached or stored. The create policy caps a request at the remaining
//! budget, while edits of existing records are rejected outright when the
//! post-edit total would overshoot.

use crate::{
    core::catalog::{SHIFT_OPTIONS, ShiftOption},
    entities::{Holiday, OvertimeRecord, overtime_record},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use serde::Serialize;

/// Hours used and the budget they count against, for one (user, holiday)
/// pair or one holiday across all users.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuotaStats {
    /// Overtime hours already credited
    pub used: i32,
    /// The holiday's `max_hours` budget
    pub max: i32,
}

impl QuotaStats {
    /// Budget still open; negative when over-allocated.
    #[must_use]
    pub fn remaining(&self) -> i32 {
        self.max - self.used
    }
}

/// Computes the quota stats for one user against one holiday.
///
/// A holiday id that matches no row yields zeroed stats rather than an
/// error, so callers can render "0 of 0" for stale references.
pub async fn user_holiday_stats(
    db: &DatabaseConnection,
    user_id: &str,
    holiday_id: i64,
) -> Result<QuotaStats> {
    let Some(holiday) = Holiday::find_by_id(holiday_id).one(db).await? else {
        return Ok(QuotaStats::default());
    };

    let records = OvertimeRecord::find()
        .filter(overtime_record::Column::UserId.eq(user_id))
        .filter(overtime_record::Column::HolidayId.eq(holiday_id))
        .all(db)
        .await?;

    Ok(QuotaStats {
        used: records.iter().map(|record| record.hours).sum(),
        max: holiday.max_hours,
    })
}

/// Computes the quota stats for one holiday across every user.
///
/// Used by admin views; the same zeroed-stats fallback applies when the
/// holiday does not exist.
pub async fn holiday_stats(db: &DatabaseConnection, holiday_id: i64) -> Result<QuotaStats> {
    let Some(holiday) = Holiday::find_by_id(holiday_id).one(db).await? else {
        return Ok(QuotaStats::default());
    };

    let records = OvertimeRecord::find()
        .filter(overtime_record::Column::HolidayId.eq(holiday_id))
        .all(db)
        .await?;

    Ok(QuotaStats {
        used: records.iter().map(|record| record.hours).sum(),
        max: holiday.max_hours,
    })
}

/// Decides how many hours a new submission may credit.
///
/// Non-positive requests are invalid. With no budget left the request is
/// rejected as `QuotaExceeded`; a request larger than the open remainder is
/// capped to it rather than rejected.
///
/// # Errors
/// `Validation` for `requested <= 0`; `QuotaExceeded` when nothing remains.
pub fn grantable_hours(stats: QuotaStats, requested: i32) -> Result<i32> {
    if requested <= 0 {
        return Err(Error::Validation {
            message: format!("Requested hours must be positive, got {requested}"),
        });
    }

    let remaining = stats.remaining();
    if remaining <= 0 {
        return Err(Error::QuotaExceeded {
            requested,
            remaining,
        });
    }

    Ok(requested.min(remaining))
}

/// Checks that changing a record from `current_hours` to `new_hours` keeps
/// the user's total within budget.
///
/// The invariant is on the post-edit total: `used - current + new <= max`.
/// Unlike creation there is no capping; an overshooting edit is rejected.
pub fn fits_after_edit(stats: QuotaStats, current_hours: i32, new_hours: i32) -> Result<()> {
    let new_total = stats.used - current_hours + new_hours;
    if new_total > stats.max {
        return Err(Error::QuotaExceeded {
            requested: new_hours,
            remaining: stats.max - (stats.used - current_hours),
        });
    }
    Ok(())
}

/// Catalog options an existing record could be edited to without
/// overshooting the budget, in catalog order.
///
/// The record's own hours are handed back to the budget first, so keeping
/// the current option is always among the results.
#[must_use]
pub fn options_within_budget(stats: QuotaStats, current_hours: i32) -> Vec<&'static ShiftOption> {
    let remaining = stats.max - stats.used + current_hours;
    SHIFT_OPTIONS
        .iter()
        .filter(|option| option.hours <= remaining)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_grantable_hours_rejects_non_positive() {
        let stats = QuotaStats { used: 0, max: 2 };
        assert!(matches!(
            grantable_hours(stats, 0).unwrap_err(),
            Error::Validation { .. }
        ));
        assert!(matches!(
            grantable_hours(stats, -1).unwrap_err(),
            Error::Validation { .. }
        ));
    }

    #[test]
    fn test_grantable_hours_rejects_exhausted_budget() {
        let stats = QuotaStats { used: 2, max: 2 };
        assert!(matches!(
            grantable_hours(stats, 1).unwrap_err(),
            Error::QuotaExceeded {
                requested: 1,
                remaining: 0
            }
        ));
    }

    #[test]
    fn test_grantable_hours_caps_to_remaining() {
        let stats = QuotaStats { used: 1, max: 2 };
        // Two hours requested with one open: capped, not rejected
        assert_eq!(grantable_hours(stats, 2).unwrap(), 1);
        // Requests within the remainder pass through untouched
        assert_eq!(grantable_hours(stats, 1).unwrap(), 1);
    }

    #[test]
    fn test_fits_after_edit_is_about_the_post_edit_total() {
        let stats = QuotaStats { used: 2, max: 2 };
        // Swapping a two-hour option for another two-hour option stays flat
        assert!(fits_after_edit(stats, 2, 2).is_ok());
        // Growing a one-hour record to two overshoots by one
        let err = fits_after_edit(stats, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::QuotaExceeded {
                requested: 2,
                remaining: 1
            }
        ));
        // Shrinking always fits
        assert!(fits_after_edit(stats, 2, 1).is_ok());
    }

    #[test]
    fn test_options_within_budget_hands_back_current_hours() {
        let stats = QuotaStats { used: 2, max: 2 };
        // A two-hour record on a full budget can still pick any option
        let options = options_within_budget(stats, 2);
        assert_eq!(options.len(), SHIFT_OPTIONS.len());

        // A one-hour record on a full budget is limited to one-hour options
        let options = options_within_budget(stats, 1);
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|option| option.hours == 1));
    }

    #[test]
    fn test_remaining_can_go_negative() {
        let stats = QuotaStats { used: 3, max: 2 };
        assert_eq!(stats.remaining(), -1);
    }

    #[tokio::test]
    async fn test_user_holiday_stats_missing_holiday_is_zeroed() -> Result<()> {
        let db = setup_test_db().await?;

        let stats = user_holiday_stats(&db, "nobody", 999).await?;
        assert_eq!(stats, QuotaStats { used: 0, max: 0 });

        Ok(())
    }

    #[tokio::test]
    async fn test_user_holiday_stats_sums_only_that_users_records() -> Result<()> {
        let (db, user, holiday) = setup_with_user_and_holiday().await?;
        let other = create_test_user(&db, "other@example.com").await?;

        create_test_overtime_record(&db, &user.id, holiday.id, 1).await?;
        create_test_overtime_record(&db, &other.id, holiday.id, 2).await?;

        let stats = user_holiday_stats(&db, &user.id, holiday.id).await?;
        assert_eq!(stats.used, 1);
        assert_eq!(stats.max, holiday.max_hours);

        Ok(())
    }

    #[tokio::test]
    async fn test_holiday_stats_sums_across_users() -> Result<()> {
        let (db, user, holiday) = setup_with_user_and_holiday().await?;
        let other = create_test_user(&db, "other@example.com").await?;

        create_test_overtime_record(&db, &user.id, holiday.id, 1).await?;
        create_test_overtime_record(&db, &other.id, holiday.id, 2).await?;

        let stats = holiday_stats(&db, holiday.id).await?;
        assert_eq!(stats.used, 3);

        Ok(())
    }
}
