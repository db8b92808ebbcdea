//! Shift option catalog - The closed set of holiday shift windows.
//!
//! Every overtime submission references one of five fixed options. Each
//! option pairs a worked window with the overtime hours it credits relative
//! to the standard 09:00-18:00 day. `classify` maps a clocked window onto
//! the catalog; `window_hours` computes the raw overtime amount.

use crate::errors::{Error, Result};
use chrono::{NaiveTime, Timelike};

/// Start of the standard working day, "HH:MM".
pub const STANDARD_DAY_START: &str = "09:00";
/// End of the standard working day, "HH:MM".
pub const STANDARD_DAY_END: &str = "18:00";

/// One entry of the shift option catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftOption {
    /// Stable identifier stored on overtime records
    pub id: &'static str,
    /// Display label shown to employees
    pub label: &'static str,
    /// Window start, "HH:MM"
    pub start: &'static str,
    /// Window end, "HH:MM"
    pub end: &'static str,
    /// Overtime hours the option credits
    pub hours: i32,
}

/// The catalog, in precedence order: two-hour options first, then one-hour.
///
/// Order matters. `classify` resolves exact matches and heuristic ties by
/// scanning this table front to back.
pub const SHIFT_OPTIONS: [ShiftOption; 5] = [
    ShiftOption {
        id: "7h_18h",
        label: "7h às 18h",
        start: "07:00",
        end: "18:00",
        hours: 2,
    },
    ShiftOption {
        id: "9h_20h",
        label: "9h às 20h",
        start: "09:00",
        end: "20:00",
        hours: 2,
    },
    ShiftOption {
        id: "8h_19h",
        label: "8h às 19h",
        start: "08:00",
        end: "19:00",
        hours: 2,
    },
    ShiftOption {
        id: "8h_18h",
        label: "8h às 18h",
        start: "08:00",
        end: "18:00",
        hours: 1,
    },
    ShiftOption {
        id: "9h_19h",
        label: "9h às 19h",
        start: "09:00",
        end: "19:00",
        hours: 1,
    },
];

/// Parses a "HH:MM" string, rejecting anything else as `InvalidTime`.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| Error::InvalidTime {
        value: value.to_string(),
    })
}

/// Looks up a catalog entry by its stable id.
#[must_use]
pub fn find(option_id: &str) -> Option<&'static ShiftOption> {
    SHIFT_OPTIONS.iter().find(|option| option.id == option_id)
}

/// Returns the worked window for an option id, falling back to the
/// standard day for ids not in the catalog.
#[must_use]
pub fn window_for(option_id: &str) -> (&'static str, &'static str) {
    find(option_id).map_or((STANDARD_DAY_START, STANDARD_DAY_END), |option| {
        (option.start, option.end)
    })
}

/// Maps a worked window onto the catalog entry that credits it.
///
/// Only the hour component of each time participates. An exact
/// (start hour, end hour) match against a catalog window wins outright,
/// scanned in catalog order. Otherwise the overflow before 09:00 plus the
/// overflow after 18:00 (whole hours) selects a tier: two or more hours
/// pins `7h_18h` for a 7 o'clock start and `8h_19h` for an 8 o'clock
/// start, defaulting to `9h_20h`; exactly one hour pins `8h_18h` for an
/// 8 o'clock start, defaulting to `9h_19h`; a window inside the standard
/// day falls back to the first one-hour option.
///
/// # Errors
/// `InvalidTime` when either input is not a "HH:MM" time.
pub fn classify(start_time: &str, end_time: &str) -> Result<&'static ShiftOption> {
    let start_hour = parse_time(start_time)?.hour() as i32;
    let end_hour = parse_time(end_time)?.hour() as i32;

    for option in &SHIFT_OPTIONS {
        let option_start = parse_time(option.start)?.hour() as i32;
        let option_end = parse_time(option.end)?.hour() as i32;
        if start_hour == option_start && end_hour == option_end {
            return Ok(option);
        }
    }

    let before_standard = (9 - start_hour).max(0);
    let after_standard = (end_hour - 18).max(0);
    let total_overtime = before_standard + after_standard;

    let option = if total_overtime >= 2 {
        if start_hour == 7 {
            &SHIFT_OPTIONS[0]
        } else if start_hour == 8 {
            &SHIFT_OPTIONS[2]
        } else {
            &SHIFT_OPTIONS[1]
        }
    } else if total_overtime >= 1 {
        if start_hour == 8 {
            &SHIFT_OPTIONS[3]
        } else {
            &SHIFT_OPTIONS[4]
        }
    } else {
        // Windows inside the standard day still classify to the smallest
        // option rather than failing; callers needing the true amount use
        // `window_hours`.
        &SHIFT_OPTIONS[3]
    };

    Ok(option)
}

/// Overtime credited by a worked window against the standard 09:00-18:00 day.
///
/// Minute-precision: time before 09:00 and time after 18:00 are summed and
/// rounded to the nearest whole hour, halves up.
///
/// # Errors
/// `InvalidTime` when either input is not a "HH:MM" time.
pub fn window_hours(start_time: &str, end_time: &str) -> Result<i32> {
    window_hours_between(start_time, end_time, STANDARD_DAY_START, STANDARD_DAY_END)
}

/// `window_hours` against an explicit standard day.
pub fn window_hours_between(
    start_time: &str,
    end_time: &str,
    standard_start: &str,
    standard_end: &str,
) -> Result<i32> {
    let start = minutes_since_midnight(start_time)?;
    let end = minutes_since_midnight(end_time)?;
    let day_start = minutes_since_midnight(standard_start)?;
    let day_end = minutes_since_midnight(standard_end)?;

    let before = (day_start - start).max(0);
    let after = (end - day_end).max(0);

    Ok((before + after + 30) / 60)
}

fn minutes_since_midnight(value: &str) -> Result<i32> {
    let time = parse_time(value)?;
    Ok((time.hour() * 60 + time.minute()) as i32)
}
