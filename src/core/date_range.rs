//! Date range selection - Expands two picked calendar dates into every day
//! between them.
//!
//! Mirrors the picker flow of the absence form: the first pick anchors a
//! range, the second completes it (in either order), and a third pick starts
//! over with a fresh single-date selection.

use crate::entities::DateRange;
use chrono::NaiveDate;

/// In-progress date selection for an absence request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRangeSelection {
    /// First endpoint picked, if any
    pub anchor: Option<NaiveDate>,
    /// Second endpoint, set once the range is complete
    pub end: Option<NaiveDate>,
}

impl DateRangeSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one date pick and returns the currently selected dates.
    ///
    /// With no anchor (or with a completed range) the pick starts a new
    /// single-date selection. With an anchor pending, the pick completes the
    /// range; endpoints swap when the pick lies before the anchor, and the
    /// returned dates cover the range inclusively.
    pub fn select(&mut self, picked: NaiveDate) -> Vec<NaiveDate> {
        match (self.anchor, self.end) {
            (None, _) | (Some(_), Some(_)) => {
                self.anchor = Some(picked);
                self.end = None;
                vec![picked]
            }
            (Some(anchor), None) => {
                let (start, end) = if picked < anchor {
                    (picked, anchor)
                } else {
                    (anchor, picked)
                };
                self.anchor = Some(start);
                self.end = Some(end);
                days_between(start, end)
            }
        }
    }

    /// The completed range endpoints, None while the selection is partial.
    #[must_use]
    pub fn as_range(&self) -> Option<DateRange> {
        match (self.anchor, self.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    /// Resets the selection to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Every calendar day from `start` through `end`, inclusive.
///
/// Empty when `start` is after `end`; callers that accept picks in either
/// order normalize through [`DateRangeSelection::select`] first.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}
