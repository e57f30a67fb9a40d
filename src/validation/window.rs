//! Backup and maintenance windows
//!
//! Both windows are fixed one hour blocks anchored on the same day. Overlap is
//! judged on time of day alone: the maintenance weekday is parsed and checked
//! but never takes part in the comparison.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike, Weekday};

use super::error::{Result, ValidationError};
use crate::crd::{DAY_TIME_FORMAT, TIME_FORMAT};

/// Length of both the backup and the maintenance window
pub const WINDOW_DURATION: TimeDelta = TimeDelta::hours(1);

/// chrono layout for `HH:mm`
const CLOCK_LAYOUT: &str = "%H:%M";

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("sun", Weekday::Sun),
    ("mon", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
];

/// A window of time on the 24 hour clock
///
/// The end may fall past midnight, e.g. a window starting at 23:30 ends at 00:30.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    duration: TimeDelta,
}

impl TimeWindow {
    /// Window of [`WINDOW_DURATION`] starting at `start`
    pub fn starting_at(start: NaiveTime) -> Self {
        Self {
            start,
            duration: WINDOW_DURATION,
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End time of day, wrapped past midnight
    pub fn end(&self) -> NaiveTime {
        self.start.overflowing_add_signed(self.duration).0
    }

    /// Whether two windows intersect
    ///
    /// Windows are half-open, so one ending exactly when the other starts does
    /// not overlap. Both starts sit on the same day; only an end may run past
    /// midnight, so 00:00-01:00 and 23:30-00:30 do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        let (start_a, end_a) = self.span();
        let (start_b, end_b) = other.span();

        start_a < end_b && end_a > start_b
    }

    /// Start and end in seconds from midnight, without wrapping the end
    fn span(&self) -> (i64, i64) {
        let start = i64::from(self.start.num_seconds_from_midnight());
        (start, start + self.duration.num_seconds())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(CLOCK_LAYOUT),
            self.end().format(CLOCK_LAYOUT)
        )
    }
}

/// Daily backup window, parsed from `HH:mm`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackupWindow(pub TimeWindow);

impl FromStr for BackupWindow {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self> {
        let start = NaiveTime::parse_from_str(value, CLOCK_LAYOUT).map_err(|e| {
            ValidationError::MalformedTimestamp(format!(
                "failed to parse backup applyOn value : expected format {} : {}",
                TIME_FORMAT, e
            ))
        })?;
        Ok(Self(TimeWindow::starting_at(start)))
    }
}

/// Weekly maintenance window, parsed from `DDD HH:mm`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaintenanceWindow {
    pub day: Weekday,
    pub window: TimeWindow,
}

impl FromStr for MaintenanceWindow {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self> {
        let malformed = || {
            ValidationError::MalformedTimestamp(format!(
                "formatting failure, applyFrom format expected `{}` found : {}",
                DAY_TIME_FORMAT, value
            ))
        };

        let (day, time) = value
            .split_once(' ')
            .filter(|(day, time)| !day.is_empty() && !time.is_empty() && !time.contains(' '))
            .ok_or_else(malformed)?;

        let day = parse_weekday(day).ok_or_else(malformed)?;

        let start = NaiveTime::parse_from_str(time, CLOCK_LAYOUT).map_err(|e| {
            ValidationError::MalformedTimestamp(format!(
                "failure while parsing maintenance applyFrom value, format expected `{}` found : {} : {}",
                DAY_TIME_FORMAT, value, e
            ))
        })?;

        Ok(Self {
            day,
            window: TimeWindow::starting_at(start),
        })
    }
}

/// Three letter weekday, case-insensitive
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    let token = token.to_lowercase();
    WEEKDAYS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, day)| *day)
}

/// Validate the backup and maintenance windows of an RHMIConfig
///
/// Both values are required. Each becomes a one hour window and the two
/// windows must not overlap. On success the inputs are handed back unchanged.
pub fn validate_backup_and_maintenance<'a>(
    backup_apply_on: &'a str,
    maintenance_apply_from: &'a str,
) -> Result<(&'a str, &'a str)> {
    if maintenance_apply_from.is_empty() {
        return Err(ValidationError::MissingField("maintenance apply from"));
    }
    if backup_apply_on.is_empty() {
        return Err(ValidationError::MissingField("backup apply on"));
    }

    let BackupWindow(backup) = backup_apply_on.parse()?;
    let maintenance: MaintenanceWindow = maintenance_apply_from.parse()?;

    if backup.overlaps(&maintenance.window) {
        return Err(ValidationError::WindowOverlap {
            backup,
            maintenance: maintenance.window,
        });
    }

    tracing::debug!(
        backup = %backup,
        maintenance = %maintenance.window,
        day = %maintenance.day,
        "Backup and maintenance windows do not overlap"
    );

    Ok((backup_apply_on, maintenance_apply_from))
}
