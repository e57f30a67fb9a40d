//! Upgrade schedule validation

use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::{Result, ValidationError};
use crate::clock::Clock;

/// chrono layout for parsing `2 Jan 2006 15:04`
const PARSE_LAYOUT: &str = "%d %b %Y %H:%M";

/// chrono layout for rendering `2 Jan 2006 15:04`
const DISPLAY_LAYOUT: &str = "%-d %b %Y %H:%M";

/// Parse an upgrade date such as `12 Jan 1980 23:00` as a UTC instant
pub fn parse_upgrade_date(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, PARSE_LAYOUT)
        .map(|date| date.and_utc())
        .map_err(ValidationError::malformed_upgrade_date)
}

/// Validate an explicitly scheduled upgrade
///
/// An empty `apply_on` means no date was requested. A date may not be combined
/// with either automatic policy, must match the upgrade date layout, and must
/// be strictly later than `clock.now()`.
pub fn validate_upgrade_apply_on(
    apply_on: &str,
    always_immediately: bool,
    during_next_maintenance: bool,
    clock: &dyn Clock,
) -> Result<()> {
    if apply_on.is_empty() {
        return Ok(());
    }

    if always_immediately || during_next_maintenance {
        return Err(ValidationError::ConflictingFields);
    }

    let scheduled = parse_upgrade_date(apply_on)?;

    if scheduled <= clock.now() {
        return Err(ValidationError::NotInFuture(
            scheduled.format(DISPLAY_LAYOUT).to_string(),
        ));
    }

    Ok(())
}
