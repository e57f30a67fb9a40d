//! Upgrade schedule policy
//!
//! `spec.upgrade.applyOn` is optional. When set it excludes both automatic
//! upgrade policies and must name a future date.

use super::{ValidationContext, ValidationResult};
use crate::validation::validate_upgrade_apply_on;

/// Validate the explicit upgrade date against the upgrade policy flags
pub fn validate_upgrade_schedule(ctx: &ValidationContext) -> ValidationResult {
    let upgrade = &ctx.config.spec.upgrade;

    validate_upgrade_apply_on(
        &upgrade.apply_on,
        upgrade.always_immediately,
        upgrade.during_next_maintenance,
        ctx.clock,
    )
    .into()
}
