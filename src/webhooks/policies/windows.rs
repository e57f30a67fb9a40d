//! Backup and maintenance window policy
//!
//! A new resource may leave the windows unset. Once both are set, or on any
//! update, they must be well formed and must not overlap.

use super::{ValidationContext, ValidationResult};
use crate::validation::validate_backup_and_maintenance;

/// Validate `spec.backup.applyOn` against `spec.maintenance.applyFrom`
pub fn validate_windows(ctx: &ValidationContext) -> ValidationResult {
    let spec = &ctx.config.spec;

    let unset = spec.backup.apply_on.is_empty() || spec.maintenance.apply_from.is_empty();
    if ctx.is_create() && unset {
        return ValidationResult::allowed();
    }

    validate_backup_and_maintenance(&spec.backup.apply_on, &spec.maintenance.apply_from)
        .map(|_| ())
        .into()
}
