//! Validation of RHMIConfig scheduling values
//!
//! - Backup and maintenance windows: format, weekday, and non-overlap
//! - Upgrade date: mutual exclusion with automatic policies, format, future date

pub mod error;
pub mod upgrade;
pub mod window;

pub use error::{Result, ValidationError};
pub use upgrade::{parse_upgrade_date, validate_upgrade_apply_on};
pub use window::{
    BackupWindow, MaintenanceWindow, TimeWindow, WINDOW_DURATION, parse_weekday,
    validate_backup_and_maintenance,
};
