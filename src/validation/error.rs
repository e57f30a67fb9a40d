//! Error types for RHMIConfig window validation

use thiserror::Error;

use super::window::TimeWindow;
use crate::crd::DATE_FORMAT;

/// Why a set of scheduling values was rejected
///
/// Each variant is one kind of rejection; [`ValidationError::reason`] gives
/// the stable kind name surfaced to admission clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value was empty
    #[error("{0} value is required")]
    MissingField(&'static str),

    /// A value did not match its expected layout
    #[error("{0}")]
    MalformedTimestamp(String),

    /// An explicit upgrade date was combined with an automatic upgrade policy
    #[error(
        "spec.upgrade.applyOn shouldn't be set when spec.upgrade.alwaysImmediately or spec.upgrade.duringNextMaintenance are true"
    )]
    ConflictingFields,

    /// The upgrade date is not after the current instant
    #[error("invalid value for spec.upgrade.applyOn: {0}. It must be a future date")]
    NotInFuture(String),

    /// Backup and maintenance windows intersect
    #[error(
        "backup and maintenance times can not overlap, each time is parsed as a 1 hour window, current backup applyOn window : {backup} overlaps with current maintenance window : {maintenance}"
    )]
    WindowOverlap {
        backup: TimeWindow,
        maintenance: TimeWindow,
    },
}

impl ValidationError {
    /// Kind name, stable across message wording changes
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "MissingField",
            ValidationError::MalformedTimestamp(_) => "MalformedTimestamp",
            ValidationError::ConflictingFields => "ConflictingFields",
            ValidationError::NotInFuture(_) => "NotInFuture",
            ValidationError::WindowOverlap { .. } => "WindowOverlap",
        }
    }

    pub(crate) fn malformed_upgrade_date(err: impl std::fmt::Display) -> Self {
        ValidationError::MalformedTimestamp(format!(
            "invalid value for spec.upgrade.applyOn, must be a date with the format {} : {}",
            DATE_FORMAT, err
        ))
    }
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
