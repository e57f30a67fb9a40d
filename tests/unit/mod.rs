// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Unit tests for the RHMIConfig operator
//!
//! This module contains unit tests for:
//! - Backup and maintenance window validation
//! - Upgrade date validation
//! - Admission webhook policies and HTTP handler

#[path = "../common/mod.rs"]
mod common;

mod webhooks;
