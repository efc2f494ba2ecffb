//! AWS-oriented adapters and handlers for access key rotation.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! identity and secret store capabilities, and the rotation error taxonomy).
//! Domain contracts and configuration come from `key_rotation_core`.

pub mod adapters;
pub mod error;
pub mod handlers;
pub mod logging;
