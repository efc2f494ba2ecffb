//! Shared access key rotation domain primitives.
//!
//! This crate owns the credential contract, configuration parsing, and the
//! retirement plan for stale keys. It excludes AWS SDK and Lambda runtime
//! concerns; those live in `key_rotation_lambda`.

pub mod config;
pub mod contract;
pub mod retirement;
