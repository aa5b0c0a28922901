//! Shared configuration, errors and recurrence vocabulary for Kairos.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
