pub mod error;
pub mod recurrence;
pub mod store;
