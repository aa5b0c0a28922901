//! Submitted, canonical and public-facing shapes of a recurrence pattern.

pub mod instance;
pub mod pattern;
pub mod submission;
pub mod view;

pub use instance::Instance;
pub use pattern::RecurrencePattern;
pub use submission::{ListField, RecurrenceSubmission};
pub use view::RecurrenceView;
