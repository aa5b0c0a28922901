//! Recurrence pattern validation, normalization and instance expansion.
//!
//! A submitted pattern flows through [`validated`], [`normalize`] and, once
//! persisted by the caller, [`expand`]. Every step is pure and synchronous.

pub mod dates;
pub mod error;
pub mod expand;
pub mod model;
pub mod normalize;
pub mod validation;

pub use expand::{Expander, ExpansionOptions, ExpansionWindow, expand};
pub use model::{Instance, ListField, RecurrencePattern, RecurrenceSubmission, RecurrenceView};
pub use normalize::{normalize, parse};
pub use validation::{ValidSubmission, ValidationError, validate, validated};
