use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// ## Summary
/// One concrete occurrence of a pattern. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instance {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Instance {
    /// ## Summary
    /// Builds an instance lasting `duration` from `start`.
    ///
    /// Returns `None` if the end falls outside the representable range.
    #[must_use]
    pub fn starting_at(start: NaiveDateTime, duration: TimeDelta) -> Option<Self> {
        let end = start.checked_add_signed(duration)?;
        Some(Self { start, end })
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }
}
