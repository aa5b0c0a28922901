use chrono::NaiveDate;

/// ## Summary
/// Inclusive calendar-date range instances are requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ExpansionWindow {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// ## Summary
    /// Narrows the window to `[start, end]`.
    ///
    /// Returns `None` when the two ranges do not overlap.
    #[must_use]
    pub fn intersect(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let start = self.start.max(start);
        let end = self.end.min(end);
        (start <= end).then_some(Self { start, end })
    }
}
