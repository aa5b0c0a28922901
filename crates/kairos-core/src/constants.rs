/// Instance length used when a submission omits `duration`.
pub const DEFAULT_DURATION_SECONDS: u32 = 3600;

/// Interval used when a submission omits `interval`.
pub const DEFAULT_INTERVAL: u16 = 1;

/// `week_of_month` value selecting the last matching weekday of a month.
pub const LAST_WEEK_OF_MONTH: i8 = -1;
pub const MIN_WEEK_OF_MONTH: i8 = 1;
pub const MAX_WEEK_OF_MONTH: i8 = 5;

/// Span of the instances window when the caller gives no end date.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Upper bound on occurrences produced by a single expansion.
pub const DEFAULT_MAX_INSTANCES: u16 = u16::MAX;
