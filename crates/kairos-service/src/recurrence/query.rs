use chrono::NaiveDate;
use kairos_core::config::ExpansionConfig;
use kairos_recur::ExpansionWindow;
use kairos_recur::dates::parse_date;
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

/// Optional window bounds supplied with an instances request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstanceQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl InstanceQuery {
    #[must_use]
    pub fn new(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }

    /// ## Summary
    /// Resolves the query into a concrete window.
    ///
    /// A missing start is `today`; a missing end is `today` plus the configured
    /// default window. Blank values count as missing. Bounds may carry a time
    /// of day, only the date is used.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidInput` if a bound is present but unparseable.
    pub fn resolve(
        &self,
        today: NaiveDate,
        expansion: &ExpansionConfig,
    ) -> ServiceResult<ExpansionWindow> {
        let start = match bound(self.start_date.as_deref(), "start_date")? {
            Some(start) => start,
            None => today,
        };
        let end = match bound(self.end_date.as_deref(), "end_date")? {
            Some(end) => end,
            None => today
                .checked_add_signed(expansion.default_window())
                .unwrap_or(NaiveDate::MAX),
        };
        Ok(ExpansionWindow::new(start, end))
    }
}

fn bound(raw: Option<&str>, field: &str) -> ServiceResult<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| ServiceError::InvalidInput(format!("{field} is not a date: {raw:?}")))
}
