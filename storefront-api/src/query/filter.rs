//! Filter state for table and chart queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

/// Inclusive price range, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub from: i64,
    pub to: i64,
}

impl PriceRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

/// The filters currently applied to a table. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date_range: Option<DateRange>,
    pub price_range: Option<PriceRange>,
    /// Substring the title must contain.
    pub title: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
}

impl FilterState {
    /// Merge a partial update. Fields the update leaves unset keep their
    /// value; an empty title or status clears the constraint.
    pub fn merged(&self, update: &FilterUpdate) -> Self {
        Self {
            date_range: update.date_range.or(self.date_range),
            price_range: update.price_range.or(self.price_range),
            title: match &update.title {
                Some(title) => non_empty(title),
                None => self.title.clone(),
            },
            status: match &update.status {
                Some(status) => non_empty(status),
                None => self.status.clone(),
            },
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A partial filter change.
///
/// # Example
///
/// ```
/// use storefront_api::query::{FilterState, FilterUpdate, PriceRange};
///
/// let filters = FilterState::default()
///     .merged(&FilterUpdate::new().title("shoe"))
///     .merged(&FilterUpdate::new().price_range(PriceRange::new(10, 50)));
///
/// assert_eq!(filters.title.as_deref(), Some("shoe"));
/// assert_eq!(filters.price_range, Some(PriceRange::new(10, 50)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub date_range: Option<DateRange>,
    pub price_range: Option<PriceRange>,
    pub title: Option<String>,
    pub status: Option<String>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        );
        let base = FilterState::default().merged(&FilterUpdate::new().date_range(range).status("1"));
        let merged = base.merged(&FilterUpdate::new().title("  shoe "));

        assert_eq!(merged.date_range, Some(range));
        assert_eq!(merged.status.as_deref(), Some("1"));
        assert_eq!(merged.title.as_deref(), Some("shoe"));
    }

    #[test]
    fn test_empty_values_clear_constraint() {
        let base = FilterState::default().merged(&FilterUpdate::new().title("shoe").status("0"));
        let cleared = base.merged(&FilterUpdate::new().title("   ").status(""));

        assert_eq!(cleared, FilterState::default());
    }
}
