//! Query string generation.
//!
//! The backend speaks json-server style parameters: `_sort`, `_order`,
//! `_start`, `_end`, plus `from`/`to`, `price_gte`/`price_lte`,
//! `title_like` and `status` filters.

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use super::{DateRange, FilterState, PageWindow, SortState};

/// Everything needed to request one page of table rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub sort: SortState,
    pub window: PageWindow,
    pub filters: FilterState,
}

impl TableQuery {
    /// Query parameters, in a stable order. Empty filters are omitted.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("_sort", self.sort.column.clone()),
            ("_order", self.sort.direction.to_string()),
            ("_start", self.window.offset().to_string()),
            ("_end", self.window.end().to_string()),
        ];

        if let Some(range) = &self.filters.date_range {
            params.extend(date_range_params(range));
        }
        if let Some(price) = &self.filters.price_range {
            params.push(("price_gte", price.from.to_string()));
            params.push(("price_lte", price.to.to_string()));
        }
        if let Some(title) = &self.filters.title {
            params.push(("title_like", title.clone()));
        }
        if let Some(status) = &self.filters.status {
            params.push(("status", status.clone()));
        }

        params
    }

    /// `base` with this query's parameters set on it.
    pub fn to_url(&self, base: &Url) -> Url {
        with_params(base, &self.params())
    }
}

/// `from` / `to` parameters for a date range.
pub fn date_range_params(range: &DateRange) -> [(&'static str, String); 2] {
    [("from", iso_timestamp(&range.from)), ("to", iso_timestamp(&range.to))]
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Copy of `base` with each parameter set, replacing any existing value
/// under the same key. Unrelated parameters already on `base` are kept.
pub fn with_params(base: &Url, params: &[(&'static str, String)]) -> Url {
    let mut url = base.clone();
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| !params.iter().any(|(name, _)| *name == *key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::query::{Direction, FilterUpdate, PriceRange};

    fn base() -> Url {
        Url::parse("http://localhost:3001/api/rest/products").unwrap()
    }

    fn query(filters: FilterState) -> TableQuery {
        TableQuery {
            sort: SortState {
                column: "title".into(),
                direction: Direction::Asc,
            },
            window: PageWindow::first(30).unwrap(),
            filters,
        }
    }

    #[test]
    fn test_sort_and_window_only() {
        let url = query(FilterState::default()).to_url(&base());
        assert_eq!(url.query(), Some("_sort=title&_order=asc&_start=0&_end=30"));
    }

    #[test]
    fn test_all_filters() {
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        );
        let filters = FilterState::default().merged(
            &FilterUpdate::new()
                .date_range(range)
                .price_range(PriceRange::new(10, 250))
                .title("red shoe")
                .status("1"),
        );

        let params = query(filters).params();
        let names: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            vec![
                "_sort", "_order", "_start", "_end", "from", "to", "price_gte", "price_lte",
                "title_like", "status"
            ]
        );
        assert_eq!(params[4].1, "2024-01-01T00:00:00.000Z");
        assert_eq!(params[5].1, "2024-03-01T12:30:00.000Z");
        assert_eq!(params[6].1, "10");
        assert_eq!(params[7].1, "250");
        assert_eq!(params[8].1, "red shoe");
    }

    #[test]
    fn test_existing_params_are_replaced_not_duplicated() {
        let base = Url::parse("http://localhost/api?embed=category&_sort=price").unwrap();
        let url = query(FilterState::default()).to_url(&base);

        assert_eq!(
            url.query(),
            Some("embed=category&_sort=title&_order=asc&_start=0&_end=30")
        );
    }
}
