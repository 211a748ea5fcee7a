//! Response models.
//!
//! Table rows stay opaque JSON objects keyed by column id; chart series are
//! objects mapping a date key to a number.

use serde_json::Value;

use crate::error::ApiError;

/// One table row: column id → value.
pub type Row = serde_json::Map<String, Value>;

/// Decode a JSON array of row objects. An empty array is a valid result.
pub fn decode_rows(body: Value) -> Result<Vec<Row>, ApiError> {
    let Value::Array(items) = body else {
        return Err(ApiError::parse(format!(
            "expected an array of rows, got {}",
            type_name(&body)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(ApiError::parse(format!(
                "row {index} is {}, expected an object",
                type_name(&other)
            ))),
        })
        .collect()
}

/// A chart series point: date key and value.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub key: String,
    pub value: f64,
}

/// Decode a `{ "2024-01-01": 12, ... }` object into points ordered by key.
pub fn decode_series(body: Value) -> Result<Vec<SeriesPoint>, ApiError> {
    let Value::Object(entries) = body else {
        return Err(ApiError::parse(format!(
            "expected an object series, got {}",
            type_name(&body)
        )));
    };

    entries
        .into_iter()
        .map(|(key, value)| {
            let value = value
                .as_f64()
                .ok_or_else(|| ApiError::parse(format!("series value for {key} is not a number")))?;
            Ok(SeriesPoint { key, value })
        })
        .collect()
}

/// Largest numeric `field` across rows.
pub fn max_field(rows: &[Row], field: &str) -> Option<f64> {
    rows.iter()
        .filter_map(|row| row.get(field).and_then(Value::as_f64))
        .reduce(f64::max)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_rows() {
        let rows = decode_rows(json!([{"id": "a", "price": 10}, {"id": "b", "price": 20}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["price"], json!(20));
    }

    #[test]
    fn test_decode_rows_empty_is_ok() {
        assert!(decode_rows(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rows_rejects_non_array() {
        let err = decode_rows(json!({"error": "nope"})).unwrap_err();
        assert!(err.to_string().contains("expected an array"));

        let err = decode_rows(json!([1])).unwrap_err();
        assert!(err.to_string().contains("row 0 is a number"));
    }

    #[test]
    fn test_decode_series_sorted_by_key() {
        let points = decode_series(json!({"2024-01-02": 5, "2024-01-01": 3})).unwrap();
        let keys: Vec<_> = points.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_max_field() {
        let rows = decode_rows(json!([{"price": 10}, {"price": 3999}, {"title": "x"}])).unwrap();
        assert_eq!(max_field(&rows, "price"), Some(3999.0));
        assert_eq!(max_field(&[], "price"), None);
    }
}
