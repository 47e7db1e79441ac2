//! Query-string parameter types shared across handlers.
//!
//! Numeric and boolean fields go through `DisplayFromStr` because flattened
//! query structs reach serde as plain strings. Array-valued filters arrive
//! as one comma-separated value (`categories=1,2,3`).

use std::str::FromStr;

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::error::AppError;

/// Zero-based offset pagination: `from` is an offset into the result set,
/// `size` a positive page size.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub from: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<i64>,
}

impl PaginationParams {
    /// Validates the parameters and returns `(offset, limit)`.
    ///
    /// # Defaults
    ///
    /// - `from`: 0
    /// - `size`: 10
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let from = self.from.unwrap_or(0);
        let size = self.size.unwrap_or(10);

        if from < 0 {
            return Err(AppError::bad_request("from must be zero or positive"));
        }
        if size <= 0 {
            return Err(AppError::bad_request("size must be positive"));
        }

        Ok((from, size))
    }
}

/// Parses a comma-separated list of values, e.g. `categories=1,2,3`.
pub fn parse_csv<T: FromStr>(value: &Option<String>, name: &str) -> Result<Option<Vec<T>>, AppError> {
    let Some(value) = value else {
        return Ok(None);
    };

    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<T>()
                .map_err(|_| AppError::bad_request(format!("Invalid {name} value: {item}")))
        })
        .collect::<Result<Vec<T>, AppError>>()
        .map(Some)
}

/// Public event search parameters.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchParams {
    pub text: Option<String>,
    pub categories: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub paid: Option<bool>,

    pub range_start: Option<String>,
    pub range_end: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub only_available: Option<bool>,

    pub sort: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub lat: Option<f64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Admin event search parameters.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSearchParams {
    pub users: Option<String>,
    pub states: Option<String>,
    pub categories: Option<String>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub lat: Option<f64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Compilation listing parameters.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct CompilationSearchParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub pinned: Option<bool>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Admin user listing parameters.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub ids: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Required coordinates for the location event search.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct CoordinateParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub lat: Option<f64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub lon: Option<f64>,
}

impl CoordinateParams {
    pub fn resolve(&self) -> Result<(f64, f64), AppError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(AppError::bad_request("lat and lon are required")),
        }
    }
}

/// `eventId` parameter of the request submission endpoint.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIdParam {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub event_id: Option<i64>,
}

impl EventIdParam {
    pub fn resolve(&self) -> Result<i64, AppError> {
        self.event_id
            .ok_or_else(|| AppError::bad_request("eventId is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(from: Option<i64>, size: Option<i64>) -> PaginationParams {
        PaginationParams { from, size }
    }

    #[test]
    fn pagination_defaults_to_first_ten() {
        assert_eq!(pagination(None, None).resolve().unwrap(), (0, 10));
    }

    #[test]
    fn pagination_rejects_negative_offset() {
        assert!(pagination(Some(-1), None).resolve().is_err());
    }

    #[test]
    fn pagination_rejects_non_positive_size() {
        assert!(pagination(None, Some(0)).resolve().is_err());
        assert!(pagination(None, Some(-5)).resolve().is_err());
    }

    #[test]
    fn csv_parses_id_lists() {
        let parsed: Option<Vec<i64>> = parse_csv(&Some("1,2,3".to_string()), "categories").unwrap();
        assert_eq!(parsed, Some(vec![1, 2, 3]));
    }

    #[test]
    fn csv_rejects_garbage() {
        let parsed: Result<Option<Vec<i64>>, _> = parse_csv(&Some("1,x".to_string()), "categories");
        assert!(parsed.is_err());
    }

    #[test]
    fn csv_passes_absent_values_through() {
        let parsed: Option<Vec<i64>> = parse_csv(&None, "categories").unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn public_params_parse_from_query_string() {
        let params: PublicSearchParams = serde_urlencoded::from_str(
            "text=rust&categories=1,2&paid=true&onlyAvailable=true&sort=EVENT_DATE&from=0&size=20",
        )
        .unwrap();

        assert_eq!(params.text.as_deref(), Some("rust"));
        assert_eq!(params.paid, Some(true));
        assert_eq!(params.only_available, Some(true));
        assert_eq!(params.pagination.resolve().unwrap(), (0, 20));
    }
}
