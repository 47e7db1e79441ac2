//! Serde helpers for the platform's `yyyy-MM-dd HH:mm:ss` datetime format.

use chrono::NaiveDateTime;

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `#[serde(with = "date_format")]` for required datetime fields.
pub mod date_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "option_date_format")]` for optional datetime fields.
pub mod option_date_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(&s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Parses a query-string datetime in the platform format.
pub fn parse(value: &str) -> Result<NaiveDateTime, crate::error::AppError> {
    NaiveDateTime::parse_from_str(value, FORMAT).map_err(|_| {
        crate::error::AppError::bad_request(format!(
            "Invalid datetime {value}, expected yyyy-MM-dd HH:mm:ss"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "date_format")]
        value: NaiveDateTime,
    }

    #[test]
    fn round_trips_platform_format() {
        let json = r#"{"value":"2026-06-01 18:30:00"}"#;
        let wrapper: Wrapper = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&wrapper).unwrap(), json);
    }

    #[test]
    fn rejects_other_formats() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"2026-06-01T18:30:00Z"}"#).is_err());
        assert!(parse("not-a-date").is_err());
    }
}
