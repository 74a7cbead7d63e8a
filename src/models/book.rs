//! Book model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Five groups of digits separated by a hyphen or a space.
/// Searched, not anchored: a match anywhere in the value is accepted.
static ISBN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]*[-| ][0-9]*[-| ][0-9]*[-| ][0-9]*[-| ][0-9]*")
        .expect("ISBN pattern is a valid regex")
});

/// Book record, keyed by ISBN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Natural key, e.g. `978-0-13-235088-4`
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(regex(path = *ISBN_PATTERN, message = "Value was not a valid ISBN-13"))]
    pub isbn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "'Title' must not be empty."))]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "'ShortDescription' must not be empty."))]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1, message = "'PageCount' must be greater than '0'."))]
    pub page_count: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "'Author' must not be empty."))]
    pub author: String,
    #[serde(deserialize_with = "deserialize_release_date")]
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T00:00:00")]
    pub release_date: NaiveDateTime,
}

/// Query parameters for `GET /books`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring matched against titles
    pub search_term: Option<String>,
}

/// A single rule violation, in the shape returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

impl ValidationFailure {
    pub fn new(property_name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            error_message: error_message.into(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

/// Missing and `null` values both become the type's default, so the
/// validator reports them like empty ones.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `2024-01-01T00:00:00`, RFC 3339 (normalized to UTC) or a bare date.
fn deserialize_release_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_release_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid releaseDate '{}', expected ISO-8601", raw))
    })
}

fn parse_release_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
