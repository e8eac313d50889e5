// Query option encoding.
// Shared pagination option structs and the helper that appends them to request paths.

use serde::{Serialize, Serializer};

use crate::error::Result;

/// Page-number pagination, accepted by most list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

/// Cursor pagination, used by deliveries, audit logs and alert listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListCursorOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Sort direction shared by many list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Append the URL-encoded form of `opts` to `path`.
///
/// `None` fields are skipped by the option structs themselves; an options
/// value that encodes to nothing leaves `path` untouched.
pub fn add_options<O: Serialize + ?Sized>(path: &str, opts: Option<&O>) -> Result<String> {
    let Some(opts) = opts else {
        return Ok(path.to_string());
    };

    let query = serde_urlencoded::to_string(opts)?;
    if query.is_empty() {
        return Ok(path.to_string());
    }

    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", path, separator, query))
}

/// Serialize a list as a single comma-joined value (`labels=bug,ui`).
pub fn comma_separated<S, T>(values: &[T], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<str>,
{
    let joined = values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}
