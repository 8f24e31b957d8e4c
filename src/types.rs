use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values that can be bound as statement parameters or read back from a row.
///
/// One enum shared by every execution path so callers never touch
/// driver-specific types:
/// ```rust
/// use sql_valet::RowValues;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
///
/// The serde representation is untagged, so a JSON batch document can carry
/// plain scalars (`1`, `1.5`, `"alice"`, `true`, `null`) as parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValues {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// Binary data
    Blob(Vec<u8>),
    /// JSON value
    JSON(JsonValue),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

impl From<&RowValues> for JsonValue {
    fn from(value: &RowValues) -> Self {
        match value {
            RowValues::Null => JsonValue::Null,
            RowValues::Bool(b) => JsonValue::from(*b),
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => JsonValue::from(*f),
            RowValues::Text(s) => JsonValue::from(s.clone()),
            RowValues::Timestamp(dt) => JsonValue::from(dt.format("%F %T%.f").to_string()),
            RowValues::Blob(bytes) => {
                JsonValue::from(bytes.iter().map(|b| JsonValue::from(*b)).collect::<Vec<_>>())
            }
            RowValues::JSON(jval) => jval.clone(),
        }
    }
}

/// One unit of work: statement text, bind parameters, and whether the
/// statement commits.
///
/// This is the element type accepted by both
/// [`execute`](crate::SqlValet::execute) and
/// [`execute_many`](crate::SqlValet::execute_many). Omitted `params` and
/// `commit` fields deserialize to their defaults, so a JSON batch document
/// only has to spell out the statement text:
///
/// ```rust
/// use sql_valet::QuerySpec;
///
/// let specs: Vec<QuerySpec> =
///     serde_json::from_str(r#"[{"query": "SELECT 1"}]"#).unwrap();
/// assert!(specs[0].params.is_empty());
/// assert!(!specs[0].commit);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// The SQL statement text
    pub query: String,
    /// The parameters to be bound to the statement
    #[serde(default)]
    pub params: Vec<RowValues>,
    /// Whether to commit instead of fetching rows
    #[serde(default)]
    pub commit: bool,
}

impl QuerySpec {
    /// Create a new `QuerySpec` with the given statement text and parameters.
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
            commit: false,
        }
    }

    /// Create a new `QuerySpec` with no parameters.
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
            commit: false,
        }
    }

    /// Mark this statement as a write: execute, commit, and skip row retrieval.
    #[must_use]
    pub fn and_commit(mut self) -> Self {
        self.commit = true;
        self
    }
}
