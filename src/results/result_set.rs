use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::row::Row;
use crate::driver::RawRows;

/// The ordered rows returned by one statement.
///
/// An empty set means the statement ran successfully and matched nothing; it
/// is distinct from [`crate::QueryOutcome::Failed`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// The mapped rows, in the order the store returned them.
    pub rows: Vec<Row>,
    column_names: Option<Arc<Vec<String>>>,
}

impl ResultSet {
    /// Map raw driver output into name-addressable rows.
    ///
    /// Column names are stored once and shared by every row. When the raw row
    /// list is empty the column list is never consulted, since some drivers report
    /// no description at all for a zero-row result.
    #[must_use]
    pub fn from_raw(raw: RawRows) -> Self {
        if raw.rows.is_empty() {
            return Self::default();
        }

        let column_names = Arc::new(raw.columns);
        let column_index: Arc<HashMap<String, usize>> = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect(),
        );

        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(column_names.clone(), column_index.clone(), values))
            .collect();

        Self {
            rows,
            column_names: Some(column_names),
        }
    }

    /// The column names shared by this set's rows, if any row was returned.
    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the whole set as a JSON array of objects keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(
            self.rows
                .iter()
                .map(|row| JsonValue::Object(row.to_json_map()))
                .collect(),
        )
    }
}
