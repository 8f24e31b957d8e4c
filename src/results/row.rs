use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::types::RowValues;

/// A single row from a query result.
///
/// Column names are shared across every row of a result set; each row carries
/// its own values plus a shared name-to-index map for constant-time lookup.
#[derive(Debug, Clone)]
pub struct Row {
    column_names: Arc<Vec<String>>,
    values: Vec<RowValues>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    pub(crate) fn new(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get a value by column name, or `None` if the column doesn't exist.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.column_index
            .get(column_name)
            .and_then(|idx| self.values.get(*idx))
    }

    /// Get a value by column position.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    /// The column names, in result order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The row's values, positionally aligned with [`Self::column_names`].
    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    /// Render the row as a JSON object keyed by column name.
    #[must_use]
    pub fn to_json_map(&self) -> JsonMap<String, JsonValue> {
        self.column_names
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.clone(), JsonValue::from(value)))
            .collect()
    }
}

// The index map is derived from the column names, so equality only needs to
// look at names and values.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.values == other.values
    }
}
