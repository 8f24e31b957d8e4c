use rusqlite::Statement;
use rusqlite::types::Value;

use super::params::sqlite_value_to_row_value;
use crate::driver::RawRows;
use crate::error::SqlValetError;

/// Run a prepared statement and collect its entire output as raw rows.
///
/// Column names are captured before stepping; a statement that yields no rows
/// (or has no columns at all, like a DML statement) comes back with an empty
/// row list for the mapper to short-circuit on.
///
/// # Errors
/// Returns `SqlValetError` if binding, stepping, or value extraction fails.
pub fn build_raw_rows(stmt: &mut Statement, params: Vec<Value>) -> Result<RawRows, SqlValetError> {
    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = columns.len();

    let mut raw = RawRows {
        columns,
        rows: Vec::new(),
    };

    let mut rows_iter = stmt.query(rusqlite::params_from_iter(params))?;
    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            let value: Value = row.get(idx)?;
            values.push(sqlite_value_to_row_value(value));
        }
        raw.rows.push(values);
    }

    Ok(raw)
}
