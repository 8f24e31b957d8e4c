// SQLite adapter - the bundled SqlDriver implementation over rusqlite.
//
// Split into sub-modules:
// - driver: connection lifecycle and the blocking-work hop off the runtime
// - params: value conversion between valet and rusqlite types
// - query: raw row extraction from a prepared statement

pub mod driver;
pub mod params;
pub mod query;

pub use driver::{SqliteConnection, SqliteDriver};
pub use params::{row_value_to_sqlite_value, sqlite_value_to_row_value};
pub use query::build_raw_rows;
