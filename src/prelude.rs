//! Convenient imports for common functionality.

pub use crate::client::SqlValet;
pub use crate::driver::{RawRows, SqlConnection, SqlDriver};
pub use crate::error::SqlValetError;
pub use crate::results::{QueryOutcome, ResultSet, Row};
pub use crate::session::BatchStep;
pub use crate::types::{QuerySpec, RowValues};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteDriver;
