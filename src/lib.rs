//! Minimal convenience layer over SQL drivers.
//!
//! Three ways to run statements against one backing store:
//!
//! - [`SqlValet::execute`]: open a connection, run one statement, optionally
//!   commit, always close before returning.
//! - [`SqlValet::submit`] plus [`SqlValet::commit`] / [`SqlValet::close`] /
//!   [`SqlValet::rollback`]: hold one connection open across calls until
//!   explicitly committed or closed.
//! - [`SqlValet::execute_many`]: run an ordered list of independent statements
//!   concurrently, each on its own connection, collecting outcomes (or
//!   per-item failures) in input order.
//!
//! Store-level failures never raise: they are logged and absorbed into
//! [`QueryOutcome::Failed`], so callers check the outcome value. Only
//! caller-contract violations (malformed batch input, commit+close both set,
//! lifecycle calls on an idle session) come back as [`SqlValetError`].

mod client;
mod error;
mod executor;
mod session;
mod types;

pub mod driver;
pub mod prelude;
pub mod results;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use client::SqlValet;
pub use driver::{RawRows, SqlConnection, SqlDriver};
pub use error::SqlValetError;
pub use results::{QueryOutcome, ResultSet, Row};
pub use session::BatchStep;
pub use types::{QuerySpec, RowValues};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDriver;
