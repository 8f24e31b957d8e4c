use std::sync::Arc;

use crate::driver::SqlDriver;
use crate::error::SqlValetError;
use crate::executor::{fan_out, run_statement_logged};
use crate::results::QueryOutcome;
use crate::session::BatchState;
use crate::types::QuerySpec;

/// The caller-facing surface: a driver handle, a target URI, and the state of
/// the one batch session this valet may hold open.
///
/// One-shot statements go through [`execute`](Self::execute) (connection
/// opened and closed within the call) or [`execute_many`](Self::execute_many)
/// (the same, concurrently per statement). Multi-statement transactions go
/// through [`submit`](Self::submit) and the session lifecycle methods.
///
/// A valet is single-caller: the batch session's connection is exclusively
/// owned and the `&mut self` lifecycle methods enforce one logical user at a
/// time.
pub struct SqlValet {
    driver: Arc<dyn SqlDriver>,
    uri: String,
    pub(crate) batch: BatchState,
}

impl SqlValet {
    /// Create a valet over any [`SqlDriver`] implementation.
    pub fn new(driver: Arc<dyn SqlDriver>, uri: impl Into<String>) -> Self {
        Self {
            driver,
            uri: uri.into(),
            batch: BatchState::Idle,
        }
    }

    /// Create a valet over the bundled `SQLite` adapter.
    #[cfg(feature = "sqlite")]
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self::new(Arc::new(crate::sqlite::SqliteDriver::new()), path)
    }

    /// The URI every connection of this valet is opened against.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub(crate) fn driver(&self) -> &dyn SqlDriver {
        self.driver.as_ref()
    }

    /// Run one statement on a connection scoped to this call.
    ///
    /// With `commit` unset the statement's rows come back as
    /// [`QueryOutcome::Rows`] (an empty set when nothing matched); with
    /// `commit` set the statement executes, the transaction commits, and the
    /// caller gets [`QueryOutcome::Ack`] with no rows retrieved. Store-level
    /// failures are logged and absorbed into [`QueryOutcome::Failed`]; this
    /// method never raises them.
    pub async fn execute(&self, spec: QuerySpec) -> QueryOutcome {
        run_statement_logged(self.driver(), &self.uri, &spec).await
    }

    /// Run every spec concurrently, each on its own connection, and return the
    /// outcomes in input order.
    ///
    /// `result[i]` corresponds to `specs[i]` regardless of completion order,
    /// and one item's failure surfaces as [`QueryOutcome::Failed`] at its
    /// position only; siblings are neither affected nor cancelled. All items
    /// complete before this returns.
    ///
    /// Statements must be independent: no ordering guarantee is given on when
    /// they execute relative to each other, so dependent writes don't belong
    /// here. And since every item opens its own connection, stores that accept
    /// only one connection at a time (single-writer embedded stores in
    /// particular) will degrade toward serialized execution or contend.
    ///
    /// # Errors
    /// Returns [`SqlValetError::InvalidRequest`] before any statement runs if
    /// a spec's `query` text is empty: that's a malformed batch, not a
    /// runtime failure.
    pub async fn execute_many(
        &self,
        specs: &[QuerySpec],
    ) -> Result<Vec<QueryOutcome>, SqlValetError> {
        for (position, spec) in specs.iter().enumerate() {
            if spec.query.trim().is_empty() {
                return Err(SqlValetError::InvalidRequest(format!(
                    "spec at position {position} has empty query text"
                )));
            }
        }
        Ok(fan_out(self.driver(), &self.uri, specs).await)
    }
}

impl std::fmt::Debug for SqlValet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlValet")
            .field("uri", &self.uri)
            .field("batch_open", &self.batch.is_open())
            .finish_non_exhaustive()
    }
}
