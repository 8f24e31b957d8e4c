//! The held-open batch session: a two-state machine over one owned connection.

use std::mem;

use crate::client::SqlValet;
use crate::driver::SqlConnection;
use crate::error::SqlValetError;
use crate::results::QueryOutcome;
use crate::types::RowValues;

/// Lifecycle of the connection a batch session holds.
///
/// `Idle` holds nothing; `Open` owns the live connection. Transitions happen
/// only through [`SqlValet::submit`], [`SqlValet::commit`],
/// [`SqlValet::close`], and [`SqlValet::rollback`]; the session never tears a
/// connection down implicitly.
pub(crate) enum BatchState {
    Idle,
    Open(Box<dyn SqlConnection>),
}

impl BatchState {
    pub(crate) fn is_open(&self) -> bool {
        matches!(self, BatchState::Open(_))
    }
}

/// One step of a batch session: an optional statement plus lifecycle flags.
///
/// `commit` and `close` are mutually exclusive; `commit` implies the close.
/// Batch mode is write-oriented: a step's statement never returns rows.
#[derive(Debug, Clone, Default)]
pub struct BatchStep {
    /// Statement to execute, if any
    pub query: Option<String>,
    /// Parameters bound to the statement
    pub params: Vec<RowValues>,
    /// Commit the session's transaction after the statement, then close
    pub commit: bool,
    /// Close the session's connection without committing
    pub close: bool,
}

impl BatchStep {
    /// A step that executes one statement and leaves the session open.
    pub fn statement(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<RowValues>) -> Self {
        self.params = params;
        self
    }

    /// Commit (and therefore close) after this step's statement.
    #[must_use]
    pub fn and_commit(mut self) -> Self {
        self.commit = true;
        self
    }

    /// Close without committing after this step's statement.
    #[must_use]
    pub fn and_close(mut self) -> Self {
        self.close = true;
        self
    }

    /// A statement-less step that commits and closes the session.
    #[must_use]
    pub fn commit_only() -> Self {
        Self {
            commit: true,
            ..Self::default()
        }
    }

    /// A statement-less step that closes the session without committing.
    #[must_use]
    pub fn close_only() -> Self {
        Self {
            close: true,
            ..Self::default()
        }
    }
}

impl SqlValet {
    /// Run one batch step against the session's connection, opening it first
    /// if this is the session's first statement.
    ///
    /// Returns `Ok(QueryOutcome::Ack)` when the step applied and
    /// `Ok(QueryOutcome::Failed)` when the store rejected it; in the failure
    /// case the session state is left exactly as it was, and the caller
    /// recovers with an explicit [`close`](Self::close).
    ///
    /// # Errors
    /// Returns [`SqlValetError::InvalidRequest`] when `commit` and `close` are
    /// both set. That is the only error this method raises.
    pub async fn submit(&mut self, step: BatchStep) -> Result<QueryOutcome, SqlValetError> {
        if step.commit && step.close {
            return Err(SqlValetError::InvalidRequest(
                "choose commit or close, not both".into(),
            ));
        }
        match self.apply_step(&step).await {
            Ok(()) => Ok(QueryOutcome::Ack),
            Err(err) => {
                tracing::error!(error = %err, "batch step failed");
                Ok(QueryOutcome::Failed)
            }
        }
    }

    async fn apply_step(&mut self, step: &BatchStep) -> Result<(), SqlValetError> {
        if let Some(text) = &step.query {
            let conn = self.open_if_needed().await?;
            conn.execute(text, &step.params).await?;
        }

        let mut wants_close = step.close;
        if step.commit {
            match &mut self.batch {
                BatchState::Open(conn) => conn.commit().await?,
                BatchState::Idle => return Err(SqlValetError::NoConnection),
            }
            wants_close = true;
        }

        if wants_close {
            match mem::replace(&mut self.batch, BatchState::Idle) {
                BatchState::Open(mut conn) => {
                    if let Err(err) = conn.close().await {
                        // A failed release leaves the session exactly as it was.
                        self.batch = BatchState::Open(conn);
                        return Err(err);
                    }
                }
                BatchState::Idle => return Err(SqlValetError::NoConnection),
            }
        }

        Ok(())
    }

    /// Lazy `Idle -> Open` transition: connect only when a statement is about
    /// to be executed and nothing is open yet.
    async fn open_if_needed(&mut self) -> Result<&mut Box<dyn SqlConnection>, SqlValetError> {
        if !self.batch.is_open() {
            tracing::debug!(uri = %self.uri(), "opening batch connection");
            let conn = self.driver().connect(self.uri()).await?;
            self.batch = BatchState::Open(conn);
        }
        match &mut self.batch {
            BatchState::Open(conn) => Ok(conn),
            BatchState::Idle => Err(SqlValetError::NoConnection),
        }
    }

    /// Commit the session's transaction and release its connection.
    ///
    /// # Errors
    /// Returns [`SqlValetError::NoConnection`] when the session is idle, or
    /// the store's error when the commit or the release fails. A failed commit
    /// leaves the session open; once the commit has succeeded the session is
    /// idle even if the release then fails.
    pub async fn commit(&mut self) -> Result<(), SqlValetError> {
        match &mut self.batch {
            BatchState::Open(conn) => conn.commit().await?,
            BatchState::Idle => return Err(SqlValetError::NoConnection),
        }
        self.release().await
    }

    /// Release the session's connection without committing, discarding any
    /// uncommitted work.
    ///
    /// # Errors
    /// Returns [`SqlValetError::NoConnection`] when the session is idle, or
    /// the store's error when the release fails.
    pub async fn close(&mut self) -> Result<(), SqlValetError> {
        if !self.batch.is_open() {
            return Err(SqlValetError::NoConnection);
        }
        self.release().await
    }

    /// Roll back the session's transaction and release its connection.
    ///
    /// Mirrors [`commit`](Self::commit): on success the session transitions to
    /// idle and the next statement opens a fresh connection.
    ///
    /// # Errors
    /// Returns [`SqlValetError::NoConnection`] when the session is idle, or
    /// the store's error when the rollback or the release fails. A failed
    /// rollback leaves the session open.
    pub async fn rollback(&mut self) -> Result<(), SqlValetError> {
        match &mut self.batch {
            BatchState::Open(conn) => conn.rollback().await?,
            BatchState::Idle => return Err(SqlValetError::NoConnection),
        }
        self.release().await
    }

    async fn release(&mut self) -> Result<(), SqlValetError> {
        match mem::replace(&mut self.batch, BatchState::Idle) {
            BatchState::Open(mut conn) => conn.close().await,
            BatchState::Idle => Err(SqlValetError::NoConnection),
        }
    }
}
