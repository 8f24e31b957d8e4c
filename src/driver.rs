//! The capability seam between the valet and a backing store.
//!
//! Any store that can open a connection to a URI, run a parameterized
//! statement, and commit/roll back/close plugs in by implementing these two
//! traits. The bundled [`crate::sqlite`] adapter is one such implementation;
//! tests carry another that never touches a real database.

use async_trait::async_trait;

use crate::error::SqlValetError;
use crate::types::RowValues;

/// Raw output of a statement before mapping: ordered column names plus one
/// `Vec<RowValues>` per row, positionally aligned with the columns.
#[derive(Debug, Clone, Default)]
pub struct RawRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RowValues>>,
}

/// Opens connections to a backing store.
#[async_trait]
pub trait SqlDriver: Send + Sync {
    /// Open a new connection to the store at `uri`.
    ///
    /// The returned connection sits inside an open transaction scope: its
    /// writes become durable only after [`SqlConnection::commit`], and
    /// [`SqlConnection::close`] without a commit discards them.
    ///
    /// # Errors
    /// Returns `SqlValetError` if the store is unreachable or rejects the URI.
    async fn connect(&self, uri: &str) -> Result<Box<dyn SqlConnection>, SqlValetError>;
}

/// A single open connection to a backing store.
///
/// The handle owns whatever cursor state the store needs; callers hold at most
/// one and drive it from one task at a time (`&mut self` throughout).
#[async_trait]
pub trait SqlConnection: Send {
    /// Execute a statement with bound parameters and materialize its full
    /// result: column names plus every row.
    ///
    /// # Errors
    /// Returns `SqlValetError` if preparation, binding, or row retrieval fails.
    async fn query(&mut self, text: &str, params: &[RowValues])
    -> Result<RawRows, SqlValetError>;

    /// Execute a statement with bound parameters without retrieving rows.
    /// Returns the number of rows affected.
    ///
    /// # Errors
    /// Returns `SqlValetError` if preparation, binding, or execution fails.
    async fn execute(&mut self, text: &str, params: &[RowValues])
    -> Result<u64, SqlValetError>;

    /// Make the connection's pending writes durable.
    ///
    /// # Errors
    /// Returns `SqlValetError` if the store rejects the commit.
    async fn commit(&mut self) -> Result<(), SqlValetError>;

    /// Discard the connection's pending writes.
    ///
    /// # Errors
    /// Returns `SqlValetError` if the store rejects the rollback.
    async fn rollback(&mut self) -> Result<(), SqlValetError>;

    /// Release the connection. Pending uncommitted work is discarded.
    ///
    /// # Errors
    /// Returns `SqlValetError` if the handle was already released or the store
    /// fails to close it.
    async fn close(&mut self) -> Result<(), SqlValetError>;
}
