use async_trait::async_trait;
use tokio::task;

use super::params::convert_params;
use super::query::build_raw_rows;
use crate::driver::{RawRows, SqlConnection, SqlDriver};
use crate::error::SqlValetError;
use crate::types::RowValues;

/// The bundled [`SqlDriver`] over `rusqlite`.
///
/// `SQLite` is a single-writer store: concurrent connections from
/// [`crate::SqlValet::execute_many`] can read in parallel but will contend on
/// writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl SqliteDriver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SqlDriver for SqliteDriver {
    async fn connect(&self, uri: &str) -> Result<Box<dyn SqlConnection>, SqlValetError> {
        let path = uri.to_string();
        let conn = task::spawn_blocking(move || -> Result<rusqlite::Connection, SqlValetError> {
            let conn = rusqlite::Connection::open(path)?;
            // Every connection gets a deferred transaction scope: writes
            // become durable only on COMMIT, and closing without one
            // discards them.
            conn.execute_batch("BEGIN DEFERRED")?;
            Ok(conn)
        })
        .await
        .map_err(task_error)??;

        tracing::debug!(uri, "sqlite connection opened");
        Ok(Box::new(SqliteConnection { conn: Some(conn) }))
    }
}

/// One open `rusqlite` connection.
///
/// `rusqlite` calls block, so each operation moves the owned connection onto a
/// blocking worker and takes it back when the work is done. The `Option` is
/// `None` only mid-hop or after `close`.
pub struct SqliteConnection {
    conn: Option<rusqlite::Connection>,
}

impl SqliteConnection {
    async fn with_conn<R, F>(&mut self, func: F) -> Result<R, SqlValetError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlValetError> + Send + 'static,
        R: Send + 'static,
    {
        let mut conn = self.conn.take().ok_or_else(|| {
            SqlValetError::ConnectionError("sqlite connection already released".into())
        })?;
        let (conn, result) = task::spawn_blocking(move || {
            let result = func(&mut conn);
            (conn, result)
        })
        .await
        .map_err(task_error)?;
        self.conn = Some(conn);
        result
    }
}

#[async_trait]
impl SqlConnection for SqliteConnection {
    async fn query(
        &mut self,
        text: &str,
        params: &[RowValues],
    ) -> Result<RawRows, SqlValetError> {
        let text = text.to_string();
        let values = convert_params(params);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&text)?;
            build_raw_rows(&mut stmt, values)
        })
        .await
    }

    async fn execute(&mut self, text: &str, params: &[RowValues]) -> Result<u64, SqlValetError> {
        let text = text.to_string();
        let values = convert_params(params);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&text)?;
            let affected = stmt.execute(rusqlite::params_from_iter(values))?;
            Ok(affected as u64)
        })
        .await
    }

    async fn commit(&mut self) -> Result<(), SqlValetError> {
        self.with_conn(|conn| {
            conn.execute_batch("COMMIT")?;
            Ok(())
        })
        .await
    }

    async fn rollback(&mut self) -> Result<(), SqlValetError> {
        self.with_conn(|conn| {
            conn.execute_batch("ROLLBACK")?;
            Ok(())
        })
        .await
    }

    async fn close(&mut self) -> Result<(), SqlValetError> {
        let conn = self.conn.take().ok_or_else(|| {
            SqlValetError::ConnectionError("sqlite connection already released".into())
        })?;
        // SQLite rolls back any transaction still open on the handle.
        task::spawn_blocking(move || conn.close().map_err(|(_conn, err)| err.into()))
            .await
            .map_err(task_error)?
    }
}

fn task_error(err: task::JoinError) -> SqlValetError {
    SqlValetError::ExecutionError(format!("sqlite worker task failed: {err}"))
}
