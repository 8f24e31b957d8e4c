//! Ephemeral execution and the concurrent fan-out built on top of it.

use futures_util::future::join_all;

use crate::driver::{SqlConnection, SqlDriver};
use crate::error::SqlValetError;
use crate::results::{QueryOutcome, ResultSet};
use crate::types::QuerySpec;

/// Run one statement on a connection opened for this call only.
///
/// The connection is released on every exit path before this returns; a close
/// failure after a successful statement still counts as a failure of the
/// whole operation.
pub(crate) async fn run_statement(
    driver: &dyn SqlDriver,
    uri: &str,
    spec: &QuerySpec,
) -> Result<QueryOutcome, SqlValetError> {
    let mut conn = driver.connect(uri).await?;
    let result = run_on_connection(conn.as_mut(), spec).await;
    let released = conn.close().await;
    let outcome = result?;
    released?;
    Ok(outcome)
}

async fn run_on_connection(
    conn: &mut dyn SqlConnection,
    spec: &QuerySpec,
) -> Result<QueryOutcome, SqlValetError> {
    if spec.commit {
        // Write path: no row retrieval, callers get an acknowledgement only.
        conn.execute(&spec.query, &spec.params).await?;
        conn.commit().await?;
        Ok(QueryOutcome::Ack)
    } else {
        let raw = conn.query(&spec.query, &spec.params).await?;
        Ok(QueryOutcome::Rows(ResultSet::from_raw(raw)))
    }
}

/// Like [`run_statement`], but absorbs store-level errors into
/// [`QueryOutcome::Failed`] after logging them.
pub(crate) async fn run_statement_logged(
    driver: &dyn SqlDriver,
    uri: &str,
    spec: &QuerySpec,
) -> QueryOutcome {
    match run_statement(driver, uri, spec).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(query = %spec.query, error = %err, "statement execution failed");
            QueryOutcome::Failed
        }
    }
}

/// Run every spec concurrently, each on its own connection, and gather the
/// outcomes in input order.
///
/// `join_all` polls all futures together and yields their results positionally,
/// so `result[i]` always corresponds to `specs[i]` no matter which statement
/// finishes first, and a failed item never cancels its siblings.
pub(crate) async fn fan_out(
    driver: &dyn SqlDriver,
    uri: &str,
    specs: &[QuerySpec],
) -> Vec<QueryOutcome> {
    let jobs = specs
        .iter()
        .map(|spec| run_statement_logged(driver, uri, spec));
    join_all(jobs).await
}
