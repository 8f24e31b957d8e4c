//! An in-memory driver that records lifecycle events instead of talking to a
//! real store. Used to observe connection reuse and release behavior through
//! the public surface.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sql_valet::{RawRows, RowValues, SqlConnection, SqlDriver, SqlValetError};

/// Statement text that makes the recording connection fail.
pub const POISON: &str = "POISON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Execute(String),
    Query(String),
    Commit,
    Rollback,
    Close,
}

#[derive(Default)]
pub struct RecordingDriver {
    connects: AtomicUsize,
    closes: Arc<AtomicUsize>,
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingDriver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlDriver for RecordingDriver {
    async fn connect(&self, _uri: &str) -> Result<Box<dyn SqlConnection>, SqlValetError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingConnection {
            events: self.events.clone(),
            closes: self.closes.clone(),
        }))
    }
}

pub struct RecordingConnection {
    events: Arc<Mutex<Vec<Event>>>,
    closes: Arc<AtomicUsize>,
}

impl RecordingConnection {
    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl SqlConnection for RecordingConnection {
    async fn query(
        &mut self,
        text: &str,
        _params: &[RowValues],
    ) -> Result<RawRows, SqlValetError> {
        if text == POISON {
            return Err(SqlValetError::ExecutionError("poisoned statement".into()));
        }
        self.record(Event::Query(text.to_string()));
        Ok(RawRows {
            columns: vec!["echo".into()],
            rows: vec![vec![RowValues::Text(text.to_string())]],
        })
    }

    async fn execute(&mut self, text: &str, _params: &[RowValues]) -> Result<u64, SqlValetError> {
        if text == POISON {
            return Err(SqlValetError::ExecutionError("poisoned statement".into()));
        }
        self.record(Event::Execute(text.to_string()));
        Ok(1)
    }

    async fn commit(&mut self) -> Result<(), SqlValetError> {
        self.record(Event::Commit);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SqlValetError> {
        self.record(Event::Rollback);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SqlValetError> {
        self.record(Event::Close);
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
