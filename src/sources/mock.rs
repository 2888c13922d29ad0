//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::Citer;
use crate::sources::{CiterSource, SourceError};

/// A mock source for testing that returns predefined citers and counts calls.
#[derive(Debug, Default)]
pub struct MockSource {
    citers: Mutex<Vec<Citer>>,
    fail_with: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new, empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source returning `citers`.
    pub fn with_citers(citers: Vec<Citer>) -> Self {
        let source = Self::new();
        source.set_citers(citers);
        source
    }

    /// Set the citers to return.
    pub fn set_citers(&self, citers: Vec<Citer>) {
        let mut guard = self.citers.lock().unwrap();
        *guard = citers;
    }

    /// Make every subsequent call fail with `message`.
    pub fn set_failure(&self, message: impl Into<String>) {
        let mut guard = self.fail_with.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Number of times `list_citers` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CiterSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn list_citers(&self) -> Result<Vec<Citer>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(SourceError::Other(message));
        }
        Ok(self.citers.lock().unwrap().clone())
    }
}
