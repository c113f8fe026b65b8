//! Background extraction dispatch
//!
//! Extraction is a plain synchronous function; this worker lets a trigger
//! source (timer, hotkey listener, manual call) fire it without blocking.
//! Triggers go through a one-slot queue: at most one extraction runs and at
//! most one more is pending, and anything beyond that is dropped, so a
//! single result slot never races overlapping captures.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::Mutex;
use tracing::debug;

use crate::pipeline::Extraction;

/// Runs extractions on a dedicated thread, keeping the latest result
pub struct ExtractionWorker {
    trigger_tx: Option<Sender<()>>,
    latest: Arc<Mutex<Option<Extraction>>>,
    handle: Option<JoinHandle<()>>,
}

impl ExtractionWorker {
    /// Spawn the worker around an extraction job
    pub fn spawn<F>(job: F) -> Self
    where
        F: Fn() -> Extraction + Send + 'static,
    {
        let (trigger_tx, trigger_rx) = bounded::<()>(1);
        let latest = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&latest);

        let handle = thread::spawn(move || {
            while trigger_rx.recv().is_ok() {
                debug!("extraction triggered");
                let extraction = job();
                *slot.lock() = Some(extraction);
            }
            debug!("extraction worker shutting down");
        });

        Self {
            trigger_tx: Some(trigger_tx),
            latest,
            handle: Some(handle),
        }
    }

    /// Request an extraction. Returns false when the one-slot trigger queue
    /// is already occupied and this trigger was dropped.
    pub fn trigger(&self) -> bool {
        let Some(tx) = &self.trigger_tx else {
            return false;
        };
        match tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                debug!("extraction trigger already pending; ignoring");
                false
            }
            Err(TrySendError::Disconnected(())) => false,
        }
    }

    /// Most recent completed extraction, if any
    pub fn latest(&self) -> Option<Extraction> {
        self.latest.lock().clone()
    }
}

impl Drop for ExtractionWorker {
    fn drop(&mut self) {
        // Closing the channel lets the thread fall out of its recv loop
        self.trigger_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
