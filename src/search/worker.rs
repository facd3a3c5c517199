//! Background search worker.
//!
//! The worker owns a FIFO queue of requests and runs one scan at a time on a
//! blocking thread, so the submitting task is never held up by the scan. A
//! request submitted while another is running waits its turn; nothing is
//! rejected or cancelled.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::protocol::{DonePayload, Response, SearchRequest};
use crate::search::progress::ProgressEvent;
use crate::search::scan::{ScanSettings, run_search};

/// Default number of requests that may wait behind the running one.
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Search worker has stopped")]
    Closed,

    #[error("Search worker panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Search(String),
}

struct Job {
    request: SearchRequest,
    events: mpsc::UnboundedSender<Response>,
}

/// Handle to a running worker.
pub struct SearchWorker {
    jobs: mpsc::Sender<Job>,
    handle: JoinHandle<()>,
}

impl SearchWorker {
    /// Start a worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(settings: ScanSettings, queue_depth: usize) -> Self {
        let (jobs, mut queue) = mpsc::channel::<Job>(queue_depth.max(1));

        let handle = tokio::spawn(async move {
            while let Some(Job { request, events }) = queue.recv().await {
                let progress = events.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    run_search(request, &settings, |event| {
                        // A dropped task only stops listening; the scan runs on.
                        let _ = progress.send(Response::Progress(event));
                    })
                })
                .await;

                let terminal = match outcome {
                    Ok(Ok(done)) => Response::Done(done),
                    Ok(Err(e)) => Response::Error(e.to_string()),
                    Err(e) => {
                        error!(error = %e, "Search scan panicked");
                        Response::Error(format!("Search failed unexpectedly: {e}"))
                    }
                };
                let _ = events.send(terminal);
            }
            debug!("Search worker stopped");
        });

        Self { jobs, handle }
    }

    /// Queue a request. Waits while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Closed` if the worker is no longer running.
    pub async fn submit(&self, request: SearchRequest) -> Result<SearchTask, WorkerError> {
        let (events, receiver) = mpsc::unbounded_channel();
        self.jobs
            .send(Job { request, events })
            .await
            .map_err(|_| WorkerError::Closed)?;
        Ok(SearchTask { events: receiver })
    }

    /// Stop accepting requests and wait for queued ones to finish.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Panicked` if the worker task panicked.
    pub async fn shutdown(self) -> Result<(), WorkerError> {
        drop(self.jobs);
        self.handle
            .await
            .map_err(|e| WorkerError::Panicked(e.to_string()))
    }
}

/// The events of one submitted request: progress, then exactly one
/// `done` or `error`.
pub struct SearchTask {
    events: mpsc::UnboundedReceiver<Response>,
}

impl SearchTask {
    /// Next message for this request, or `None` once the worker dropped it.
    pub async fn next_event(&mut self) -> Option<Response> {
        self.events.recv().await
    }

    /// Drive the request to its terminal message.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Search` with the scan's message on an `error`
    /// response, or `WorkerError::Closed` if the worker went away first.
    pub async fn wait(
        mut self,
        mut on_progress: impl FnMut(ProgressEvent),
    ) -> Result<DonePayload, WorkerError> {
        while let Some(event) = self.events.recv().await {
            match event {
                Response::Progress(progress) => on_progress(progress),
                Response::Done(done) => return Ok(done),
                Response::Error(message) => return Err(WorkerError::Search(message)),
            }
        }
        Err(WorkerError::Closed)
    }
}
