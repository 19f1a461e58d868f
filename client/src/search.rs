//! Cancellation-aware search dispatch.
//!
//! Incremental typing fires a request per keystroke; a newer query must
//! cancel the in-flight one, and a result may only be published if its
//! request has not been superseded. Both guards are here: the previous task
//! is aborted, and results are tagged with a generation number checked
//! against the current one before publishing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::SearchApi;

/// A published search outcome, tagged with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub payload: Value,
}

/// Dispatches search requests and publishes only the freshest result.
pub struct SearchController {
    api: Arc<dyn SearchApi>,
    generation: Arc<AtomicU64>,
    inflight: Mutex<Option<JoinHandle<()>>>,
    results: watch::Sender<Option<SearchOutcome>>,
}

impl SearchController {
    /// Returns the controller and the receiver on which results arrive.
    pub fn new(api: Arc<dyn SearchApi>) -> (Self, watch::Receiver<Option<SearchOutcome>>) {
        let (results, receiver) = watch::channel(None);
        (
            SearchController {
                api,
                generation: Arc::new(AtomicU64::new(0)),
                inflight: Mutex::new(None),
                results,
            },
            receiver,
        )
    }

    /// Fire a search for `query`, superseding any in-flight request.
    pub fn submit(&self, query: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut inflight = self.inflight.lock().unwrap();
        if let Some(previous) = inflight.take() {
            previous.abort();
        }

        let api = self.api.clone();
        let current = self.generation.clone();
        let results = self.results.clone();
        let query = query.to_string();

        *inflight = Some(tokio::spawn(async move {
            let response = api.search(&query).await;

            // A newer submit may have raced past the abort; a stale result
            // must never overwrite a fresher one.
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(query, "discarding superseded search result");
                return;
            }

            match response {
                Ok(payload) => {
                    let _ = results.send(Some(SearchOutcome { query, payload }));
                }
                Err(err) => {
                    tracing::debug!(query, %err, "search failed");
                }
            }
        }));
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.lock().unwrap().take() {
            handle.abort();
        }
    }
}
