//! Background lookup worker thread

use devcap_core::{CapabilityQuery, CapabilityResult, Device};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::backend::CapabilityBackend;

/// What to look up.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupKind {
    /// Vendor or model substring search.
    Devices { text: String },
    /// Devices supporting a band, combo or feature.
    Capability(CapabilityQuery),
}

/// Query sent to the worker thread
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub id: u64,
    pub kind: LookupKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupResults {
    Devices(Vec<Device>),
    Capability(Vec<CapabilityResult>),
}

impl LookupResults {
    pub fn len(&self) -> usize {
        match self {
            LookupResults::Devices(devices) => devices.len(),
            LookupResults::Capability(results) => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Results from the worker thread
#[derive(Debug)]
pub struct LookupResponse {
    pub query_id: u64,
    pub results: LookupResults,
    pub duration: Duration,
    pub error: Option<anyhow::Error>,
}

/// Spawn the lookup worker thread.
///
/// Requests queued while a lookup is running are coalesced: only the newest
/// one is executed. Backend errors are passed back in the response with
/// their context chain intact, never retried.
pub fn spawn_lookup_worker<B>(
    backend: B,
    query_rx: Receiver<LookupRequest>,
    result_tx: Sender<LookupResponse>,
) -> JoinHandle<()>
where
    B: CapabilityBackend + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(mut request) = query_rx.recv() {
            // Drain pending requests, keep only the latest
            while let Ok(next) = query_rx.try_recv() {
                request = next;
            }

            let start = Instant::now();
            let (results, error) = execute_lookup(&backend, &request.kind);
            let duration = start.elapsed();
            log::debug!("Lookup {} finished in {:?}", request.id, duration);

            let response = LookupResponse {
                query_id: request.id,
                results,
                duration,
                error,
            };
            if result_tx.send(response).is_err() {
                break;
            }
        }
    })
}

fn execute_lookup<B: CapabilityBackend>(
    backend: &B,
    kind: &LookupKind,
) -> (LookupResults, Option<anyhow::Error>) {
    match kind {
        LookupKind::Devices { text } => {
            let text = text.trim();
            if text.is_empty() {
                return (LookupResults::Devices(Vec::new()), None);
            }
            match backend.search_devices(text) {
                Ok(devices) => (LookupResults::Devices(devices), None),
                Err(e) => (LookupResults::Devices(Vec::new()), Some(e)),
            }
        }
        LookupKind::Capability(query) => match backend.lookup_capability(query) {
            Ok(results) => (LookupResults::Capability(results), None),
            Err(e) => (LookupResults::Capability(Vec::new()), Some(e)),
        },
    }
}
