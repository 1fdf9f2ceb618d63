//! Lookup state for an interactive front end.
//!
//! Input changes go through a per-session debouncer before reaching the
//! worker. Every change bumps the query counter; a response is accepted only
//! if it answers the latest query, so a slow response for an older query can
//! never replace newer results.

use devcap_core::{auto_selected_device, CapabilityQuery, Debouncer, Device};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::backend::CapabilityBackend;
use crate::worker::{spawn_lookup_worker, LookupKind, LookupRequest, LookupResponse, LookupResults};

pub struct LookupSession {
    debouncer: Debouncer<LookupRequest>,
    result_rx: Receiver<LookupResponse>,
    query_counter: u64,
    response: Option<LookupResponse>,
    selection: Option<String>,
}

impl LookupSession {
    pub fn new<B>(backend: B, debounce: Duration) -> Self
    where
        B: CapabilityBackend + Send + 'static,
    {
        let (query_tx, query_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        spawn_lookup_worker(backend, query_rx, result_tx);

        let debouncer = Debouncer::new(debounce, move |request: LookupRequest| {
            log::debug!("Issuing lookup {}", request.id);
            let _ = query_tx.send(request);
        });

        Self {
            debouncer,
            result_rx,
            query_counter: 0,
            response: None,
            selection: None,
        }
    }

    /// Search devices by vendor or model substring.
    pub fn search_devices(&mut self, text: impl Into<String>) -> u64 {
        self.submit(LookupKind::Devices { text: text.into() })
    }

    /// Find devices supporting a capability.
    pub fn lookup_capability(&mut self, query: CapabilityQuery) -> u64 {
        self.submit(LookupKind::Capability(query))
    }

    fn submit(&mut self, kind: LookupKind) -> u64 {
        self.query_counter += 1;
        // Results for the old parameters are no longer valid
        self.response = None;
        self.debouncer.call(LookupRequest {
            id: self.query_counter,
            kind,
        });
        self.query_counter
    }

    /// Drain finished lookups without blocking. Returns true if the current
    /// results changed.
    pub fn poll(&mut self) -> bool {
        let mut updated = false;
        while let Ok(response) = self.result_rx.try_recv() {
            updated |= self.accept(response);
        }
        updated
    }

    /// Block until the latest query is answered or `timeout` elapses.
    pub fn wait_for_results(&mut self, timeout: Duration) -> Option<&LookupResponse> {
        let deadline = Instant::now() + timeout;
        self.poll();
        while !self.is_current() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.result_rx.recv_timeout(remaining) {
                Ok(response) => {
                    self.accept(response);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.response.as_ref()
    }

    fn is_current(&self) -> bool {
        self.response
            .as_ref()
            .is_some_and(|r| r.query_id == self.query_counter)
    }

    fn accept(&mut self, response: LookupResponse) -> bool {
        if response.query_id != self.query_counter {
            log::warn!(
                "Discarding stale lookup {} (latest is {})",
                response.query_id,
                self.query_counter
            );
            return false;
        }

        if let LookupResults::Capability(results) = &response.results {
            if let Some(device) = auto_selected_device(results, self.selection.as_deref()) {
                log::debug!("Auto-selecting {}", device.id);
                self.selection = Some(device.id.clone());
            }
        }

        self.response = Some(response);
        true
    }

    pub fn response(&self) -> Option<&LookupResponse> {
        self.response.as_ref()
    }

    /// Take the error of the current response, leaving its results in place.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.response.as_mut()?.error.take()
    }

    pub fn results(&self) -> Option<&LookupResults> {
        self.response.as_ref().map(|r| &r.results)
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Selected device among the current results, if it is one of them.
    pub fn selected_device(&self) -> Option<&Device> {
        let selection = self.selection.as_deref()?;
        match self.results()? {
            LookupResults::Devices(devices) => devices.iter().find(|d| d.id == selection),
            LookupResults::Capability(results) => results
                .iter()
                .map(|r| &r.device)
                .find(|d| d.id == selection),
        }
    }

    pub fn select(&mut self, device_id: impl Into<String>) {
        self.selection = Some(device_id.into());
    }
}
