//! Backend client and lookup orchestration for devcap.

pub mod backend;
pub mod client;
pub mod config;
pub mod queries;
pub mod session;
pub mod worker;

#[cfg(test)]
mod testing;

pub use backend::{merge_device_matches, CapabilityBackend};
pub use client::DevcapClient;
pub use config::Config;
pub use session::LookupSession;
pub use worker::{spawn_lookup_worker, LookupKind, LookupRequest, LookupResponse, LookupResults};
