//! Capability aggregation and normalization for device lookups.
//!
//! Sits between the per-row support records returned by the backend and the
//! table shown to users: picks the query variant, merges duplicate rows,
//! collapses band variants and tags every result with its support status.

pub mod bands;
pub mod capability;
pub mod debounce;
pub mod dedupe;
pub mod error;
pub mod model;
pub mod selection;

pub use bands::{group_bands, NormalizedBand};
pub use capability::{
    select_capability_query, CapabilityKind, CapabilityQuery, CapabilityResult, CapabilityRow,
    Operation, SupportStatus,
};
pub use debounce::{debounce, Debouncer};
pub use dedupe::{dedupe_by_id, Identified};
pub use error::CapabilityError;
pub use model::{Band, Combo, Device, DeviceDetail, Feature, Provider, SoftwareVersion};
pub use selection::{auto_selected_device, should_auto_select};
