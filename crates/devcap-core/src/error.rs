use thiserror::Error;

/// Contract violations by the caller. These are programming errors and are
/// never produced by backend data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("unsupported capability kind '{0}' (expected band, combo or feature)")]
    UnsupportedCapabilityKind(String),
}

pub type Result<T> = std::result::Result<T, CapabilityError>;
