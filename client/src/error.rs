use thiserror::Error;

use vitals_shared::{EntityId, Role};

use crate::adapter::AdapterError;

/// Errors raised by the snapshot store itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Registration would silently flip an entity's role
    #[error("Entity {entity:#x} is already registered as {existing:?}; refusing to re-register as {requested:?}")]
    RoleConflict {
        entity: EntityId,
        existing: Role,
        requested: Role,
    },
}

/// Errors raised while populating the baseline snapshot at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Adapter error while reading the baseline; nothing was registered
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),
}

/// Errors raised when forwarding a local gameplay event onto the
/// delta-broadcast channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EventError {
    /// The schema routes no attribute through the event-delta channel
    #[error("No attribute is routed through the event-delta channel")]
    NoEventAttribute,

    /// The affected entity is not tracked on this side
    #[error("Entity {entity:#x} is not tracked; cannot forward a delta-broadcast request")]
    EntityNotTracked {
        entity: EntityId,
    },
}
