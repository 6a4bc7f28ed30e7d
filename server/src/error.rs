use thiserror::Error;

use vitals_shared::{ConnectionId, EntityId};

/// Errors raised when a connection claims ownership of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The claiming connection is not registered
    #[error("Connection {connection:#x} is not associated with a player")]
    UnknownConnection {
        connection: ConnectionId,
    },

    /// Another connection already owns the entity
    #[error("Entity {entity:#x} is already owned by connection {owner:#x}")]
    AlreadyClaimed {
        entity: EntityId,
        owner: ConnectionId,
    },
}
