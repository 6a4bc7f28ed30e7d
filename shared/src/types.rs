/// Network-stable entity identifier, shared by every process in a session.
/// Distinct from any process-local handle into the simulation.
pub type EntityId = u32;

/// Index of a single numeric attribute within the schema's fixed range.
pub type AttributeIndex = u32;

/// Server-side handle for one connected replication peer.
pub type ConnectionId = u64;

/// Which protocol path is authoritative for a tracked entity on this
/// process. Fixed at registration, stored explicitly, never inferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// This process is the source of truth for the entity's attributes.
    LocallyOwned,
    /// This process holds a replica updated only by inbound messages.
    RemotelyMirrored,
}

impl Role {
    pub fn is_owned(self) -> bool {
        self == Role::LocallyOwned
    }

    pub fn is_mirrored(self) -> bool {
        self == Role::RemotelyMirrored
    }
}
