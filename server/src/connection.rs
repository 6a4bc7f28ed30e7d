use std::collections::BTreeSet;

use vitals_shared::ConnectionId;

/// Live connections, with monotonic id allocation. Ids are never reused
/// within a process lifetime, so a late message from a dropped connection
/// can never impersonate a new one. The ordered set keeps fan-out
/// deterministic.
pub struct ConnectionRegistry {
    next_id: ConnectionId,
    connected: BTreeSet<ConnectionId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            connected: BTreeSet::new(),
        }
    }

    pub fn connect(&mut self) -> ConnectionId {
        let id = self.next_id;
        self.next_id += 1;
        self.connected.insert(id);
        id
    }

    /// Returns false if the connection was not registered.
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> bool {
        self.connected.remove(&connection_id)
    }

    pub fn is_connected(&self, connection_id: ConnectionId) -> bool {
        self.connected.contains(&connection_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.connected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
