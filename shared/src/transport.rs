//! Transport seams. The engine never owns a socket; it talks to whatever
//! implements these traits. The transport must deliver messages for a
//! given entity in send order to the same peer: both the absolute-set
//! periodic channel and the additive delta channel are order-sensitive
//! per entity.

use crate::{messages::Message, types::ConnectionId};

/// A client's link to its replication peer.
pub trait ReplicationPeer {
    /// Every outbound path is gated on this; a disconnected peer sends
    /// nothing and the engine simply skips the cycle.
    fn is_connected(&self) -> bool;

    fn send(&mut self, message: Message);
}

/// The server's link to one specific connection.
pub trait ServerTransport {
    fn send(&mut self, connection_id: ConnectionId, message: Message);
}
