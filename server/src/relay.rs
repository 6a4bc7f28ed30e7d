//! # Relay
//!
//! One process in a session carries the relay role: it receives sparse
//! value updates from the connection that owns each entity and repeats
//! them to every other connection, and it converts delta-broadcast
//! requests into notifications fanned out to observers. It never touches
//! attribute values itself; validation is purely about who may speak for
//! which entity.

use std::collections::HashMap;

use log::{debug, warn};

use vitals_shared::{ConnectionId, DeltaBroadcastNotify, EntityId, Message, ServerTransport};

use crate::{connection::ConnectionRegistry, error::ClaimError};

pub struct RelayServer {
    connections: ConnectionRegistry,
    owners: HashMap<EntityId, ConnectionId>,
}

impl RelayServer {
    pub fn new() -> Self {
        Self {
            connections: ConnectionRegistry::new(),
            owners: HashMap::new(),
        }
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    pub fn connect(&mut self) -> ConnectionId {
        self.connections.connect()
    }

    /// Drops the connection and releases every ownership claim it holds.
    pub fn disconnect(&mut self, connection_id: ConnectionId) {
        if !self.connections.disconnect(connection_id) {
            return;
        }
        self.owners.retain(|_, owner| *owner != connection_id);
    }

    /// Records which connection is authoritative for an entity. First
    /// claim wins; the same connection may re-claim freely.
    pub fn claim_entity(
        &mut self,
        connection_id: ConnectionId,
        entity_id: EntityId,
    ) -> Result<(), ClaimError> {
        if !self.connections.is_connected(connection_id) {
            return Err(ClaimError::UnknownConnection {
                connection: connection_id,
            });
        }
        match self.owners.get(&entity_id) {
            Some(&owner) if owner != connection_id => {
                Err(ClaimError::AlreadyClaimed {
                    entity: entity_id,
                    owner,
                })
            }
            _ => {
                self.owners.insert(entity_id, connection_id);
                Ok(())
            }
        }
    }

    /// Releases an entity's claim, e.g. when it despawns.
    pub fn release_entity(&mut self, entity_id: EntityId) {
        self.owners.remove(&entity_id);
    }

    pub fn owner_of(&self, entity_id: EntityId) -> Option<ConnectionId> {
        self.owners.get(&entity_id).copied()
    }

    /// Routes one inbound message. Every invalid case is a logged drop:
    /// the relay favors self-healing over rejection at the protocol level.
    pub fn handle_message(
        &mut self,
        from: ConnectionId,
        message: Message,
        transport: &mut impl ServerTransport,
    ) {
        if !self.connections.is_connected(from) {
            warn!(
                "RelayServer: connection {from:#x} is not associated with a player; dropping {}",
                message.name()
            );
            return;
        }

        match message {
            Message::CurrentValuesChanged(_) | Message::MaxValuesChanged(_) => {
                self.relay_owned_update(from, message, transport);
            }
            Message::DeltaBroadcastRequest(request) => {
                // Accepted from any connection: the sender's simulation may
                // have produced the event against an entity it mirrors. The
                // requester already applied it locally, so it is excluded
                // from the fan-out.
                let notify = DeltaBroadcastNotify {
                    entity_id: request.entity_id,
                    delta: request.delta,
                };
                debug!(
                    "RelayServer: broadcasting delta {} for entity {:#x}",
                    notify.delta, notify.entity_id
                );
                self.broadcast_except(from, Message::DeltaBroadcastNotify(notify), transport);
            }
            Message::DeltaBroadcastNotify(notify) => {
                // Notifications only flow relay -> client.
                warn!(
                    "RelayServer: dropping DeltaBroadcastNotify from connection {from:#x} for entity {:#x}",
                    notify.entity_id
                );
            }
        }
    }

    fn relay_owned_update(
        &mut self,
        from: ConnectionId,
        message: Message,
        transport: &mut impl ServerTransport,
    ) {
        let entity_id = message.entity_id();
        match self.owners.get(&entity_id) {
            None => {
                warn!(
                    "RelayServer: dropping {} for unclaimed entity {entity_id:#x}",
                    message.name()
                );
            }
            Some(&owner) if owner != from => {
                warn!(
                    "RelayServer: dropping {} for entity {entity_id:#x} from non-owner connection {from:#x}",
                    message.name()
                );
            }
            Some(_) => {
                self.broadcast_except(from, message, transport);
            }
        }
    }

    fn broadcast_except(
        &self,
        except: ConnectionId,
        message: Message,
        transport: &mut impl ServerTransport,
    ) {
        for connection_id in self.connections.iter() {
            if connection_id == except {
                continue;
            }
            transport.send(connection_id, message.clone());
        }
    }
}

impl Default for RelayServer {
    fn default() -> Self {
        Self::new()
    }
}
