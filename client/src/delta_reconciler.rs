//! # Event-delta reconciliation
//!
//! Instantaneous value changes (damage, heals) bypass the periodic diff
//! cycle entirely. The witnessing process forwards a signed delta to the
//! relay — regardless of role, since its own simulation may have produced
//! the hit even against an entity it does not own — and every observer
//! applies the broadcast additively to the live value read at application
//! time. Additive application means concurrent independent deltas compose
//! instead of overwriting each other.

use log::warn;

use vitals_shared::{
    AttributeSchema, DeltaBroadcastNotify, DeltaBroadcastRequest, EntityId, Message,
    ReplicationPeer,
};

use crate::{adapter::AttributeSource, error::EventError, snapshot_store::SnapshotStore};

/// Forwards a local gameplay event onto the delta-broadcast channel.
pub fn handle_local_event(
    entity_id: EntityId,
    delta: f32,
    schema: &AttributeSchema,
    store: &SnapshotStore,
    peer: &mut impl ReplicationPeer,
) -> Result<(), EventError> {
    if schema.event_attribute().is_none() {
        return Err(EventError::NoEventAttribute);
    }
    if store.role_of(entity_id).is_none() {
        return Err(EventError::EntityNotTracked { entity: entity_id });
    }

    if peer.is_connected() {
        peer.send(Message::DeltaBroadcastRequest(DeltaBroadcastRequest {
            entity_id,
            delta,
        }));
    }
    Ok(())
}

/// Applies a delta-broadcast notification to any tracked entity, own or
/// mirrored. Runs immediately on arrival, outside the tick, against the
/// CURRENT live value — never against the diff-time snapshot.
pub fn apply_broadcast(
    message: &DeltaBroadcastNotify,
    schema: &AttributeSchema,
    store: &SnapshotStore,
    adapter: &mut impl AttributeSource,
) {
    let entity_id = message.entity_id;

    let Some(index) = schema.event_attribute() else {
        warn!("DeltaReconciler: dropping DeltaBroadcastNotify, no event attribute configured");
        return;
    };
    if store.role_of(entity_id).is_none() {
        warn!("DeltaReconciler: dropping DeltaBroadcastNotify for untracked entity {entity_id:#x}");
        return;
    }

    if let Err(err) = adapter.force_value(entity_id, index, message.delta) {
        warn!("DeltaReconciler: skipping delta for entity {entity_id:#x}: {err}");
    }
}
