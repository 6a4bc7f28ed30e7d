use std::time::Duration;

use log::warn;

use vitals_shared::{
    AttributeSchema, CurrentValuesChanged, DeltaBroadcastNotify, EntityId, MaxValuesChanged,
    Message, ReplicationPeer, Role,
};

use crate::{
    adapter::AttributeSource,
    delta_reconciler, diff_scheduler::DiffScheduler,
    error::{EventError, RegisterError},
    lifecycle, remote_applier,
    snapshot_store::SnapshotStore,
};

/// The replication engine's front door: owns the schema, the snapshot
/// store, and the diff scheduler, and exposes one method per external
/// hook. The adapter (live simulation) and peer (transport) are passed in
/// per call — the engine owns neither.
///
/// All methods are synchronous and bounded; the caller is expected to
/// drive ticks and inbound messages from a single execution context.
pub struct AttributeReplicator {
    schema: AttributeSchema,
    store: SnapshotStore,
    scheduler: DiffScheduler,
}

impl AttributeReplicator {
    pub fn new(schema: AttributeSchema) -> Self {
        Self {
            schema,
            store: SnapshotStore::new(),
            scheduler: DiffScheduler::default(),
        }
    }

    pub fn with_diff_interval(schema: AttributeSchema, interval: Duration) -> Self {
        Self {
            schema,
            store: SnapshotStore::new(),
            scheduler: DiffScheduler::new(interval),
        }
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    // Lifecycle hooks

    pub fn on_entity_registered(
        &mut self,
        entity_id: EntityId,
        role: Role,
        adapter: &impl AttributeSource,
    ) -> Result<(), RegisterError> {
        lifecycle::on_entity_registered(entity_id, role, &self.schema, &mut self.store, adapter)
    }

    pub fn on_entity_removed(&mut self, entity_id: EntityId) {
        lifecycle::on_entity_removed(entity_id, &mut self.store);
    }

    pub fn on_disconnected(&mut self) {
        lifecycle::on_disconnected(&mut self.store);
    }

    // Periodic channel

    pub fn on_update(
        &mut self,
        delta: Duration,
        adapter: &impl AttributeSource,
        peer: &mut impl ReplicationPeer,
    ) {
        self.scheduler
            .on_update(delta, &self.schema, &mut self.store, adapter, peer);
    }

    pub fn receive_current_values(
        &mut self,
        message: &CurrentValuesChanged,
        adapter: &mut impl AttributeSource,
    ) {
        remote_applier::apply_current_values(message, &self.schema, &self.store, adapter);
    }

    pub fn receive_max_values(
        &mut self,
        message: &MaxValuesChanged,
        adapter: &mut impl AttributeSource,
    ) {
        remote_applier::apply_max_values(message, &self.schema, &self.store, adapter);
    }

    // Event-delta channel

    pub fn on_attribute_event(
        &mut self,
        entity_id: EntityId,
        delta: f32,
        peer: &mut impl ReplicationPeer,
    ) -> Result<(), EventError> {
        delta_reconciler::handle_local_event(entity_id, delta, &self.schema, &self.store, peer)
    }

    pub fn receive_delta_broadcast(
        &mut self,
        message: &DeltaBroadcastNotify,
        adapter: &mut impl AttributeSource,
    ) {
        delta_reconciler::apply_broadcast(message, &self.schema, &self.store, adapter);
    }

    /// Dispatches any inbound message to its handler. Requests never flow
    /// toward a client; one arriving is a protocol anomaly.
    pub fn receive(&mut self, message: &Message, adapter: &mut impl AttributeSource) {
        match message {
            Message::CurrentValuesChanged(message) => {
                self.receive_current_values(message, adapter);
            }
            Message::MaxValuesChanged(message) => {
                self.receive_max_values(message, adapter);
            }
            Message::DeltaBroadcastNotify(message) => {
                self.receive_delta_broadcast(message, adapter);
            }
            Message::DeltaBroadcastRequest(message) => {
                warn!(
                    "AttributeReplicator: dropping DeltaBroadcastRequest for entity {:#x}; requests only flow toward the relay",
                    message.entity_id
                );
            }
        }
    }
}
