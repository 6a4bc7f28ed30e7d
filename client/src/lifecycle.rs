//! Lifecycle hooks binding the external world/registry to the snapshot
//! store: registration takes the full baseline snapshot, removal drops the
//! tracking entry, disconnection resets everything.

use std::collections::HashMap;

use log::info;

use vitals_shared::{AttributeIndex, AttributeSchema, EntityId, Role};

use crate::{
    adapter::AttributeSource,
    error::RegisterError,
    snapshot_store::{SnapshotStore, TrackedEntity},
};

/// Registers an entity by reading every supported attribute (and every
/// tracked max) through the adapter exactly once. The baseline establishes
/// state, not a change: no message is emitted. An adapter failure aborts
/// the registration; no partially populated entry ever enters the store.
pub fn on_entity_registered(
    entity_id: EntityId,
    role: Role,
    schema: &AttributeSchema,
    store: &mut SnapshotStore,
    adapter: &impl AttributeSource,
) -> Result<(), RegisterError> {
    let mut current_values: HashMap<AttributeIndex, f32> = HashMap::new();
    for index in schema.supported_indices() {
        let value = adapter.read_value(entity_id, index)?;
        current_values.insert(index, value);
    }

    let mut max_values: HashMap<AttributeIndex, f32> = HashMap::new();
    for &index in schema.max_tracked() {
        let value = adapter.read_max_value(entity_id, index)?;
        max_values.insert(index, value);
    }

    store.register(entity_id, TrackedEntity::new(role, current_values, max_values))?;
    info!("Lifecycle: registered entity {entity_id:#x} as {role:?}");
    Ok(())
}

/// Drops the tracking entry and its last known state. No-op for entities
/// this process was not tracking.
pub fn on_entity_removed(entity_id: EntityId, store: &mut SnapshotStore) {
    if store.unregister(entity_id) {
        info!("Lifecycle: unregistered entity {entity_id:#x}");
    }
}

/// Clears the entire store. Replication state has no meaning without a
/// live session.
pub fn on_disconnected(store: &mut SnapshotStore) {
    store.clear();
    info!("Lifecycle: disconnected, snapshot store cleared");
}
