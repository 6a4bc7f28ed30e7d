//! # Remote update application
//!
//! Inbound sparse updates land here, restricted to entities this process
//! mirrors. Each attribute is written through the adapter according to its
//! policy: regenerating attributes get a forced delta (a plain set would
//! be overwritten on the next simulation step), everything else a direct
//! set. The event-routed attribute is never written by this path.
//!
//! The local snapshot is deliberately NOT refreshed here: snapshots are
//! only ever the diff baseline for entities this side owns, and a mirrored
//! entity has no local-authoritative snapshot role.

use log::{debug, warn};

use vitals_shared::{
    AttributeSchema, CurrentValuesChanged, EntityId, MaxValuesChanged, Role, SyncRoute, WritePolicy,
};

use crate::{adapter::AttributeSource, snapshot_store::SnapshotStore};

fn mirrored_or_drop(entity_id: EntityId, store: &SnapshotStore, message: &'static str) -> bool {
    match store.role_of(entity_id) {
        Some(Role::RemotelyMirrored) => true,
        Some(Role::LocallyOwned) => {
            // Protocol/ordering anomaly, not corruption.
            warn!("RemoteApplier: dropping {message} for locally-owned entity {entity_id:#x}");
            false
        }
        None => {
            // The entity is not visible/tracked on this side.
            warn!("RemoteApplier: dropping {message} for untracked entity {entity_id:#x}");
            false
        }
    }
}

/// Applies a sparse current-values update to a remotely-mirrored entity.
pub fn apply_current_values(
    message: &CurrentValuesChanged,
    schema: &AttributeSchema,
    store: &SnapshotStore,
    adapter: &mut impl AttributeSource,
) {
    let entity_id = message.entity_id;
    if !mirrored_or_drop(entity_id, store, "CurrentValuesChanged") {
        return;
    }

    for (&index, &value) in &message.values {
        if !schema.is_supported(index) {
            // Schema mismatch between peers; the contract is out-of-band.
            debug!("RemoteApplier: ignoring unsupported attribute {index} for entity {entity_id:#x}");
            continue;
        }
        if schema.route(index) == SyncRoute::EventDelta {
            // Carried exclusively by the delta-broadcast channel.
            continue;
        }

        let result = match schema.write_policy(index) {
            WritePolicy::Force => adapter
                .read_value(entity_id, index)
                .and_then(|current| adapter.force_value(entity_id, index, value - current)),
            WritePolicy::Set => adapter.set_value(entity_id, index, value),
        };

        if let Err(err) = result {
            warn!("RemoteApplier: skipping attribute {index} for entity {entity_id:#x}: {err}");
        }
    }
}

/// Applies a sparse max-values update. Max values are always applied as a
/// forced delta against the current live maximum.
pub fn apply_max_values(
    message: &MaxValuesChanged,
    schema: &AttributeSchema,
    store: &SnapshotStore,
    adapter: &mut impl AttributeSource,
) {
    let entity_id = message.entity_id;
    if !mirrored_or_drop(entity_id, store, "MaxValuesChanged") {
        return;
    }

    for (&index, &value) in &message.values {
        if !schema.max_tracked().contains(&index) {
            debug!("RemoteApplier: ignoring untracked max attribute {index} for entity {entity_id:#x}");
            continue;
        }

        let result = adapter
            .read_max_value(entity_id, index)
            .and_then(|current| adapter.force_value(entity_id, index, value - current));

        if let Err(err) = result {
            warn!("RemoteApplier: skipping max attribute {index} for entity {entity_id:#x}: {err}");
        }
    }
}
