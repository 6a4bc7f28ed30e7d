//! # Periodic diff cycle
//!
//! Once per interval, every locally-owned entity's live attributes are
//! read through the adapter and compared to the stored snapshot; only the
//! indices that diverged go on the wire. No change means no message at
//! all, which is the whole point of diffing instead of pushing full state.
//!
//! The event-routed attribute is excluded here AT EMISSION: it never
//! appears in a periodic payload even when its live value drifted, because
//! the delta-broadcast channel is its sole carrier.

use std::{collections::HashMap, time::Duration};

use log::{error, warn};

use vitals_shared::{
    AttributeIndex, AttributeSchema, CurrentValuesChanged, EntityId, MaxValuesChanged, Message,
    ReplicationPeer, Role, SyncRoute, Timer,
};

use crate::{adapter::AttributeSource, snapshot_store::SnapshotStore};

/// Default diff interval, matching the original one-time-unit accumulator.
pub const DEFAULT_DIFF_INTERVAL: Duration = Duration::from_secs(1);

pub struct DiffScheduler {
    timer: Timer,
}

impl DiffScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval),
        }
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Accumulates frame time; when the interval elapses, runs one diff
    /// cycle over every locally-owned entity. Current values and max
    /// values are compared and sent independently, as separate messages.
    pub fn on_update(
        &mut self,
        delta: Duration,
        schema: &AttributeSchema,
        store: &mut SnapshotStore,
        adapter: &impl AttributeSource,
        peer: &mut impl ReplicationPeer,
    ) {
        if !self.timer.accumulate(delta) {
            return;
        }
        if !peer.is_connected() {
            return;
        }

        for entity_id in store.entities_with_role(Role::LocallyOwned) {
            Self::diff_current_values(entity_id, schema, store, adapter, peer);
            Self::diff_max_values(entity_id, schema, store, adapter, peer);
        }
    }

    fn diff_current_values(
        entity_id: EntityId,
        schema: &AttributeSchema,
        store: &mut SnapshotStore,
        adapter: &impl AttributeSource,
        peer: &mut impl ReplicationPeer,
    ) {
        let Some(tracked) = store.get_mut(entity_id) else {
            return;
        };

        let mut changed: HashMap<AttributeIndex, f32> = HashMap::new();

        for index in schema.supported_indices() {
            if schema.route(index) == SyncRoute::EventDelta {
                continue;
            }

            let live = match adapter.read_value(entity_id, index) {
                Ok(value) => value,
                Err(err) => {
                    // Tracking entry stays intact; retried next tick.
                    warn!("DiffScheduler: skipping attribute {index} for entity {entity_id:#x}: {err}");
                    continue;
                }
            };

            match tracked.value(index) {
                Some(old) => {
                    if schema.value_changed(old, live) {
                        changed.insert(index, live);
                        tracked.set_value(index, live);
                    }
                }
                None => {
                    // The baseline is total over supported indices; a hole
                    // is an architecture bug. Emit the value to self-heal.
                    error!("DiffScheduler: missing snapshot entry for attribute {index} of entity {entity_id:#x}");
                    changed.insert(index, live);
                    tracked.set_value(index, live);
                }
            }
        }

        if !changed.is_empty() {
            peer.send(Message::CurrentValuesChanged(CurrentValuesChanged {
                entity_id,
                values: changed,
            }));
        }
    }

    fn diff_max_values(
        entity_id: EntityId,
        schema: &AttributeSchema,
        store: &mut SnapshotStore,
        adapter: &impl AttributeSource,
        peer: &mut impl ReplicationPeer,
    ) {
        let Some(tracked) = store.get_mut(entity_id) else {
            return;
        };

        let mut changed: HashMap<AttributeIndex, f32> = HashMap::new();

        for &index in schema.max_tracked() {
            let live = match adapter.read_max_value(entity_id, index) {
                Ok(value) => value,
                Err(err) => {
                    warn!("DiffScheduler: skipping max attribute {index} for entity {entity_id:#x}: {err}");
                    continue;
                }
            };

            let unchanged = tracked
                .max_value(index)
                .is_some_and(|old| !schema.value_changed(old, live));
            if !unchanged {
                changed.insert(index, live);
                tracked.set_max_value(index, live);
            }
        }

        if !changed.is_empty() {
            peer.send(Message::MaxValuesChanged(MaxValuesChanged {
                entity_id,
                values: changed,
            }));
        }
    }
}

impl Default for DiffScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DIFF_INTERVAL)
    }
}
