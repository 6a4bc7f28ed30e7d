use std::collections::HashMap;

use log::debug;

use vitals_shared::{AttributeIndex, EntityId, Role};

use crate::error::StoreError;

/// Last-observed attribute state for one tracked entity, used as the diff
/// baseline. The role is fixed at registration and never changes.
pub struct TrackedEntity {
    role: Role,
    current_values: HashMap<AttributeIndex, f32>,
    max_values: HashMap<AttributeIndex, f32>,
}

impl TrackedEntity {
    pub fn new(
        role: Role,
        current_values: HashMap<AttributeIndex, f32>,
        max_values: HashMap<AttributeIndex, f32>,
    ) -> Self {
        Self {
            role,
            current_values,
            max_values,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn value(&self, index: AttributeIndex) -> Option<f32> {
        self.current_values.get(&index).copied()
    }

    pub fn set_value(&mut self, index: AttributeIndex, value: f32) {
        self.current_values.insert(index, value);
    }

    pub fn max_value(&self, index: AttributeIndex) -> Option<f32> {
        self.max_values.get(&index).copied()
    }

    pub fn set_max_value(&mut self, index: AttributeIndex, value: f32) {
        self.max_values.insert(index, value);
    }
}

/// Per-entity snapshot bookkeeping. Pure memory: no side effects, no
/// network awareness. An entity is present here exactly while it is
/// registered and the session is live.
pub struct SnapshotStore {
    entities: HashMap<EntityId, TrackedEntity>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Registers a tracked entity. Re-registering with the same role is an
    /// idempotent no-op that keeps the existing snapshot (so undrained
    /// diffs are not lost); re-registering with a different role errors
    /// rather than silently overwriting.
    pub fn register(&mut self, entity_id: EntityId, tracked: TrackedEntity) -> Result<(), StoreError> {
        if let Some(existing) = self.entities.get(&entity_id) {
            if existing.role() == tracked.role() {
                debug!("SnapshotStore: Entity {entity_id:#x} already registered, keeping existing snapshot");
                return Ok(());
            }
            return Err(StoreError::RoleConflict {
                entity: entity_id,
                existing: existing.role(),
                requested: tracked.role(),
            });
        }

        self.entities.insert(entity_id, tracked);
        Ok(())
    }

    /// Removes an entity and discards its last known state. Returns false
    /// if the entity was not tracked.
    pub fn unregister(&mut self, entity_id: EntityId) -> bool {
        self.entities.remove(&entity_id).is_some()
    }

    pub fn get(&self, entity_id: EntityId) -> Option<&TrackedEntity> {
        self.entities.get(&entity_id)
    }

    pub fn get_mut(&mut self, entity_id: EntityId) -> Option<&mut TrackedEntity> {
        self.entities.get_mut(&entity_id)
    }

    pub fn role_of(&self, entity_id: EntityId) -> Option<Role> {
        self.entities.get(&entity_id).map(TrackedEntity::role)
    }

    /// Entity ids with the given role, in ascending id order so the diff
    /// cycle visits entities deterministically.
    pub fn entities_with_role(&self, role: Role) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, tracked)| tracked.role() == role)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Disconnect path: replication state has no meaning without a session.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
