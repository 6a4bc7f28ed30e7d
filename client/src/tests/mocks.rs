//! Mock collaborators for engine tests.
//!
//! `MockSimulation` models the source-domain numeric semantics: a forced
//! write accumulates into a modifier that `read_value` does NOT reflect
//! (the simulation's own read returns the base value), which is exactly
//! why re-applying a force-policy payload double-applies its delta. The
//! observable value is `effective()` = base + forced modifier.

use std::collections::{HashMap, HashSet};

use vitals_shared::{AttributeIndex, AttributeSchema, EntityId, Message, ReplicationPeer};

use crate::adapter::{AdapterError, AttributeSource};

pub const STRENGTH: AttributeIndex = 0;
pub const HEALTH: AttributeIndex = 1;
pub const STAMINA: AttributeIndex = 2;
pub const MAGICKA: AttributeIndex = 3;
pub const SPEED: AttributeIndex = 4;
pub const RESERVED: AttributeIndex = 5;
pub const ATTRIBUTE_COUNT: u32 = 6;

/// The schema every engine test runs against: health rides the event
/// channel (max tracked), stamina/magicka regenerate (forced writes),
/// strength/speed are plain set-policy stats, index 5 is reserved.
pub fn test_schema() -> AttributeSchema {
    AttributeSchema::builder(ATTRIBUTE_COUNT)
        .exclude(RESERVED)
        .route_event(HEALTH)
        .track_max(HEALTH)
        .force_write(STAMINA)
        .force_write(MAGICKA)
        .build()
        .unwrap()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppliedWrite {
    Set {
        entity: EntityId,
        index: AttributeIndex,
        value: f32,
    },
    Force {
        entity: EntityId,
        index: AttributeIndex,
        delta: f32,
    },
}

pub struct MockSimulation {
    base: HashMap<(EntityId, AttributeIndex), f32>,
    base_max: HashMap<(EntityId, AttributeIndex), f32>,
    forced: HashMap<(EntityId, AttributeIndex), f32>,
    unresolved: HashSet<EntityId>,
    failing_attributes: HashSet<AttributeIndex>,
    pub writes: Vec<AppliedWrite>,
}

impl MockSimulation {
    pub fn new() -> Self {
        Self {
            base: HashMap::new(),
            base_max: HashMap::new(),
            forced: HashMap::new(),
            unresolved: HashSet::new(),
            failing_attributes: HashSet::new(),
            writes: Vec::new(),
        }
    }

    /// Seeds every supported attribute of `entity` with `value`.
    pub fn spawn(&mut self, entity: EntityId, indices: impl Iterator<Item = AttributeIndex>, value: f32) {
        for index in indices {
            self.base.insert((entity, index), value);
        }
    }

    pub fn set_base(&mut self, entity: EntityId, index: AttributeIndex, value: f32) {
        self.base.insert((entity, index), value);
    }

    pub fn set_base_max(&mut self, entity: EntityId, index: AttributeIndex, value: f32) {
        self.base_max.insert((entity, index), value);
    }

    /// The observable live value: base plus accumulated forced modifier.
    pub fn effective(&self, entity: EntityId, index: AttributeIndex) -> f32 {
        self.base.get(&(entity, index)).copied().unwrap_or(0.0)
            + self.forced.get(&(entity, index)).copied().unwrap_or(0.0)
    }

    /// Simulates out-of-band destruction: every adapter call fails.
    pub fn destroy(&mut self, entity: EntityId) {
        self.unresolved.insert(entity);
    }

    /// Makes one attribute fail on access, independent of the entity.
    pub fn fail_attribute(&mut self, index: AttributeIndex) {
        self.failing_attributes.insert(index);
    }

    pub fn heal_attribute(&mut self, index: AttributeIndex) {
        self.failing_attributes.remove(&index);
    }

    fn check(&self, entity: EntityId, index: AttributeIndex) -> Result<(), AdapterError> {
        if self.unresolved.contains(&entity) || self.failing_attributes.contains(&index) {
            return Err(AdapterError::EntityUnresolved { entity });
        }
        Ok(())
    }
}

impl AttributeSource for MockSimulation {
    fn read_value(&self, entity: EntityId, index: AttributeIndex) -> Result<f32, AdapterError> {
        self.check(entity, index)?;
        Ok(self.base.get(&(entity, index)).copied().unwrap_or(0.0))
    }

    fn read_max_value(
        &self,
        entity: EntityId,
        index: AttributeIndex,
    ) -> Result<f32, AdapterError> {
        self.check(entity, index)?;
        Ok(self.base_max.get(&(entity, index)).copied().unwrap_or(0.0))
    }

    fn set_value(
        &mut self,
        entity: EntityId,
        index: AttributeIndex,
        value: f32,
    ) -> Result<(), AdapterError> {
        self.check(entity, index)?;
        self.writes.push(AppliedWrite::Set {
            entity,
            index,
            value,
        });
        self.base.insert((entity, index), value);
        Ok(())
    }

    fn force_value(
        &mut self,
        entity: EntityId,
        index: AttributeIndex,
        delta_from_current: f32,
    ) -> Result<(), AdapterError> {
        self.check(entity, index)?;
        self.writes.push(AppliedWrite::Force {
            entity,
            index,
            delta: delta_from_current,
        });
        *self.forced.entry((entity, index)).or_insert(0.0) += delta_from_current;
        Ok(())
    }
}

pub struct MockPeer {
    pub connected: bool,
    pub sent: Vec<Message>,
}

impl MockPeer {
    pub fn new() -> Self {
        Self {
            connected: true,
            sent: Vec::new(),
        }
    }

    pub fn take_sent(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.sent)
    }
}

impl ReplicationPeer for MockPeer {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, message: Message) {
        self.sent.push(message);
    }
}
