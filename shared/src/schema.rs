//! # `AttributeSchema` – the out-of-band attribute contract
//!
//! Both ends of a replication session iterate the same fixed attribute
//! index range, skip the same reserved indices, and agree on which
//! attributes regenerate (and therefore need forced writes) and which
//! single attribute rides the event-delta channel instead of the periodic
//! diff channel. None of that is carried on the wire; it is injected here
//! as configuration and must match on every peer.

use std::collections::HashSet;

use log::debug;

use crate::{error::SchemaError, types::AttributeIndex};

/// How a remotely-received absolute value is written into the live entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WritePolicy {
    /// Plain absolute set.
    Set,
    /// Relative delta against the current live value, bypassing any
    /// internal regeneration that would immediately undo a plain set.
    Force,
}

/// Which replication channel carries changes to an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncRoute {
    /// Diffed against the snapshot on the fixed tick and sent sparsely.
    PeriodicDiff,
    /// Carried exclusively by delta-broadcast events; never diffed and
    /// never written by the periodic applier.
    EventDelta,
}

pub struct AttributeSchema {
    attribute_count: u32,
    excluded: HashSet<AttributeIndex>,
    force_write: HashSet<AttributeIndex>,
    event_routed: Option<AttributeIndex>,
    max_tracked: Vec<AttributeIndex>,
    diff_tolerance: Option<f32>,
}

impl AttributeSchema {
    pub fn builder(attribute_count: u32) -> AttributeSchemaBuilder {
        AttributeSchemaBuilder {
            attribute_count,
            excluded: HashSet::new(),
            force_write: HashSet::new(),
            event_routed: Vec::new(),
            max_tracked: Vec::new(),
            diff_tolerance: None,
        }
    }

    /// Total size of the index range, reserved indices included.
    pub fn attribute_count(&self) -> u32 {
        self.attribute_count
    }

    /// True if the index is inside the range and not reserved.
    pub fn is_supported(&self, index: AttributeIndex) -> bool {
        index < self.attribute_count && !self.excluded.contains(&index)
    }

    /// Every supported index, in ascending order.
    pub fn supported_indices(&self) -> impl Iterator<Item = AttributeIndex> + '_ {
        (0..self.attribute_count).filter(move |index| !self.excluded.contains(index))
    }

    pub fn write_policy(&self, index: AttributeIndex) -> WritePolicy {
        if self.force_write.contains(&index) {
            WritePolicy::Force
        } else {
            WritePolicy::Set
        }
    }

    pub fn route(&self, index: AttributeIndex) -> SyncRoute {
        if self.event_routed == Some(index) {
            SyncRoute::EventDelta
        } else {
            SyncRoute::PeriodicDiff
        }
    }

    /// The single attribute carried by the delta-broadcast channel, if one
    /// is configured.
    pub fn event_attribute(&self) -> Option<AttributeIndex> {
        self.event_routed
    }

    /// The subset of indices whose maximum value is replicated alongside
    /// the current value.
    pub fn max_tracked(&self) -> &[AttributeIndex] {
        &self.max_tracked
    }

    /// Diff trigger. Exact inequality by default; a configured tolerance
    /// widens the dead-band to absorb continuous drift.
    pub fn value_changed(&self, old: f32, new: f32) -> bool {
        match self.diff_tolerance {
            Some(tolerance) => (new - old).abs() > tolerance,
            None => new != old,
        }
    }
}

pub struct AttributeSchemaBuilder {
    attribute_count: u32,
    excluded: HashSet<AttributeIndex>,
    force_write: HashSet<AttributeIndex>,
    event_routed: Vec<AttributeIndex>,
    max_tracked: Vec<AttributeIndex>,
    diff_tolerance: Option<f32>,
}

impl AttributeSchemaBuilder {
    /// Reserve an index: it is skipped by snapshots, diffs, and appliers.
    pub fn exclude(mut self, index: AttributeIndex) -> Self {
        self.excluded.insert(index);
        self
    }

    /// Mark an attribute as regenerating; remote sets become forced deltas.
    pub fn force_write(mut self, index: AttributeIndex) -> Self {
        self.force_write.insert(index);
        self
    }

    /// Route an attribute through the event-delta channel instead of the
    /// periodic diff channel.
    pub fn route_event(mut self, index: AttributeIndex) -> Self {
        self.event_routed.push(index);
        self
    }

    /// Replicate the attribute's maximum value alongside its current value.
    pub fn track_max(mut self, index: AttributeIndex) -> Self {
        if !self.max_tracked.contains(&index) {
            self.max_tracked.push(index);
        }
        self
    }

    /// Opt into a dead-band for the diff trigger. Default is exact
    /// inequality.
    pub fn diff_tolerance(mut self, tolerance: f32) -> Self {
        self.diff_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<AttributeSchema, SchemaError> {
        for &index in self
            .force_write
            .iter()
            .chain(self.event_routed.iter())
            .chain(self.max_tracked.iter())
        {
            if index >= self.attribute_count {
                return Err(SchemaError::IndexOutOfRange {
                    index,
                    attribute_count: self.attribute_count,
                });
            }
            if self.excluded.contains(&index) {
                return Err(SchemaError::IndexExcluded { index });
            }
        }

        // The delta-broadcast messages carry no attribute index, so only
        // one attribute may ride that channel.
        if self.event_routed.len() > 1 {
            return Err(SchemaError::MultipleEventRouted {
                count: self.event_routed.len(),
            });
        }

        if let Some(tolerance) = self.diff_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(SchemaError::InvalidTolerance { tolerance });
            }
        }

        debug!(
            "AttributeSchema: {} indices ({} excluded), event attribute {:?}",
            self.attribute_count,
            self.excluded.len(),
            self.event_routed.first()
        );

        Ok(AttributeSchema {
            attribute_count: self.attribute_count,
            excluded: self.excluded,
            force_write: self.force_write,
            event_routed: self.event_routed.first().copied(),
            max_tracked: self.max_tracked,
            diff_tolerance: self.diff_tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_indices_skip_exclusions() {
        let schema = AttributeSchema::builder(6)
            .exclude(2)
            .exclude(4)
            .build()
            .unwrap();

        let indices: Vec<AttributeIndex> = schema.supported_indices().collect();
        assert_eq!(indices, vec![0, 1, 3, 5]);
        assert!(schema.is_supported(3));
        assert!(!schema.is_supported(4));
        assert!(!schema.is_supported(6));
    }

    #[test]
    fn routing_and_policy_default_to_periodic_set() {
        let schema = AttributeSchema::builder(8)
            .force_write(3)
            .route_event(1)
            .build()
            .unwrap();

        assert_eq!(schema.route(1), SyncRoute::EventDelta);
        assert_eq!(schema.route(3), SyncRoute::PeriodicDiff);
        assert_eq!(schema.write_policy(3), WritePolicy::Force);
        assert_eq!(schema.write_policy(5), WritePolicy::Set);
        assert_eq!(schema.event_attribute(), Some(1));
    }

    #[test]
    fn exact_inequality_is_the_default_trigger() {
        let schema = AttributeSchema::builder(4).build().unwrap();
        assert!(schema.value_changed(100.0, 100.000001));
        assert!(!schema.value_changed(100.0, 100.0));
    }

    #[test]
    fn tolerance_widens_the_dead_band() {
        let schema = AttributeSchema::builder(4)
            .diff_tolerance(0.5)
            .build()
            .unwrap();
        assert!(!schema.value_changed(100.0, 100.4));
        assert!(schema.value_changed(100.0, 100.6));
    }
}
