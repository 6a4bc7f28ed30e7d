use thiserror::Error;

use vitals_shared::{AttributeIndex, EntityId};

/// Errors surfaced by an attribute source. Per the self-healing error
/// model, the engine skips the affected write for the current cycle and
/// keeps the tracking entry for retry; nothing here is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The live simulation object backing a tracked identifier no longer
    /// resolves (destroyed out-of-band without an unregister hook firing)
    #[error("Entity {entity:#x} no longer resolves to a live simulation object")]
    EntityUnresolved {
        entity: EntityId,
    },
}

/// Boundary to the live simulation: reads and writes the actual attribute
/// values of a simulated entity. The engine never touches the simulation
/// directly; everything flows through an implementation of this trait.
///
/// A `force_value` write is expressed as a delta from the current live
/// value and must bypass whatever internal regeneration or derivation
/// logic would immediately overwrite a plain set. Which internal modifier
/// a forced write lands on is the implementation's concern.
pub trait AttributeSource {
    fn read_value(&self, entity: EntityId, index: AttributeIndex) -> Result<f32, AdapterError>;

    fn read_max_value(&self, entity: EntityId, index: AttributeIndex)
        -> Result<f32, AdapterError>;

    fn set_value(
        &mut self,
        entity: EntityId,
        index: AttributeIndex,
        value: f32,
    ) -> Result<(), AdapterError>;

    fn force_value(
        &mut self,
        entity: EntityId,
        index: AttributeIndex,
        delta_from_current: f32,
    ) -> Result<(), AdapterError>;
}
