use thiserror::Error;

/// Errors raised while validating an attribute schema. The schema is an
/// out-of-band contract between peers, so every violation here is a local
/// configuration bug caught at build time, never a wire-level condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A referenced index lies outside the schema's fixed range
    #[error("Attribute index {index} is outside the schema range (attribute count: {attribute_count})")]
    IndexOutOfRange {
        index: u32,
        attribute_count: u32,
    },

    /// A referenced index is reserved/excluded
    #[error("Attribute index {index} is excluded from the schema and cannot carry a policy")]
    IndexExcluded {
        index: u32,
    },

    /// More than one attribute routed through the event-delta channel
    #[error("{count} attributes routed through the event-delta channel (the delta messages carry no attribute index, so at most 1 is allowed)")]
    MultipleEventRouted {
        count: usize,
    },

    /// Diff tolerance is negative, NaN, or infinite
    #[error("Diff tolerance {tolerance} is not a finite non-negative number")]
    InvalidTolerance {
        tolerance: f32,
    },
}
