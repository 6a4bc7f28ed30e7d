//! Wire messages for the two replication channels. Payloads are opaque
//! structured data here; how they are serialized onto a socket is the
//! transport's concern, not this crate's.

use std::collections::HashMap;

use crate::types::{AttributeIndex, EntityId};

/// Sparse periodic update: only the attributes whose live value diverged
/// from the sender's snapshot since the last tick.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentValuesChanged {
    pub entity_id: EntityId,
    pub values: HashMap<AttributeIndex, f32>,
}

/// Sparse periodic update over the max-tracked attribute subset.
#[derive(Clone, Debug, PartialEq)]
pub struct MaxValuesChanged {
    pub entity_id: EntityId,
    pub values: HashMap<AttributeIndex, f32>,
}

/// Client-to-server request to fan a signed event delta out to observers.
/// Forwarded by any process that witnessed the gameplay event, owner or not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaBroadcastRequest {
    pub entity_id: EntityId,
    pub delta: f32,
}

/// Server-to-client notification of an event delta; applied additively to
/// the live value at arrival time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaBroadcastNotify {
    pub entity_id: EntityId,
    pub delta: f32,
}

/// Envelope for every message the replication engine sends or receives.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    CurrentValuesChanged(CurrentValuesChanged),
    MaxValuesChanged(MaxValuesChanged),
    DeltaBroadcastRequest(DeltaBroadcastRequest),
    DeltaBroadcastNotify(DeltaBroadcastNotify),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Message::CurrentValuesChanged(_) => "CurrentValuesChanged",
            Message::MaxValuesChanged(_) => "MaxValuesChanged",
            Message::DeltaBroadcastRequest(_) => "DeltaBroadcastRequest",
            Message::DeltaBroadcastNotify(_) => "DeltaBroadcastNotify",
        }
    }

    pub fn entity_id(&self) -> EntityId {
        match self {
            Message::CurrentValuesChanged(message) => message.entity_id,
            Message::MaxValuesChanged(message) => message.entity_id,
            Message::DeltaBroadcastRequest(message) => message.entity_id,
            Message::DeltaBroadcastNotify(message) => message.entity_id,
        }
    }
}
