//! # Vitals Shared
//! Common functionality shared between vitals-client & vitals-server crates:
//! the attribute schema both ends must agree on, the wire message set, the
//! transport seams, and the interval timer driving the periodic diff cycle.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod backends;
mod error;
mod messages;
mod schema;
mod transport;
mod types;

pub use backends::Timer;
pub use error::SchemaError;
pub use messages::{
    CurrentValuesChanged, DeltaBroadcastNotify, DeltaBroadcastRequest, MaxValuesChanged, Message,
};
pub use schema::{AttributeSchema, AttributeSchemaBuilder, SyncRoute, WritePolicy};
pub use transport::{ReplicationPeer, ServerTransport};
pub use types::{AttributeIndex, ConnectionId, EntityId, Role};
