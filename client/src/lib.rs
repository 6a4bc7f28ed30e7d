//! # Vitals Client
//! The attribute replication engine that runs in each simulating process.
//! Tracks per-entity attribute snapshots, emits minimal sparse diffs on a
//! fixed schedule for locally-owned entities, applies inbound updates to
//! remote mirrors with per-attribute write policy, and reconciles the
//! event-driven delta channel that coexists with the periodic channel.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod adapter;
mod delta_reconciler;
mod diff_scheduler;
mod error;
mod lifecycle;
mod remote_applier;
mod replicator;
mod snapshot_store;

pub use adapter::{AdapterError, AttributeSource};
pub use delta_reconciler::{apply_broadcast, handle_local_event};
pub use diff_scheduler::DiffScheduler;
pub use error::{EventError, RegisterError, StoreError};
pub use lifecycle::{on_disconnected, on_entity_registered, on_entity_removed};
pub use remote_applier::{apply_current_values, apply_max_values};
pub use replicator::AttributeReplicator;
pub use snapshot_store::{SnapshotStore, TrackedEntity};

#[cfg(test)]
mod tests;
