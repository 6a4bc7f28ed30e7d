//! # Vitals Server
//! The relay between replicating processes: tracks connections and entity
//! ownership claims, validates inbound attribute updates against them, and
//! fans event-delta broadcasts out to every observer.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod connection;
mod error;
mod relay;

pub use connection::ConnectionRegistry;
pub use error::ClaimError;
pub use relay::RelayServer;
