//! HTTP listener for game state integration updates.
//!
//! Accepts the JSON payloads the Dota 2 client POSTs, decodes them with
//! [`gsi_proto`] and hands each [`Snapshot`](gsi_proto::Snapshot) to caller
//! logic. Each request is served on its own task.

pub mod config;
pub mod network;

pub use config::{parse_listen_address, ConfigError, ListenAddress, ServerConfig};
pub use network::{router, serve, ServerError, SnapshotHandler};
