//! # Graph model
//!
//! The shared mutable store the editor operates on: nodes in z-order,
//! directional connections between ports, and snapshot load/save with
//! whole-load validation. All mutation happens synchronously on the thread
//! handling input events; the model is passed `&mut` into the canvas and
//! never shared across threads.

pub mod connection;
pub mod model;
pub mod snapshot;

pub use connection::{Connection, ConnectionId, ConnectionRejected, WireStyle};
pub use model::{GraphModel, UnknownNodeType};
pub use snapshot::{ConnectionRecord, GraphSnapshot, NodeRecord, SnapshotError};
