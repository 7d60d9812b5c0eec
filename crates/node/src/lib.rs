//! # Node data model
//!
//! The node system defines the geometric records the canvas engine operates
//! on. A node is identity, an opaque type tag, a rectangle in canvas space,
//! ordered port name lists, and an opaque configuration payload — the engine
//! never interprets what a node type *means*.

pub mod node;
pub mod port;
pub mod registry;

pub use node::{Node, NodeFactory, NodeId, NodeLayout};
pub use port::{port_anchor, PortAddress, PortSide};
pub use registry::{NodeTypeMetadata, NodeTypeRegistry, TypeCatalog};
