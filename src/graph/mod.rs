//! Graph module for DOT graph modeling.
//!
//! This module provides the [`Graph`] struct, which owns nodes, edges and
//! their attribute lists, and the traversal algorithms the root solver
//! relies on: cycle detection, reachability and non-entrant node discovery.
//!
//! # Example
//!
//! ```rust
//! use dotroot::graph::{Graph, GraphKind};
//!
//! let mut graph = Graph::with_name("G", false, GraphKind::Directed);
//! graph.add_edge_by_name("a", "b", false, false).unwrap();
//! graph.add_edge_by_name("c", "b", false, false).unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(graph.non_entrant_nodes().len(), 2);
//! ```

mod algo;
mod attributes;
mod model;

pub use algo::{Color, ColorMap, CycleInfo};
pub use attributes::{Attribute, Attributes};
pub use model::{Edge, EdgeId, Graph, GraphError, GraphKind, GraphResult, Node, NodeId};
