//! Root solver for acyclic directed graphs.
//!
//! Given a graph, the solver picks the node that needs the fewest extra edges
//! to reach every other node, adds those edges and labels the chosen root.
//! Only nodes without entrant edges are considered as roots.
//!
//! # Example
//!
//! ```rust
//! use dotroot::parser::parse_str;
//! use dotroot::solver::{solve, SolveOptions};
//!
//! let mut graph = parse_str("digraph G { a -> b; c -> d }").unwrap();
//! let solution = solve(&mut graph, &SolveOptions::default()).unwrap();
//!
//! assert_eq!(solution.root_name, "a");
//! assert_eq!(solution.added_edges, 1);
//! assert_eq!(graph.name(), "out_G");
//! ```

mod distance;
mod root;

pub use root::solve;

use crate::graph::{CycleInfo, GraphError, NodeId};

/// Errors raised while searching for a root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The input graph has at least one cycle.
    #[error("the graph contains cycles ({} found)", .cycles.len())]
    Cyclic {
        /// Cycles reported by strongly connected component analysis
        cycles: Vec<CycleInfo>,
    },

    /// Every node has at least one entrant edge.
    #[error("the graph has no node without entrant edges")]
    NoCandidateRoot,

    /// No candidate can reach every node without creating a cycle.
    #[error("no root can reach every node of the graph")]
    NoRoot,

    /// The graph rejected an edge insertion.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type alias for solver operations.
pub type SolveResult<T> = Result<T, SolveError>;

/// Knobs for [`solve`].
///
/// The default reproduces the classic output: the graph is renamed with an
/// `out_` prefix and added edges are painted red.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    /// Prepended to the graph name
    pub output_prefix: String,
    /// Value of the `color` attribute set on added edges
    pub added_edge_color: String,
    /// Label every reachable node with its distance from the root
    pub label_distances: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            output_prefix: "out_".to_string(),
            added_edge_color: "red".to_string(),
            label_distances: false,
        }
    }
}

/// Outcome of a successful [`solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Handle of the chosen root in the solved graph
    pub root: NodeId,
    /// Name of the chosen root
    pub root_name: String,
    /// Number of edges the solver added
    pub added_edges: usize,
    /// Edge-count distance of every reachable node, in insertion order.
    /// Empty unless [`SolveOptions::label_distances`] is set.
    pub distances: Vec<(NodeId, usize)>,
}

impl Solution {
    /// Returns the distance of a node from the root, if it was computed.
    pub fn distance(&self, node: NodeId) -> Option<usize> {
        self.distances
            .iter()
            .find(|(id, _)| *id == node)
            .map(|&(_, d)| d)
    }
}
