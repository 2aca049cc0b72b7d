//! Traversal algorithms over [`Graph`].
//!
//! Every traversal uses tri-color marking: a node is white until the DFS
//! reaches it, gray while its successors are being explored and black once
//! they all are. Colors live in a [`ColorMap`] owned by the caller of the
//! traversal, never on the nodes, so repeated and nested traversals cannot
//! interfere with each other.

use petgraph::algo::tarjan_scc;

use super::model::{Graph, NodeId};

/// DFS marking state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Not reached yet
    #[default]
    White,
    /// On the current DFS path
    Gray,
    /// Fully explored
    Black,
}

/// Per-node colors for one traversal.
///
/// Reuse a single map across calls to the `*_with` methods to avoid an
/// allocation per traversal; each call resets it to all-white first.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: Vec<Color>,
}

impl ColorMap {
    /// Creates an all-white map sized for the given graph.
    pub fn new(graph: &Graph) -> Self {
        Self {
            colors: vec![Color::White; graph.node_bound()],
        }
    }

    /// Paints every node white again, resizing for the graph if needed.
    pub fn reset(&mut self, graph: &Graph) {
        self.colors.clear();
        self.colors.resize(graph.node_bound(), Color::White);
    }

    /// Returns the color of a node; unknown nodes are white.
    pub fn get(&self, id: NodeId) -> Color {
        self.colors.get(id.index()).copied().unwrap_or_default()
    }

    fn set(&mut self, id: NodeId, color: Color) {
        if let Some(slot) = self.colors.get_mut(id.index()) {
            *slot = color;
        }
    }
}

/// Information about a strongly connected component that forms a cycle.
///
/// Contains the names of the nodes in the component, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The node names in the component
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted string representation of the cycle.
    ///
    /// For example: "a -> b -> c -> a"
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        format!("{} -> {}", self.nodes.join(" -> "), first)
    }

    /// Returns the number of nodes in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Marks every node reachable from `start` gray and then black.
///
/// With `stop_on_cycle` the walk returns `false` as soon as it meets a gray
/// node, leaving the colors of the unfinished path gray. The walk keeps an
/// explicit stack so its depth is not bounded by the thread stack.
fn mark_reachable(graph: &Graph, start: NodeId, colors: &mut ColorMap, stop_on_cycle: bool) -> bool {
    colors.set(start, Color::Gray);
    let mut stack = vec![(start, graph.neighbors(start))];

    loop {
        let Some((node, neighbors)) = stack.last_mut() else {
            break;
        };
        let node = *node;

        match neighbors.next() {
            Some(next) => match colors.get(next) {
                Color::White => {
                    colors.set(next, Color::Gray);
                    stack.push((next, graph.neighbors(next)));
                }
                Color::Gray if stop_on_cycle => return false,
                _ => {}
            },
            None => {
                colors.set(node, Color::Black);
                stack.pop();
            }
        }
    }

    true
}

impl Graph {
    /// Checks if the graph contains a cycle.
    ///
    /// A graph without edges is never cyclic. Because an undirected edge is
    /// adjacent from both ends, any undirected graph with at least one edge
    /// counts as cyclic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dotroot::parser::parse_str;
    ///
    /// let graph = parse_str("digraph { a -> b; b -> c; c -> a }").unwrap();
    /// assert!(graph.is_cyclic());
    ///
    /// let graph = parse_str("digraph { a -> b; b -> c }").unwrap();
    /// assert!(!graph.is_cyclic());
    /// ```
    pub fn is_cyclic(&self) -> bool {
        let mut colors = ColorMap::new(self);
        self.is_cyclic_with(&mut colors)
    }

    /// Same as [`Graph::is_cyclic`], reusing the given color map.
    pub fn is_cyclic_with(&self, colors: &mut ColorMap) -> bool {
        if self.edge_count() == 0 {
            return false;
        }

        if !self.is_directed() {
            return true;
        }

        colors.reset(self);
        for (id, _) in self.nodes() {
            if colors.get(id) == Color::White && !mark_reachable(self, id, colors, true) {
                return true;
            }
        }

        false
    }

    /// Returns the nodes that cannot be reached from `start`, in insertion order.
    ///
    /// `start` itself is always reachable. If `start` does not belong to the
    /// graph, every node is returned.
    pub fn unreachable_nodes(&self, start: NodeId) -> Vec<NodeId> {
        let mut colors = ColorMap::new(self);
        self.unreachable_nodes_with(start, &mut colors)
    }

    /// Same as [`Graph::unreachable_nodes`], reusing the given color map.
    pub fn unreachable_nodes_with(&self, start: NodeId, colors: &mut ColorMap) -> Vec<NodeId> {
        self.mark_from(start, colors);
        self.nodes()
            .map(|(id, _)| id)
            .filter(|&id| colors.get(id) == Color::White)
            .collect()
    }

    /// Counts the nodes that cannot be reached from `start`.
    pub fn unreachable_count(&self, start: NodeId) -> usize {
        let mut colors = ColorMap::new(self);
        self.unreachable_count_with(start, &mut colors)
    }

    /// Same as [`Graph::unreachable_count`], reusing the given color map.
    pub fn unreachable_count_with(&self, start: NodeId, colors: &mut ColorMap) -> usize {
        self.mark_from(start, colors);
        self.nodes()
            .filter(|&(id, _)| colors.get(id) == Color::White)
            .count()
    }

    fn mark_from(&self, start: NodeId, colors: &mut ColorMap) {
        colors.reset(self);
        if self.node(start).is_some() {
            mark_reachable(self, start, colors, false);
        }
    }

    /// Returns true if no edge ends at `node`.
    pub fn is_non_entrant(&self, node: NodeId) -> bool {
        !self.has_incoming_edges(node)
    }

    /// Returns every node without entrant edges, in insertion order.
    ///
    /// These are the root candidates of an acyclic directed graph.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dotroot::parser::parse_str;
    ///
    /// let graph = parse_str("digraph { a -> b; b -> c }").unwrap();
    /// let roots = graph.non_entrant_nodes();
    ///
    /// assert_eq!(roots.len(), 1);
    /// assert_eq!(graph.node(roots[0]).unwrap().name(), "a");
    /// ```
    pub fn non_entrant_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .map(|(id, _)| id)
            .filter(|&id| self.is_non_entrant(id))
            .collect()
    }

    /// Detects the cycles of a directed graph.
    ///
    /// Each strongly connected component with more than one node is reported
    /// once. Components are listed by the insertion position of their first
    /// node.
    pub fn cycles(&self) -> Vec<CycleInfo> {
        let mut components: Vec<Vec<NodeId>> = tarjan_scc(self.inner())
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        components.sort_by_key(|scc| scc[0]);

        components
            .into_iter()
            .map(|scc| CycleInfo {
                nodes: scc
                    .iter()
                    .filter_map(|&id| self.node(id))
                    .map(|node| node.name().to_string())
                    .collect(),
            })
            .collect()
    }
}
