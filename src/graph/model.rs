//! Graph model backed by a petgraph arena.
//!
//! Nodes and edges live in a [`StableDiGraph`], so their handles stay valid
//! while other edges are removed. Undirected graphs use the same store and
//! simply read adjacency in both directions. Edge insertion order is tracked
//! separately because the arena reuses vacant slots after removals.

use petgraph::stable_graph::{EdgeIndex, Neighbors, NodeIndex, StableDiGraph};
use petgraph::visit::NodeIndexable;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::attributes::Attributes;

/// Handle to a node owned by a [`Graph`].
pub type NodeId = NodeIndex;

/// Handle to an edge owned by a [`Graph`].
pub type EdgeId = EdgeIndex;

/// Errors raised by graph mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Nodes must have a non-empty name.
    #[error("node name must not be empty")]
    EmptyNodeName,

    /// A handle that does not belong to this graph was used.
    #[error("node #{0} does not belong to this graph")]
    UnknownNode(usize),

    /// Edges must connect two different nodes.
    #[error("edge from '{0}' to itself is not allowed")]
    SelfLoop(String),

    /// An equivalent edge already exists.
    #[error("an edge between '{from}' and '{to}' already exists")]
    DuplicateEdge {
        /// Name of the start node
        from: String,
        /// Name of the end node
        to: String,
    },
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Whether the graph is directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphKind {
    /// Declared with `graph`; edges use `--`
    Undirected,
    /// Declared with `digraph`; edges use `->`
    Directed,
    /// Not declared yet
    #[default]
    Invalid,
}

impl GraphKind {
    /// Returns the DOT keyword that declares this kind of graph.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            GraphKind::Undirected => Some("graph"),
            GraphKind::Directed => Some("digraph"),
            GraphKind::Invalid => None,
        }
    }

    /// Returns the edge operator used by this kind of graph.
    pub fn edge_op(&self) -> Option<&'static str> {
        match self {
            GraphKind::Undirected => Some("--"),
            GraphKind::Directed => Some("->"),
            GraphKind::Invalid => None,
        }
    }

    /// Returns true for directed graphs.
    pub fn is_directed(&self) -> bool {
        matches!(self, GraphKind::Directed)
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Undirected => write!(f, "undirected"),
            GraphKind::Directed => write!(f, "directed"),
            GraphKind::Invalid => write!(f, "invalid"),
        }
    }
}

/// A named vertex.
///
/// Nodes can only be created through [`Graph::add_node`].
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    quoted: bool,
    attributes: Attributes,
}

impl Node {
    fn new(name: impl Into<String>, quoted: bool) -> Self {
        Self {
            name: name.into(),
            quoted,
            attributes: Attributes::new(),
        }
    }

    /// Returns the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the name was written between double quotes.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Returns the node attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the node attributes for modification.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Returns true if the node carries at least one attribute.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// A connection between two distinct nodes.
///
/// Edges can only be created through [`Graph::add_edge`].
#[derive(Debug, Clone)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    attributes: Attributes,
    added_by_solver: bool,
}

impl Edge {
    fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            attributes: Attributes::new(),
            added_by_solver: false,
        }
    }

    /// Returns the start node.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the end node.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the edge attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the edge attributes for modification.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Returns true if the edge carries at least one attribute.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns true if the edge was inserted by the root solver.
    pub fn is_added_by_solver(&self) -> bool {
        self.added_by_solver
    }

    pub(crate) fn set_added_by_solver(&mut self, added: bool) {
        self.added_by_solver = added;
    }
}

/// A DOT graph: a name, a kind, and the nodes and edges it owns.
///
/// # Example
///
/// ```rust
/// use dotroot::graph::{Graph, GraphKind};
///
/// let mut graph = Graph::with_name("G", false, GraphKind::Directed);
/// let a = graph.add_node("a", false).unwrap();
/// let b = graph.add_node("b", false).unwrap();
/// graph.add_edge(a, b).unwrap();
///
/// // Duplicate edges are rejected
/// assert!(graph.add_edge(a, b).is_err());
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: String,
    quoted: bool,
    kind: GraphKind,
    inner: StableDiGraph<Node, Edge>,
    /// Maps node names to their handles for O(1) lookup
    node_indices: HashMap<String, NodeId>,
    /// Live edges in insertion order
    edge_order: Vec<EdgeId>,
}

impl Graph {
    /// Creates a new empty graph with no name and an invalid kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty graph with the given name and kind.
    pub fn with_name(name: impl Into<String>, quoted: bool, kind: GraphKind) -> Self {
        Self {
            name: name.into(),
            quoted,
            kind,
            ..Self::default()
        }
    }

    /// Returns the graph name (possibly empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the graph name was written between double quotes.
    pub fn is_name_quoted(&self) -> bool {
        self.quoted
    }

    /// Renames the graph.
    pub fn set_name(&mut self, name: impl Into<String>, quoted: bool) {
        self.name = name.into();
        self.quoted = quoted;
    }

    /// Returns the graph kind.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Changes the graph kind.
    pub fn set_kind(&mut self, kind: GraphKind) {
        self.kind = kind;
    }

    /// Returns true if the graph is directed.
    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    /// Adds a node, or returns the existing one with the same name.
    ///
    /// The quoting flag of an existing node is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dotroot::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let first = graph.add_node("a", false).unwrap();
    /// let second = graph.add_node("a", true).unwrap();
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(graph.node_count(), 1);
    /// assert!(graph.add_node("", false).is_err());
    /// ```
    pub fn add_node(&mut self, name: &str, quoted: bool) -> GraphResult<NodeId> {
        if name.is_empty() {
            return Err(GraphError::EmptyNodeName);
        }

        if let Some(&id) = self.node_indices.get(name) {
            return Ok(id);
        }

        let id = self.inner.add_node(Node::new(name, quoted));
        self.node_indices.insert(name.to_string(), id);
        Ok(id)
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Fails if either handle is unknown, if both handles are the same node,
    /// or if an equivalent edge exists. In undirected graphs `a -- b` and
    /// `b -- a` are the same edge.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<EdgeId> {
        for id in [source, target] {
            if !self.inner.contains_node(id) {
                return Err(GraphError::UnknownNode(id.index()));
            }
        }

        if source == target {
            return Err(GraphError::SelfLoop(self.inner[source].name.clone()));
        }

        if self.find_edge(source, target).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: self.inner[source].name.clone(),
                to: self.inner[target].name.clone(),
            });
        }

        let id = self.inner.add_edge(source, target, Edge::new(source, target));
        self.edge_order.push(id);
        Ok(id)
    }

    /// Adds an edge between two nodes identified by name, creating them if needed.
    pub fn add_edge_by_name(
        &mut self,
        source: &str,
        target: &str,
        quote_source: bool,
        quote_target: bool,
    ) -> GraphResult<EdgeId> {
        if source.is_empty() || target.is_empty() {
            return Err(GraphError::EmptyNodeName);
        }

        let source = self.add_node(source, quote_source)?;
        let target = self.add_node(target, quote_target)?;
        self.add_edge(source, target)
    }

    /// Finds the edge connecting two nodes, honouring the graph kind.
    pub fn find_edge(&self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        let forward = self.inner.find_edge(source, target);
        if self.is_directed() {
            forward
        } else {
            forward.or_else(|| self.inner.find_edge(target, source))
        }
    }

    /// Removes an edge and returns it.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.inner.remove_edge(id)?;
        self.edge_order.retain(|&e| e != id);
        Some(edge)
    }

    /// Removes every edge inserted by the root solver.
    ///
    /// # Returns
    ///
    /// The number of removed edges.
    pub fn remove_edges_added_by_solver(&mut self) -> usize {
        let added: HashSet<EdgeId> = self
            .edges()
            .filter(|(_, edge)| edge.is_added_by_solver())
            .map(|(id, _)| id)
            .collect();

        for &id in &added {
            self.inner.remove_edge(id);
        }
        self.edge_order.retain(|id| !added.contains(id));

        added.len()
    }

    /// Looks up a node handle by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_indices.get(name).copied()
    }

    /// Returns the node with the given handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.inner.node_weight(id)
    }

    /// Returns the node with the given handle for modification.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.inner.node_weight_mut(id)
    }

    /// Returns a node by name.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// Returns the handle of the node at the given position in insertion order.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        // Nodes are never removed, so positions and arena slots coincide.
        (index < self.inner.node_count()).then(|| NodeIndex::new(index))
    }

    /// Returns the handle of the edge at the given position in insertion order.
    pub fn edge_at(&self, index: usize) -> Option<EdgeId> {
        self.edge_order.get(index).copied()
    }

    /// Returns the edge with the given handle.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.inner.edge_weight(id)
    }

    /// Returns the edge with the given handle for modification.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.inner.edge_weight_mut(id)
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.inner
            .node_indices()
            .filter_map(move |id| self.inner.node_weight(id).map(|node| (id, node)))
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edge_order
            .iter()
            .filter_map(move |&id| self.inner.edge_weight(id).map(|edge| (id, edge)))
    }

    /// Returns the nodes directly reachable from `id`.
    ///
    /// Directed graphs yield successors only; undirected graphs yield
    /// neighbours on both sides of each edge.
    pub fn neighbors(&self, id: NodeId) -> Neighbors<'_, Edge> {
        if self.is_directed() {
            self.inner.neighbors_directed(id, Direction::Outgoing)
        } else {
            self.inner.neighbors_undirected(id)
        }
    }

    /// Returns true if at least one node is directly reachable from `id`.
    pub fn has_adjacent_nodes(&self, id: NodeId) -> bool {
        self.neighbors(id).next().is_some()
    }

    /// Returns true if some edge ends at `id`.
    pub fn has_incoming_edges(&self, id: NodeId) -> bool {
        self.inner
            .edges_directed(id, Direction::Incoming)
            .next()
            .is_some()
    }

    /// Returns true if a node with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Checks if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Upper bound of node handle indices, for per-node side tables.
    pub(crate) fn node_bound(&self) -> usize {
        self.inner.node_bound()
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<Node, Edge> {
        &self.inner
    }
}
