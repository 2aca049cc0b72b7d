//! Best-root search.
//!
//! Every candidate root is grown greedily: each round tries an edge from the
//! root to every node it cannot reach yet and keeps the one that leaves the
//! fewest nodes unreachable. The candidate needing the fewest edges wins.

use tracing::{debug, trace};

use crate::graph::{ColorMap, EdgeId, Graph, GraphResult, NodeId};

use super::distance::label_distances;
use super::{SolveError, SolveOptions, SolveResult, Solution};

/// Finds the best root of an acyclic graph and augments the graph so the
/// root reaches every node.
///
/// The graph is renamed with [`SolveOptions::output_prefix`] first. On
/// success it holds the added edges (tagged with
/// [`SolveOptions::added_edge_color`]) and the root carries a
/// `root = <name>; |E| - |E'| = <count>` label.
///
/// # Errors
///
/// * [`SolveError::Cyclic`] if the graph has a cycle
/// * [`SolveError::NoCandidateRoot`] if every node has an entrant edge
/// * [`SolveError::NoRoot`] if no candidate can reach every node
///
/// # Example
///
/// ```rust
/// use dotroot::parser::parse_str;
/// use dotroot::solver::{solve, SolveOptions};
///
/// let mut graph = parse_str("digraph { a -> b; a -> c; b -> d }").unwrap();
/// let solution = solve(&mut graph, &SolveOptions::default()).unwrap();
///
/// assert_eq!(solution.root_name, "a");
/// assert_eq!(solution.added_edges, 0);
/// ```
pub fn solve(graph: &mut Graph, options: &SolveOptions) -> SolveResult<Solution> {
    let name = format!("{}{}", options.output_prefix, graph.name());
    let quoted = graph.is_name_quoted();
    graph.set_name(name, quoted);

    if graph.is_cyclic() {
        return Err(SolveError::Cyclic {
            cycles: graph.cycles(),
        });
    }

    let (root_name, added_edges) = find_best_root(graph, options)?;
    let root = graph.node_id(&root_name).ok_or(SolveError::NoRoot)?;

    if let Some(node) = graph.node_mut(root) {
        node.attributes_mut().set(
            "label",
            format!("root = {}; |E| - |E'| = {}", root_name, added_edges),
            false,
            true,
        );
    }

    let distances = if options.label_distances {
        label_distances(graph, root)
    } else {
        Vec::new()
    };

    debug!("root '{}' needs {} added edge(s)", root_name, added_edges);

    Ok(Solution {
        root,
        root_name,
        added_edges,
        distances,
    })
}

/// Tries every non-entrant node and leaves the graph in the state of the best one.
///
/// # Returns
///
/// The name of the best root and the number of edges added for it.
fn find_best_root(graph: &mut Graph, options: &SolveOptions) -> SolveResult<(String, usize)> {
    let candidates = graph.non_entrant_nodes();
    if candidates.is_empty() {
        return Err(SolveError::NoCandidateRoot);
    }
    debug!("{} candidate root(s)", candidates.len());

    let mut colors = ColorMap::new(graph);
    let mut best: Option<(Graph, String, usize)> = None;

    for candidate in candidates {
        let name = match graph.node(candidate) {
            Some(node) => node.name().to_string(),
            None => continue,
        };

        let unreachable = graph.unreachable_nodes_with(candidate, &mut colors);
        if unreachable.is_empty() {
            debug!("'{}' already reaches every node", name);
            return Ok((name, 0));
        }

        let outcome = add_edges_to_root(graph, candidate, unreachable, &mut colors, options)?;
        trace!("candidate '{}' -> {:?} added edge(s)", name, outcome);

        if let Some(count) = outcome {
            if best.as_ref().map_or(true, |(_, _, b)| count < *b) {
                best = Some((graph.clone(), name, count));
            }
        }

        graph.remove_edges_added_by_solver();
    }

    let (snapshot, name, count) = best.ok_or(SolveError::NoRoot)?;
    *graph = snapshot;
    Ok((name, count))
}

/// Greedily adds edges from `root` until it reaches every node.
///
/// Returns `None` when some round finds no edge that keeps the graph acyclic.
fn add_edges_to_root(
    graph: &mut Graph,
    root: NodeId,
    mut unreachable: Vec<NodeId>,
    colors: &mut ColorMap,
    options: &SolveOptions,
) -> SolveResult<Option<usize>> {
    let mut added = 0;

    while !unreachable.is_empty() {
        let mut best: Option<NodeId> = None;
        let mut best_count = unreachable.len();

        for &node in &unreachable {
            let edge = match add_solver_edge(graph, root, node) {
                Ok(edge) => edge,
                Err(err) => {
                    trace!("skipping {:?}: {}", node, err);
                    continue;
                }
            };

            if !graph.is_cyclic_with(colors) {
                let remaining = graph.unreachable_count_with(root, colors);
                if remaining == 0 {
                    paint(graph, edge, options);
                    return Ok(Some(added + 1));
                }

                // Ties keep the earliest node
                if best.is_none() || remaining < best_count {
                    best = Some(node);
                    best_count = remaining;
                }
            }

            graph.remove_edge(edge);
        }

        let Some(node) = best else {
            return Ok(None);
        };

        let edge = add_solver_edge(graph, root, node)?;
        paint(graph, edge, options);
        added += 1;

        unreachable = graph.unreachable_nodes_with(root, colors);
    }

    Ok(Some(added))
}

fn add_solver_edge(graph: &mut Graph, source: NodeId, target: NodeId) -> GraphResult<EdgeId> {
    let id = graph.add_edge(source, target)?;
    if let Some(edge) = graph.edge_mut(id) {
        edge.set_added_by_solver(true);
    }
    Ok(id)
}

fn paint(graph: &mut Graph, id: EdgeId, options: &SolveOptions) {
    if let Some(edge) = graph.edge_mut(id) {
        edge.attributes_mut()
            .set("color", options.added_edge_color.as_str(), false, false);
    }
}
