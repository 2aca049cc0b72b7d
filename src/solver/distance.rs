//! Distance labelling from the chosen root.

use tracing::trace;

use crate::graph::{EdgeId, Graph, NodeId};

const PREDECESSOR_STYLE: &str = "dashed";

/// Computes the edge-count distance from `root` to every reachable node.
///
/// The walk is a depth-first relaxation: a node is revisited whenever a
/// shorter path to it turns up. The edge a node was last reached through is
/// styled `dashed`, and the style moves when a shorter path replaces it.
/// Every reachable node other than the root gets a `<name> (d = <distance>)`
/// label.
///
/// # Returns
///
/// The distances of the reachable nodes, root included, in insertion order.
pub(crate) fn label_distances(graph: &mut Graph, root: NodeId) -> Vec<(NodeId, usize)> {
    let bound = graph.node_bound();
    let mut distance: Vec<Option<usize>> = vec![None; bound];
    let mut predecessor: Vec<Option<EdgeId>> = vec![None; bound];

    if root.index() >= bound {
        return Vec::new();
    }
    distance[root.index()] = Some(0);

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let Some(current) = distance[node.index()] else {
            continue;
        };

        let successors: Vec<NodeId> = graph.neighbors(node).collect();
        for next in successors {
            let candidate = current + 1;
            if distance[next.index()].is_some_and(|known| known <= candidate) {
                continue;
            }

            let Some(edge) = graph.find_edge(node, next) else {
                continue;
            };

            if let Some(old) = predecessor[next.index()].replace(edge) {
                trace!("shorter path to {:?} found, moving predecessor", next);
                if let Some(old) = graph.edge_mut(old) {
                    old.attributes_mut().remove("style");
                }
            }
            if let Some(edge) = graph.edge_mut(edge) {
                edge.attributes_mut()
                    .set("style", PREDECESSOR_STYLE, false, false);
            }

            distance[next.index()] = Some(candidate);
            stack.push(next);
        }
    }

    let reached: Vec<(NodeId, usize)> = graph
        .nodes()
        .filter_map(|(id, _)| distance[id.index()].map(|d| (id, d)))
        .collect();

    for &(id, d) in &reached {
        if id == root {
            continue;
        }
        if let Some(node) = graph.node_mut(id) {
            let label = format!("{} (d = {})", node.name(), d);
            node.attributes_mut().set("label", label, false, true);
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::solver::{solve, SolveOptions};

    fn edge_between<'g>(graph: &'g Graph, from: &str, to: &str) -> &'g crate::graph::Edge {
        let id = graph
            .find_edge(graph.node_id(from).unwrap(), graph.node_id(to).unwrap())
            .unwrap();
        graph.edge(id).unwrap()
    }

    #[test]
    fn test_distances_on_a_chain() {
        let mut graph = parse_str("digraph { a -> b; b -> c }").unwrap();
        let a = graph.node_id("a").unwrap();
        let distances = label_distances(&mut graph, a);

        let c = graph.node_id("c").unwrap();
        assert_eq!(distances.len(), 3);
        assert_eq!(distances[0], (a, 0));
        assert!(distances.contains(&(c, 2)));
        assert_eq!(
            graph.node_by_name("c").unwrap().attributes().get("label"),
            Some("c (d = 2)")
        );
        assert!(!graph.node_by_name("a").unwrap().attributes().contains("label"));
        assert_eq!(
            edge_between(&graph, "b", "c").attributes().get("style"),
            Some("dashed")
        );
    }

    #[test]
    fn test_shorter_path_moves_predecessor() {
        let mut graph =
            parse_str("digraph { a -> b; a -> c; b -> e; e -> d; c -> d }").unwrap();
        let a = graph.node_id("a").unwrap();
        let d = graph.node_id("d").unwrap();
        let distances = label_distances(&mut graph, a);

        assert!(distances.contains(&(d, 2)));
        assert_eq!(
            edge_between(&graph, "c", "d").attributes().get("style"),
            Some("dashed")
        );
        assert_eq!(edge_between(&graph, "e", "d").attributes().get("style"), None);

        let dashed = graph
            .edges()
            .filter(|(_, e)| e.attributes().get("style") == Some("dashed"))
            .count();
        // One predecessor edge per non-root node
        assert_eq!(dashed, 4);
    }

    #[test]
    fn test_unreachable_nodes_are_not_labelled() {
        let mut graph = parse_str("digraph { a -> b; c }").unwrap();
        let a = graph.node_id("a").unwrap();
        let distances = label_distances(&mut graph, a);

        assert_eq!(distances.len(), 2);
        assert!(!graph.node_by_name("c").unwrap().has_attributes());
    }

    #[test]
    fn test_solve_with_distances() {
        let mut graph = parse_str("digraph { a -> b; c -> d }").unwrap();
        let options = SolveOptions {
            label_distances: true,
            ..SolveOptions::default()
        };
        let solution = solve(&mut graph, &options).unwrap();

        let d = graph.node_id("d").unwrap();
        assert_eq!(solution.distance(d), Some(2));
        assert_eq!(solution.distance(solution.root), Some(0));
        assert_eq!(
            graph.node_by_name("a").unwrap().attributes().get("label"),
            Some("root = a; |E| - |E'| = 1")
        );

        // The added edge is both red and on the shortest path to 'c'
        let added = edge_between(&graph, "a", "c");
        assert!(added.is_added_by_solver());
        assert_eq!(added.attributes().get("color"), Some("red"));
        assert_eq!(added.attributes().get("style"), Some("dashed"));
    }
}
