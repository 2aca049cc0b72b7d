//! JSON export implementation.
//!
//! Exports a graph in JSON format for machine-readable output.

use super::{ExportError, ExportResult, Exporter};
use crate::graph::{Attributes, Graph};
use serde::Serialize;
use std::io::Write;

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable node for JSON output.
#[derive(Serialize)]
struct JsonNode<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    attributes: &'a Attributes,
}

/// Serializable edge for JSON output.
#[derive(Serialize)]
struct JsonEdge<'a> {
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    attributes: &'a Attributes,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    added: bool,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    nodes: usize,
    edges: usize,
    added_edges: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonGraph<'a> {
    name: &'a str,
    kind: String,
    summary: JsonSummary,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
}

fn is_empty(attributes: &&Attributes) -> bool {
    attributes.is_empty()
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, graph: &Graph, writer: &mut W) -> ExportResult<()> {
        if graph.kind().keyword().is_none() {
            return Err(ExportError::InvalidKind);
        }

        let nodes: Vec<JsonNode> = graph
            .nodes()
            .map(|(_, node)| JsonNode {
                name: node.name(),
                attributes: node.attributes(),
            })
            .collect();

        let edges: Vec<JsonEdge> = graph
            .edges()
            .filter_map(|(_, edge)| {
                Some(JsonEdge {
                    source: graph.node(edge.source())?.name(),
                    target: graph.node(edge.target())?.name(),
                    attributes: edge.attributes(),
                    added: edge.is_added_by_solver(),
                })
            })
            .collect();

        let export = JsonGraph {
            name: graph.name(),
            kind: graph.kind().to_string(),
            summary: JsonSummary {
                nodes: nodes.len(),
                edges: edges.len(),
                added_edges: edges.iter().filter(|e| e.added).count(),
            },
            nodes,
            edges,
        };

        let json = serde_json::to_string_pretty(&export)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::solver::{solve, SolveOptions};

    fn export_json(graph: &Graph) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(graph, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_json_export_basic() {
        let graph = parse_str("digraph G { a -> b; c }").unwrap();
        let parsed = export_json(&graph);

        assert_eq!(parsed["name"], "G");
        assert_eq!(parsed["kind"], "directed");
        assert_eq!(parsed["summary"]["nodes"], 3);
        assert_eq!(parsed["summary"]["edges"], 1);
        assert_eq!(parsed["summary"]["added_edges"], 0);
    }

    #[test]
    fn test_json_export_attributes() {
        let graph = parse_str(r#"digraph { a [shape=box] a -> b [label="x\"y"] }"#).unwrap();
        let parsed = export_json(&graph);

        let nodes = parsed["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["name"], "a");
        assert_eq!(nodes[0]["attributes"][0]["name"], "shape");
        assert_eq!(nodes[0]["attributes"][0]["value"], "box");
        assert!(nodes[1].get("attributes").is_none());

        let edges = parsed["edges"].as_array().unwrap();
        assert_eq!(edges[0]["source"], "a");
        assert_eq!(edges[0]["target"], "b");
        assert_eq!(edges[0]["attributes"][0]["value"], "x\"y");
        assert!(edges[0].get("added").is_none());
    }

    #[test]
    fn test_json_export_solved_graph() {
        let mut graph = parse_str("digraph G { a -> b; c -> d }").unwrap();
        solve(&mut graph, &SolveOptions::default()).unwrap();
        let parsed = export_json(&graph);

        assert_eq!(parsed["name"], "out_G");
        assert_eq!(parsed["summary"]["added_edges"], 1);

        let added: Vec<_> = parsed["edges"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|e| e["added"] == true)
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0]["target"], "c");
    }
}
