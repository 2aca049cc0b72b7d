//! DOT export implementation.
//!
//! Writes a graph in the same DOT subset the parser reads. Nodes that already
//! appear as the source of an edge and carry no attributes are left to their
//! edge statements.

use super::{ExportError, ExportResult, Exporter};
use crate::graph::{Attributes, Graph};
use std::io::Write;

/// DOT exporter implementation.
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export<W: Write>(&self, graph: &Graph, writer: &mut W) -> ExportResult<()> {
        let keyword = graph.kind().keyword().ok_or(ExportError::InvalidKind)?;
        let edge_op = graph.kind().edge_op().ok_or(ExportError::InvalidKind)?;

        write!(writer, "{} ", keyword)?;
        if !graph.name().is_empty() || graph.is_name_quoted() {
            write!(writer, "{} ", id(graph.name(), graph.is_name_quoted()))?;
        }
        writeln!(writer, "{{")?;

        for (node_id, node) in graph.nodes() {
            if graph.has_adjacent_nodes(node_id) && !node.has_attributes() {
                continue;
            }
            write!(writer, "{}", id(node.name(), node.is_quoted()))?;
            write_attributes(writer, node.attributes())?;
        }

        for (_, edge) in graph.edges() {
            let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
            else {
                continue;
            };
            write!(
                writer,
                "{} {} {}",
                id(source.name(), source.is_quoted()),
                edge_op,
                id(target.name(), target.is_quoted())
            )?;
            write_attributes(writer, edge.attributes())?;
        }

        writeln!(writer, "}}")?;
        Ok(())
    }
}

/// Writes ` [a=b, c=d];` or just `;`, followed by a newline.
fn write_attributes<W: Write>(writer: &mut W, attributes: &Attributes) -> ExportResult<()> {
    if attributes.is_empty() {
        writeln!(writer, ";")?;
        return Ok(());
    }

    let list: Vec<String> = attributes
        .iter()
        .map(|a| format!("{}={}", id(&a.name, a.quote_name), id(&a.value, a.quote_value)))
        .collect();
    writeln!(writer, " [{}];", list.join(", "))?;
    Ok(())
}

/// Renders an identifier, adding quotes when requested or when the text
/// would not survive being read back unquoted.
fn id(text: &str, quoted: bool) -> String {
    if quoted || !is_plain_id(text) {
        format!("\"{}\"", text.replace('"', "\\\""))
    } else {
        text.to_string()
    }
}

fn is_plain_id(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if first.is_alphabetic() || first == '_' {
        let keyword = matches!(
            text.to_ascii_lowercase().as_str(),
            "strict" | "graph" | "digraph" | "node" | "edge"
        );
        return !keyword && chars.all(|c| c.is_alphanumeric() || c == '_');
    }

    is_numeral(text)
}

fn is_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut dots = 0;
    let mut seen_digit = false;

    for c in digits.chars() {
        match c {
            '.' => dots += 1,
            c if c.is_ascii_digit() => seen_digit = true,
            _ => return false,
        }
    }

    seen_digit && dots <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export_to_string, ExportFormat};
    use crate::graph::GraphKind;
    use crate::parser::parse_str;
    use crate::solver::{solve, SolveOptions};

    fn to_dot(graph: &Graph) -> String {
        export_to_string(ExportFormat::Dot, graph).unwrap()
    }

    fn edge_list(graph: &Graph) -> Vec<(String, String, Attributes)> {
        graph
            .edges()
            .map(|(_, e)| {
                (
                    graph.node(e.source()).unwrap().name().to_string(),
                    graph.node(e.target()).unwrap().name().to_string(),
                    e.attributes().clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_dot_export_layout() {
        let graph = parse_str("digraph G { a -> b [color=blue, label=\"x y\"]; c [shape=box]; d }")
            .unwrap();

        assert_eq!(
            to_dot(&graph),
            "digraph G {\nb;\nc [shape=box];\nd;\na -> b [color=blue, label=\"x y\"];\n}\n"
        );
    }

    #[test]
    fn test_dot_export_undirected() {
        let graph = parse_str("graph { a -- b; b -- c }").unwrap();
        // Every node has a neighbour, so only edges are written
        assert_eq!(to_dot(&graph), "graph {\na -- b;\nb -- c;\n}\n");
    }

    #[test]
    fn test_dot_export_quoting() {
        let graph = parse_str(r#"digraph "my graph" { "a b" -> c [label="x\"y"]; "d" }"#).unwrap();
        let dot = to_dot(&graph);

        assert!(dot.starts_with("digraph \"my graph\" {\n"));
        assert!(dot.contains("\"d\";\n"));
        assert!(dot.contains("\"a b\" -> c [label=\"x\\\"y\"];\n"));
    }

    #[test]
    fn test_unsafe_names_are_quoted() {
        let mut graph = Graph::with_name("G", false, GraphKind::Directed);
        graph.add_node("a-b", false).unwrap();
        graph.add_node("node", false).unwrap();
        graph.add_node("-1.5", false).unwrap();
        graph.add_node("1.2.3", false).unwrap();

        assert_eq!(
            to_dot(&graph),
            "digraph G {\n\"a-b\";\n\"node\";\n-1.5;\n\"1.2.3\";\n}\n"
        );
    }

    #[test]
    fn test_solved_graph_output() {
        let mut graph = parse_str("digraph G { a -> b; c -> d }").unwrap();
        solve(&mut graph, &SolveOptions::default()).unwrap();

        assert_eq!(
            to_dot(&graph),
            "digraph out_G {\na [label=\"root = a; |E| - |E'| = 1\"];\nb;\nd;\n\
             a -> b;\nc -> d;\na -> c [color=red];\n}\n"
        );
    }

    #[test]
    fn test_round_trip_is_stable() {
        let src = r#"
            digraph "deps" {
                app [shape=box, "font name"=Helvetica];
                app -> core -> "util s" [weight=2];
                app -> ui;
                ui -> core;
                lonely;
                -4.5 -> app [label="say \"hi\""];
            }
        "#;
        let graph = parse_str(src).unwrap();
        let first = to_dot(&graph);

        let reparsed = parse_str(&first).unwrap();
        assert_eq!(reparsed.name(), graph.name());
        assert_eq!(reparsed.kind(), graph.kind());
        assert_eq!(reparsed.node_count(), graph.node_count());
        assert_eq!(edge_list(&reparsed), edge_list(&graph));
        for (_, node) in graph.nodes() {
            let other = reparsed.node_by_name(node.name()).unwrap();
            assert_eq!(other.attributes(), node.attributes());
        }

        let second = to_dot(&reparsed);
        assert_eq!(parse_str(&second).map(|g| to_dot(&g)).unwrap(), second);
    }
}
