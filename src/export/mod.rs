//! Export functionality for graphs.
//!
//! This module provides exporters for writing a [`Graph`] back out, either
//! as DOT text that the parser can read again or as JSON for other tools.

pub mod dot;
pub mod json;

use crate::graph::Graph;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// DOT format - readable by Graphviz and by this crate's parser
    #[default]
    Dot,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" => Ok(ExportFormat::Dot),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: dot, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Dot => write!(f, "dot"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Errors raised while exporting a graph.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The writer failed.
    #[error("failed to write graph: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization failed.
    #[error("failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),

    /// Only directed and undirected graphs can be written.
    #[error("cannot export a graph whose kind was never declared")]
    InvalidKind,
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Trait for exporters.
pub trait Exporter {
    /// Export the graph to the given writer.
    fn export<W: Write>(&self, graph: &Graph, writer: &mut W) -> ExportResult<()>;
}

/// Export a graph in the specified format.
pub fn export<W: Write>(format: ExportFormat, graph: &Graph, writer: &mut W) -> ExportResult<()> {
    match format {
        ExportFormat::Dot => dot::DotExporter.export(graph, writer),
        ExportFormat::Json => json::JsonExporter.export(graph, writer),
    }
}

/// Export a graph to a string.
///
/// # Example
///
/// ```rust
/// use dotroot::export::{export_to_string, ExportFormat};
/// use dotroot::parser::parse_str;
///
/// let graph = parse_str("digraph G { a -> b }").unwrap();
/// let dot = export_to_string(ExportFormat::Dot, &graph).unwrap();
///
/// assert_eq!(dot, "digraph G {\nb;\na -> b;\n}\n");
/// ```
pub fn export_to_string(format: ExportFormat, graph: &Graph) -> ExportResult<String> {
    let mut buffer = Vec::new();
    export(format, graph, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("dot".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!("GV".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Dot), "dot");
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(ExportFormat::default(), ExportFormat::Dot);
    }

    #[test]
    fn test_export_dispatches_on_format() {
        let graph = parse_str("graph G { a -- b }").unwrap();

        let dot = export_to_string(ExportFormat::Dot, &graph).unwrap();
        assert!(dot.starts_with("graph G {"));

        let json = export_to_string(ExportFormat::Json, &graph).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["kind"], "undirected");
    }

    #[test]
    fn test_invalid_kind_is_rejected() {
        let graph = Graph::new();
        assert!(matches!(
            export_to_string(ExportFormat::Dot, &graph),
            Err(ExportError::InvalidKind)
        ));
        assert!(matches!(
            export_to_string(ExportFormat::Json, &graph),
            Err(ExportError::InvalidKind)
        ));
    }
}
