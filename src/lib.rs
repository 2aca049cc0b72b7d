//! dotroot - DOT graph parser and root solver
//!
//! This crate reads graphs written in a subset of the DOT language, finds the
//! node that needs the fewest extra edges to reach every other node of an
//! acyclic directed graph, and writes the augmented graph back out.
//!
//! # Example
//!
//! ```rust
//! use dotroot::export::{export_to_string, ExportFormat};
//! use dotroot::parser::parse_str;
//! use dotroot::solver::{solve, SolveOptions};
//!
//! let mut graph = parse_str("digraph G { a -> b; c -> d }").unwrap();
//! let solution = solve(&mut graph, &SolveOptions::default()).unwrap();
//! assert_eq!(solution.added_edges, 1);
//!
//! let dot = export_to_string(ExportFormat::Dot, &graph).unwrap();
//! assert!(dot.contains("a -> c [color=red];"));
//! ```

pub mod export;
pub mod graph;
pub mod parser;
pub mod solver;
