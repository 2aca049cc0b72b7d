//! Parser module for DOT graph descriptions.
//!
//! This module reads the subset of the DOT language that describes a single
//! graph: node and edge statements with attribute lists, chained edges,
//! graph-level assignments and comments. Subgraphs, ports and HTML labels are
//! not supported.
//!
//! # Example
//!
//! ```rust
//! use dotroot::graph::GraphKind;
//! use dotroot::parser::parse_str;
//!
//! let graph = parse_str("digraph deps { app -> core; app -> ui -> core }").unwrap();
//!
//! assert_eq!(graph.kind(), GraphKind::Directed);
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//!
//! let err = parse_str("graph G { a -> b; }").unwrap_err();
//! assert_eq!((err.line(), err.column()), (1, 13));
//! ```

mod dot;
mod error;
mod lexer;

pub use dot::{parse_into, parse_str};
pub use error::{ParseError, ParseErrorKind, ParseResult, Position};
pub use lexer::{Lexer, Spanned, Token};
