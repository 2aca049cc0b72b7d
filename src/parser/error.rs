//! Errors reported by the DOT lexer and parser.

use std::fmt;

use crate::graph::{GraphError, GraphKind};

/// A 1-based line/column location in the DOT source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column number in characters, starting at 1
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// What went wrong while reading a DOT document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A `/*` comment was never closed.
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// A quoted identifier reached the end of input.
    #[error("unterminated quoted identifier")]
    UnterminatedString,

    /// A `"` appeared inside an unquoted identifier.
    #[error("unescaped '\"' inside identifier")]
    UnescapedQuote,

    /// A numeral with two decimal points.
    #[error("numeral '{0}' has more than one decimal point")]
    ExtraDecimalPoint(String),

    /// A `-` after the first character of an unquoted identifier.
    #[error("'-' is only allowed at the start of a numeral")]
    MisplacedMinus,

    /// A numeral without digits or followed by letters.
    #[error("invalid numeral '{0}'")]
    InvalidNumeral(String),

    /// A character that cannot start or continue any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// The document does not start with `graph` or `digraph`.
    #[error("expected 'graph' or 'digraph', found {0}")]
    ExpectedGraphKeyword(String),

    /// A specific token was required.
    #[error("expected {expected}, found {found}")]
    Expected {
        /// Description of the expected token
        expected: &'static str,
        /// Description of the token that was found
        found: String,
    },

    /// `--` in a digraph or `->` in a graph.
    #[error("edge operator '{op}' is not allowed in {kind} graphs")]
    EdgeOperatorMismatch {
        /// The operator that was written
        op: &'static str,
        /// The kind declared in the header
        kind: GraphKind,
    },

    /// A token that cannot start a statement.
    #[error("unexpected {0} at start of statement")]
    UnexpectedToken(String),

    /// The graph model rejected a node or edge.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A parse failure with its location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{position}: {kind}")]
pub struct ParseError {
    /// What went wrong
    pub kind: ParseErrorKind,
    /// Where it went wrong
    pub position: Position,
}

impl ParseError {
    /// Creates a new error at the given position.
    pub fn new(kind: impl Into<ParseErrorKind>, position: Position) -> Self {
        Self {
            kind: kind.into(),
            position,
        }
    }

    /// Returns the 1-based line of the error.
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Returns the 1-based column of the error.
    pub fn column(&self) -> usize {
        self.position.column
    }
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = ParseError::new(ParseErrorKind::UnterminatedComment, Position::new(3, 7));
        assert_eq!(
            err.to_string(),
            "line 3, column 7: unterminated block comment"
        );
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn test_graph_error_is_transparent() {
        let err = ParseError::new(GraphError::EmptyNodeName, Position::default());
        assert_eq!(err.to_string(), "line 1, column 1: node name must not be empty");
    }

    #[test]
    fn test_edge_operator_mismatch_message() {
        let kind = ParseErrorKind::EdgeOperatorMismatch {
            op: "->",
            kind: GraphKind::Undirected,
        };
        assert_eq!(
            kind.to_string(),
            "edge operator '->' is not allowed in undirected graphs"
        );
    }
}
