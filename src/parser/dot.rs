//! Recursive-descent parser for the DOT subset.
//!
//! The parser pulls tokens from a [`Lexer`] and writes nodes and edges into a
//! caller-supplied [`Graph`] as soon as each statement is complete. A failure
//! aborts the parse; statements finished before it stay in the graph.

use tracing::{debug, warn};

use crate::graph::{Attribute, Attributes, Graph, GraphError, GraphKind};

use super::error::{ParseError, ParseErrorKind, ParseResult, Position};
use super::lexer::{Lexer, Spanned, Token};

/// Parses a DOT document into a new graph.
///
/// # Example
///
/// ```rust
/// use dotroot::parser::parse_str;
///
/// let graph = parse_str(r#"digraph G { "a b" -> c [label="x\"y"]; }"#).unwrap();
///
/// assert_eq!(graph.name(), "G");
/// assert!(graph.contains("a b"));
/// assert_eq!(graph.edge_count(), 1);
///
/// let (_, edge) = graph.edges().next().unwrap();
/// assert_eq!(edge.attributes().get("label"), Some("x\"y"));
/// ```
pub fn parse_str(src: &str) -> ParseResult<Graph> {
    let mut graph = Graph::new();
    parse_into(&mut graph, src)?;
    Ok(graph)
}

/// Parses a DOT document into an existing graph.
///
/// # Arguments
///
/// * `graph` - Receives the kind, name, nodes and edges of the document
/// * `src` - The DOT source text
///
/// # Returns
///
/// `Ok(())` when the whole graph body was read. On error the graph keeps
/// everything that was added before the failing statement.
pub fn parse_into(graph: &mut Graph, src: &str) -> ParseResult<()> {
    DotParser {
        graph,
        lexer: Lexer::new(src),
    }
    .parse()
}

/// One identifier of an edge chain.
struct ChainLink {
    name: String,
    quoted: bool,
    position: Position,
}

struct DotParser<'g, 'a> {
    graph: &'g mut Graph,
    lexer: Lexer<'a>,
}

impl DotParser<'_, '_> {
    fn parse(&mut self) -> ParseResult<()> {
        self.header()?;
        self.statements()?;

        match self.lexer.peek_token() {
            Ok(Spanned {
                token: Token::Eof, ..
            }) => {}
            Ok(spanned) => warn!(
                "ignoring {} after the closing brace at {}",
                spanned.token, spanned.position
            ),
            Err(err) => warn!("ignoring unreadable content after the closing brace: {}", err),
        }

        Ok(())
    }

    /// `["strict"] ("graph" | "digraph") [ID] "{"`
    fn header(&mut self) -> ParseResult<()> {
        let mut spanned = self.lexer.next_token()?;

        if spanned.token == Token::Strict {
            warn!("'strict' is not supported and will be ignored");
            spanned = self.lexer.next_token()?;
        }

        let kind = match spanned.token {
            Token::Graph => GraphKind::Undirected,
            Token::Digraph => GraphKind::Directed,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedGraphKeyword(other.to_string()),
                    spanned.position,
                ))
            }
        };
        self.graph.set_kind(kind);

        let mut spanned = self.lexer.next_token()?;
        if let Token::Id { text, quoted } = spanned.token {
            self.graph.set_name(text, quoted);
            spanned = self.lexer.next_token()?;
        }

        match spanned.token {
            Token::OpenBrace => Ok(()),
            other => Err(expected("'{'", &other, spanned.position)),
        }
    }

    fn statements(&mut self) -> ParseResult<()> {
        loop {
            let Spanned { token, position } = self.lexer.next_token()?;

            match token {
                Token::CloseBrace => return Ok(()),
                Token::Semicolon | Token::Comma => {}
                Token::Graph | Token::Node | Token::Edge => self.default_attributes(&token)?,
                Token::Id { text, quoted } => self.statement(text, quoted, position)?,
                Token::Eof => return Err(expected("'}'", &token, position)),
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken(other.to_string()),
                        position,
                    ))
                }
            }
        }
    }

    /// `("graph" | "node" | "edge") "[" attr_list "]"`, read and discarded.
    fn default_attributes(&mut self, keyword: &Token) -> ParseResult<()> {
        let open = self.lexer.next_token()?;
        if open.token != Token::OpenBracket {
            return Err(expected("'['", &open.token, open.position));
        }

        let attributes = self.attribute_list()?;
        warn!(
            "ignoring {} default attributes at {} ({} attribute(s))",
            keyword,
            open.position,
            attributes.len()
        );
        Ok(())
    }

    /// Dispatches on the token that follows a leading identifier.
    fn statement(&mut self, name: String, quoted: bool, position: Position) -> ParseResult<()> {
        let next = self.lexer.peek_token()?;

        match next.token {
            Token::Equal => {
                self.lexer.next_token()?;
                let value = self.lexer.next_token()?;
                match value.token {
                    Token::Id { text, .. } => {
                        debug!("ignoring graph attribute {}={}", name, text);
                        Ok(())
                    }
                    other => Err(expected("identifier after '='", &other, value.position)),
                }
            }
            Token::OpenBracket => {
                self.lexer.next_token()?;
                let attributes = self.attribute_list()?;
                let id = self
                    .graph
                    .add_node(&name, quoted)
                    .map_err(|err| ParseError::new(err, position))?;
                if let Some(node) = self.graph.node_mut(id) {
                    for attribute in &attributes {
                        node.attributes_mut().insert(attribute.clone());
                    }
                }
                Ok(())
            }
            Token::UndirectedEdge | Token::DirectedEdge => {
                let first = ChainLink {
                    name,
                    quoted,
                    position,
                };
                self.edge_chain(first)
            }
            _ => {
                self.graph
                    .add_node(&name, quoted)
                    .map_err(|err| ParseError::new(err, position))?;
                Ok(())
            }
        }
    }

    /// `ID edgeop ID (edgeop ID)* ["[" attr_list "]"]`
    ///
    /// The whole chain is read before any edge is added.
    fn edge_chain(&mut self, first: ChainLink) -> ParseResult<()> {
        let mut links = vec![first];

        loop {
            let op = self.lexer.peek_token()?;
            let op_kind = match op.token {
                Token::UndirectedEdge => GraphKind::Undirected,
                Token::DirectedEdge => GraphKind::Directed,
                _ => break,
            };
            self.lexer.next_token()?;

            let graph_kind = self.graph.kind();
            if op_kind != graph_kind {
                return Err(ParseError::new(
                    ParseErrorKind::EdgeOperatorMismatch {
                        op: op_kind.edge_op().unwrap_or_default(),
                        kind: graph_kind,
                    },
                    op.position,
                ));
            }

            let target = self.lexer.next_token()?;
            match target.token {
                Token::Id { text, quoted } => links.push(ChainLink {
                    name: text,
                    quoted,
                    position: target.position,
                }),
                other => {
                    return Err(expected(
                        "identifier after edge operator",
                        &other,
                        target.position,
                    ))
                }
            }
        }

        let attributes = if self.lexer.peek_token()?.token == Token::OpenBracket {
            self.lexer.next_token()?;
            self.attribute_list()?
        } else {
            Attributes::new()
        };

        for pair in links.windows(2) {
            let (source, target) = (&pair[0], &pair[1]);
            let id = self
                .graph
                .add_edge_by_name(&source.name, &target.name, source.quoted, target.quoted)
                .map_err(|err| graph_error(err, source, target))?;

            if let Some(edge) = self.graph.edge_mut(id) {
                for attribute in &attributes {
                    edge.attributes_mut().insert(attribute.clone());
                }
            }
        }

        Ok(())
    }

    /// Reads `(ID "=" ID) ("," | ";")? ... "]"` after the opening bracket.
    fn attribute_list(&mut self) -> ParseResult<Attributes> {
        let mut attributes = Attributes::new();

        loop {
            let Spanned { token, position } = self.lexer.next_token()?;

            match token {
                Token::CloseBracket => return Ok(attributes),
                Token::Comma | Token::Semicolon => {}
                Token::Id { text, quoted } => {
                    let eq = self.lexer.next_token()?;
                    if eq.token != Token::Equal {
                        return Err(expected("'='", &eq.token, eq.position));
                    }

                    let value = self.lexer.next_token()?;
                    match value.token {
                        Token::Id {
                            text: value_text,
                            quoted: value_quoted,
                        } => {
                            attributes.insert(Attribute::new(text, value_text, quoted, value_quoted))
                        }
                        other => return Err(expected("attribute value", &other, value.position)),
                    }
                }
                other => return Err(expected("attribute name or ']'", &other, position)),
            }
        }
    }
}

fn expected(what: &'static str, found: &Token, position: Position) -> ParseError {
    ParseError::new(
        ParseErrorKind::Expected {
            expected: what,
            found: found.to_string(),
        },
        position,
    )
}

/// Locates a graph error on the identifier that caused it.
fn graph_error(err: GraphError, source: &ChainLink, target: &ChainLink) -> ParseError {
    let position = match err {
        GraphError::EmptyNodeName if !source.name.is_empty() => target.position,
        GraphError::EmptyNodeName => source.position,
        _ => target.position,
    };
    ParseError::new(err, position)
}
