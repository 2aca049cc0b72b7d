//! Tokenizer for the DOT subset.
//!
//! The lexer walks the source with an explicit cursor and keeps the 1-based
//! line and column of that cursor for diagnostics. Comments are trivia and
//! are skipped between tokens. Cloning a lexer is cheap, which is how the
//! parser looks one token ahead.

use std::fmt;

use super::error::{ParseError, ParseErrorKind, ParseResult, Position};

/// A DOT token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `strict`
    Strict,
    /// `graph`
    Graph,
    /// `digraph`
    Digraph,
    /// `node`
    Node,
    /// `edge`
    Edge,
    /// Identifier, numeral or quoted string
    Id {
        /// Text with escaped quotes resolved
        text: String,
        /// Whether the identifier was written between double quotes
        quoted: bool,
    },
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `=`
    Equal,
    /// `--`
    UndirectedEdge,
    /// `->`
    DirectedEdge,
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Strict => write!(f, "'strict'"),
            Token::Graph => write!(f, "'graph'"),
            Token::Digraph => write!(f, "'digraph'"),
            Token::Node => write!(f, "'node'"),
            Token::Edge => write!(f, "'edge'"),
            Token::Id { text, .. } => write!(f, "identifier '{}'", text),
            Token::OpenBrace => write!(f, "'{{'"),
            Token::CloseBrace => write!(f, "'}}'"),
            Token::OpenBracket => write!(f, "'['"),
            Token::CloseBracket => write!(f, "']'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Comma => write!(f, "','"),
            Token::Equal => write!(f, "'='"),
            Token::UndirectedEdge => write!(f, "'--'"),
            Token::DirectedEdge => write!(f, "'->'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token
    pub token: Token,
    /// Where it starts
    pub position: Position,
}

/// Characters that end an unquoted identifier without being part of it.
fn is_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | ',' | '[' | ']' | '=' | '{' | '}')
}

/// Cursor over DOT source text.
///
/// # Example
///
/// ```rust
/// use dotroot::parser::{Lexer, Token};
///
/// let mut lexer = Lexer::new("digraph { a -> \"b c\" }");
/// assert_eq!(lexer.next_token().unwrap().token, Token::Digraph);
/// assert_eq!(lexer.next_token().unwrap().token, Token::OpenBrace);
/// assert_eq!(
///     lexer.next_token().unwrap().token,
///     Token::Id { text: "a".into(), quoted: false }
/// );
/// assert_eq!(lexer.next_token().unwrap().token, Token::DirectedEdge);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the position of the cursor.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&self) -> ParseResult<Spanned> {
        self.clone().next_token()
    }

    /// Consumes and returns the next token, skipping whitespace and comments.
    pub fn next_token(&mut self) -> ParseResult<Spanned> {
        self.skip_trivia()?;
        let position = self.position();

        let Some(c) = self.peek() else {
            return Ok(Spanned {
                token: Token::Eof,
                position,
            });
        };

        let token = match c {
            '{' => self.single(Token::OpenBrace),
            '}' => self.single(Token::CloseBrace),
            '[' => self.single(Token::OpenBracket),
            ']' => self.single(Token::CloseBracket),
            ';' => self.single(Token::Semicolon),
            ',' => self.single(Token::Comma),
            '=' => self.single(Token::Equal),
            '-' if self.peek_second() == Some('-') => {
                self.bump();
                self.single(Token::UndirectedEdge)
            }
            '-' if self.peek_second() == Some('>') => {
                self.bump();
                self.single(Token::DirectedEdge)
            }
            '"' => self.quoted_id(position)?,
            '-' | '.' => self.numeral(position)?,
            c if c.is_ascii_digit() => self.numeral(position)?,
            c if c.is_alphabetic() || c == '_' => self.identifier()?,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter(other),
                    position,
                ))
            }
        };

        Ok(Spanned { token, position })
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn at_comment_start(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_second(), Some('/') | Some('*'))
    }

    /// True when the cursor sits on something that ends an unquoted identifier.
    fn at_identifier_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(c) => is_terminator(c) || self.at_comment_start(),
        }
    }

    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.position();
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            None => {
                                return Err(ParseError::new(
                                    ParseErrorKind::UnterminatedComment,
                                    start,
                                ))
                            }
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Reads a double-quoted identifier.
    ///
    /// `\"` produces a literal quote; any other backslash pair is kept as written.
    fn quoted_id(&mut self, start: Position) -> ParseResult<Token> {
        self.bump();
        let mut text = String::new();

        loop {
            match self.bump() {
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedString,
                        start,
                    ))
                }
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('"') => text.push('"'),
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    }
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnterminatedString,
                            start,
                        ))
                    }
                },
                Some(c) => text.push(c),
            }
        }

        Ok(Token::Id { text, quoted: true })
    }

    /// Reads an unquoted alphabetic identifier or keyword.
    fn identifier(&mut self) -> ParseResult<Token> {
        let mut text = String::new();

        while !self.at_identifier_end() {
            let position = self.position();
            match self.peek() {
                Some(c) if c.is_alphanumeric() || c == '_' => {
                    text.push(c);
                    self.bump();
                }
                Some('"') => {
                    return Err(ParseError::new(ParseErrorKind::UnescapedQuote, position))
                }
                Some('-') => {
                    return Err(ParseError::new(ParseErrorKind::MisplacedMinus, position))
                }
                Some(c) => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedCharacter(c),
                        position,
                    ))
                }
                None => break,
            }
        }

        let token = match text.to_ascii_lowercase().as_str() {
            "strict" => Token::Strict,
            "graph" => Token::Graph,
            "digraph" => Token::Digraph,
            "node" => Token::Node,
            "edge" => Token::Edge,
            _ => Token::Id {
                text,
                quoted: false,
            },
        };

        Ok(token)
    }

    /// Reads a numeral: an optional leading `-`, digits and at most one `.`.
    fn numeral(&mut self, start: Position) -> ParseResult<Token> {
        let mut text = String::new();
        let mut seen_dot = false;
        let mut seen_digit = false;

        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }

        while !self.at_identifier_end() {
            let position = self.position();
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    seen_digit = true;
                    text.push(c);
                    self.bump();
                }
                Some('.') if seen_dot => {
                    text.push('.');
                    return Err(ParseError::new(
                        ParseErrorKind::ExtraDecimalPoint(text),
                        position,
                    ));
                }
                Some('.') => {
                    seen_dot = true;
                    text.push('.');
                    self.bump();
                }
                Some('-') => {
                    return Err(ParseError::new(ParseErrorKind::MisplacedMinus, position))
                }
                Some('"') => {
                    return Err(ParseError::new(ParseErrorKind::UnescapedQuote, position))
                }
                Some(c) => {
                    text.push(c);
                    return Err(ParseError::new(ParseErrorKind::InvalidNumeral(text), start));
                }
                None => break,
            }
        }

        if !seen_digit {
            return Err(ParseError::new(ParseErrorKind::InvalidNumeral(text), start));
        }

        Ok(Token::Id {
            text,
            quoted: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let spanned = lexer.next_token().unwrap();
            if spanned.token == Token::Eof {
                return out;
            }
            out.push(spanned.token);
        }
    }

    fn id(text: &str, quoted: bool) -> Token {
        Token::Id {
            text: text.to_string(),
            quoted,
        }
    }

    fn error(src: &str) -> ParseError {
        let mut lexer = Lexer::new(src);
        loop {
            match lexer.next_token() {
                Ok(spanned) if spanned.token == Token::Eof => panic!("no error in {:?}", src),
                Ok(_) => {}
                Err(err) => return err,
            }
        }
    }

    #[test]
    fn test_punctuation_and_operators() {
        assert_eq!(
            tokens("{ } [ ] ; , = -- ->"),
            vec![
                Token::OpenBrace,
                Token::CloseBrace,
                Token::OpenBracket,
                Token::CloseBracket,
                Token::Semicolon,
                Token::Comma,
                Token::Equal,
                Token::UndirectedEdge,
                Token::DirectedEdge,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            tokens("strict Graph DIGRAPH node Edge"),
            vec![
                Token::Strict,
                Token::Graph,
                Token::Digraph,
                Token::Node,
                Token::Edge
            ]
        );
    }

    #[test]
    fn test_quoted_keyword_is_identifier() {
        assert_eq!(tokens("\"graph\""), vec![id("graph", true)]);
    }

    #[test]
    fn test_identifier_stops_at_terminators() {
        assert_eq!(
            tokens("a;b,c[d]e=f{g}"),
            vec![
                id("a", false),
                Token::Semicolon,
                id("b", false),
                Token::Comma,
                id("c", false),
                Token::OpenBracket,
                id("d", false),
                Token::CloseBracket,
                id("e", false),
                Token::Equal,
                id("f", false),
                Token::OpenBrace,
                id("g", false),
                Token::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(tokens(r#""x\"y""#), vec![id("x\"y", true)]);
        // Other escapes are kept verbatim
        assert_eq!(tokens(r#""a\nb""#), vec![id("a\\nb", true)]);
        assert_eq!(tokens(r#""a\\""#), vec![id("a\\\\", true)]);
        assert_eq!(tokens(r#""a b""#), vec![id("a b", true)]);
    }

    #[test]
    fn test_numerals() {
        assert_eq!(
            tokens("42 -7 3.14 -.5 .25 10."),
            vec![
                id("42", false),
                id("-7", false),
                id("3.14", false),
                id("-.5", false),
                id(".25", false),
                id("10.", false),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let src = "// heading\na /* inline\n comment */ b // trailing";
        assert_eq!(tokens(src), vec![id("a", false), id("b", false)]);
    }

    #[test]
    fn test_comment_ends_identifier() {
        assert_eq!(tokens("a/* x */b"), vec![id("a", false), id("b", false)]);
    }

    #[test]
    fn test_positions_are_one_based() {
        let mut lexer = Lexer::new("digraph\n  G {");
        assert_eq!(lexer.next_token().unwrap().position, Position::new(1, 1));
        assert_eq!(lexer.next_token().unwrap().position, Position::new(2, 3));
        assert_eq!(lexer.next_token().unwrap().position, Position::new(2, 5));
        assert_eq!(lexer.next_token().unwrap().position, Position::new(2, 6));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.peek_token().unwrap().token, id("a", false));
        assert_eq!(lexer.next_token().unwrap().token, id("a", false));
        assert_eq!(lexer.next_token().unwrap().token, id("b", false));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = error("a\n  /* never closed");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
        assert_eq!(err.position, Position::new(2, 3));
    }

    #[test]
    fn test_unterminated_quoted_identifier() {
        let err = error("a \"open");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.position, Position::new(1, 3));

        let err = error("\"ends with escape\\");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn test_unescaped_quote_in_identifier() {
        let err = error("ab\"c\"");
        assert_eq!(err.kind, ParseErrorKind::UnescapedQuote);
        assert_eq!(err.position, Position::new(1, 3));
    }

    #[test]
    fn test_second_decimal_point() {
        let err = error("1.2.3");
        assert_eq!(err.kind, ParseErrorKind::ExtraDecimalPoint("1.2.".to_string()));
        assert_eq!(err.position, Position::new(1, 4));
    }

    #[test]
    fn test_minus_inside_identifier() {
        assert_eq!(error("12-3").kind, ParseErrorKind::MisplacedMinus);
        assert_eq!(error("a-b").kind, ParseErrorKind::MisplacedMinus);
        // Operators need whitespace after an unquoted identifier
        assert_eq!(error("a->b").kind, ParseErrorKind::MisplacedMinus);
    }

    #[test]
    fn test_invalid_numerals() {
        assert_eq!(
            error("- a").kind,
            ParseErrorKind::InvalidNumeral("-".to_string())
        );
        assert_eq!(
            error("12ab").kind,
            ParseErrorKind::InvalidNumeral("12a".to_string())
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = error("a @");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('@'));
        assert_eq!(err.position, Position::new(1, 3));
    }
}
