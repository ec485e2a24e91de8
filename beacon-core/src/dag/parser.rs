//! Statement-level graph parsing
//!
//! [`GraphParser`] is the boundary between task extraction and the graph
//! language: text in, statements out. [`DotParser`] reads the subset of DOT
//! that job pipelines are written in. Subgraphs and ports are not supported.

use super::DagError;
use super::lexer::{Spanned, Token, tokenize};

/// A `key=value` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub key: String,
    pub value: String,
}

/// A top-level statement of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `id [attrs]`
    Node { id: String, attrs: Vec<Attr> },
    /// `a -> b -> c [attrs]`
    Edge { chain: Vec<String>, attrs: Vec<Attr> },
    /// `graph|node|edge [attrs]`
    Defaults { target: String, attrs: Vec<Attr> },
    /// `key = value`
    Assign(Attr),
}

/// Parses graph source text into a sequence of statements
pub trait GraphParser {
    fn parse(&self, source: &str) -> Result<Vec<Statement>, DagError>;
}

/// Parser for the DOT subset used by job pipelines
///
/// Accepts either a bare statement list or one wrapped in
/// `strict? digraph ID? { ... }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotParser;

impl GraphParser for DotParser {
    fn parse(&self, source: &str) -> Result<Vec<Statement>, DagError> {
        let tokens = tokenize(source)?;
        StatementReader::new(&tokens).read_graph()
    }
}

struct StatementReader<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

fn is_keyword(token: Option<&Token>, keyword: &str) -> bool {
    matches!(token, Some(Token::Id(id)) if id.eq_ignore_ascii_case(keyword))
}

impl<'a> StatementReader<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|s| &s.token)
    }

    /// Error positioned at the current token, or after the last one at EOF
    fn error_here(&self, message: impl Into<String>) -> DagError {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(s) => DagError::syntax(s.line, s.column, message),
            None => DagError::syntax(1, 1, message),
        }
    }

    fn expect_id(&mut self, what: &str) -> Result<String, DagError> {
        match self.peek() {
            Some(Token::Id(id)) => {
                let id = id.clone();
                self.pos += 1;
                Ok(id)
            }
            _ => Err(self.error_here(format!("expected {what}"))),
        }
    }

    fn read_graph(mut self) -> Result<Vec<Statement>, DagError> {
        let wrapped = self.read_header()?;
        let mut statements = Vec::new();

        loop {
            match self.peek() {
                None if wrapped => return Err(self.error_here("missing closing '}'")),
                None => break,
                Some(Token::RBrace) if wrapped => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        return Err(self.error_here("unexpected input after graph"));
                    }
                    break;
                }
                Some(Token::Semicolon) => self.pos += 1,
                Some(_) => statements.push(self.read_statement()?),
            }
        }

        Ok(statements)
    }

    /// Consume an optional `strict? digraph ID? {` header
    fn read_header(&mut self) -> Result<bool, DagError> {
        let start = self.pos;
        if is_keyword(self.peek(), "strict") {
            self.pos += 1;
        }

        let opens_body = match self.peek_at(1) {
            Some(Token::LBrace) => true,
            Some(Token::Id(_)) => matches!(self.peek_at(2), Some(Token::LBrace)),
            _ => false,
        };

        if is_keyword(self.peek(), "digraph") && opens_body {
            self.pos += 1;
            if let Some(Token::Id(_)) = self.peek() {
                self.pos += 1;
            }
            self.pos += 1;
            return Ok(true);
        }

        if is_keyword(self.peek(), "graph") && opens_body {
            return Err(self.error_here("pipeline graphs must be directed"));
        }

        if self.pos != start {
            return Err(self.error_here("expected 'digraph' after 'strict'"));
        }

        Ok(false)
    }

    fn read_statement(&mut self) -> Result<Statement, DagError> {
        let first = match self.peek() {
            Some(Token::Id(id)) => id.clone(),
            Some(Token::LBrace) => return Err(self.error_here("subgraphs are not supported")),
            _ => return Err(self.error_here("expected a statement")),
        };

        let is_defaults = ["graph", "node", "edge"]
            .iter()
            .any(|kw| first.eq_ignore_ascii_case(kw))
            && matches!(self.peek_at(1), Some(Token::LBracket));
        if is_defaults {
            self.pos += 1;
            let attrs = self.read_attr_lists()?;
            return Ok(Statement::Defaults {
                target: first.to_ascii_lowercase(),
                attrs,
            });
        }

        if first.eq_ignore_ascii_case("subgraph") {
            return Err(self.error_here("subgraphs are not supported"));
        }

        self.pos += 1;
        match self.peek() {
            Some(Token::Equals) => {
                self.pos += 1;
                let value = self.expect_id("a value after '='")?;
                Ok(Statement::Assign(Attr { key: first, value }))
            }
            Some(Token::Arrow) => {
                let mut chain = vec![first];
                while let Some(Token::Arrow) = self.peek() {
                    self.pos += 1;
                    chain.push(self.expect_id("a node after '->'")?);
                }
                let attrs = self.read_attr_lists()?;
                Ok(Statement::Edge { chain, attrs })
            }
            Some(Token::UndirectedEdge) => {
                Err(self.error_here("undirected edge '--' in a directed graph"))
            }
            _ => {
                let attrs = self.read_attr_lists()?;
                Ok(Statement::Node { id: first, attrs })
            }
        }
    }

    /// Zero or more `[ ... ]` lists, flattened in order
    fn read_attr_lists(&mut self) -> Result<Vec<Attr>, DagError> {
        let mut attrs = Vec::new();

        while let Some(Token::LBracket) = self.peek() {
            self.pos += 1;
            loop {
                match self.peek() {
                    Some(Token::RBracket) => {
                        self.pos += 1;
                        break;
                    }
                    Some(Token::Comma) | Some(Token::Semicolon) => self.pos += 1,
                    Some(Token::Id(_)) => {
                        let key = self.expect_id("an attribute name")?;
                        match self.peek() {
                            Some(Token::Equals) => self.pos += 1,
                            _ => {
                                return Err(self.error_here(format!("expected '=' after {key:?}")));
                            }
                        }
                        let value = self.expect_id(&format!("a value for {key:?}"))?;
                        attrs.push(Attr { key, value });
                    }
                    None => return Err(self.error_here("unterminated attribute list")),
                    Some(_) => return Err(self.error_here("unexpected token in attribute list")),
                }
            }
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(key: &str, value: &str) -> Attr {
        Attr {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_node_and_edge_statements() {
        let statements = DotParser
            .parse("ds1 [type=http]; ds2 [type=jsonparse path=\"USD\"]\nds1 -> ds2;")
            .unwrap();

        assert_eq!(
            statements,
            vec![
                Statement::Node {
                    id: "ds1".to_string(),
                    attrs: vec![attr("type", "http")],
                },
                Statement::Node {
                    id: "ds2".to_string(),
                    attrs: vec![attr("type", "jsonparse"), attr("path", "USD")],
                },
                Statement::Edge {
                    chain: vec!["ds1".to_string(), "ds2".to_string()],
                    attrs: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_parse_wrapped_graph() {
        let statements = DotParser
            .parse("strict digraph pipeline {\n  rankdir=LR\n  node [shape=box]\n  a [type=http]\n}")
            .unwrap();

        assert_eq!(
            statements,
            vec![
                Statement::Assign(attr("rankdir", "LR")),
                Statement::Defaults {
                    target: "node".to_string(),
                    attrs: vec![attr("shape", "box")],
                },
                Statement::Node {
                    id: "a".to_string(),
                    attrs: vec![attr("type", "http")],
                },
            ]
        );
    }

    #[test]
    fn test_multiple_attr_lists_are_flattened() {
        let statements = DotParser.parse("a [type=http][method=GET, url=x]").unwrap();
        assert_eq!(
            statements,
            vec![Statement::Node {
                id: "a".to_string(),
                attrs: vec![
                    attr("type", "http"),
                    attr("method", "GET"),
                    attr("url", "x")
                ],
            }]
        );
    }

    #[test]
    fn test_bare_ids_parse_as_nodes() {
        let statements = DotParser.parse("invalid dot").unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_dangling_arrow_fails() {
        assert!(DotParser.parse("a ->").is_err());
        assert!(DotParser.parse("a -> ;").is_err());
    }

    #[test]
    fn test_unbalanced_brackets_fail() {
        assert!(DotParser.parse("a [type=http").is_err());
        assert!(DotParser.parse("a ]").is_err());
        assert!(DotParser.parse("digraph { a [type=http]").is_err());
        assert!(DotParser.parse("digraph { a } b").is_err());
    }

    #[test]
    fn test_missing_equals_fails() {
        let err = DotParser.parse("a [type http]").unwrap_err();
        assert_eq!(err, DagError::syntax(1, 9, "expected '=' after \"type\""));
    }

    #[test]
    fn test_undirected_graphs_are_rejected() {
        assert!(DotParser.parse("graph { a -- b }").is_err());
        assert!(DotParser.parse("a -- b").is_err());
    }

    #[test]
    fn test_subgraphs_are_rejected() {
        assert!(DotParser.parse("subgraph cluster { a }").is_err());
        assert!(DotParser.parse("{ a b }").is_err());
    }
}
