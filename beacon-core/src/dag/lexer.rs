//! Tokenizer for the DOT subset used by job pipelines

use std::iter::Peekable;
use std::str::Chars;

use super::DagError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Bare identifier, numeral, quoted string or HTML string
    Id(String),
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Equals,
    Semicolon,
    Comma,
    /// `->`
    Arrow,
    /// `--`
    UndirectedEdge,
}

/// A token with the 1-based position of its first character
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, DagError> {
    let mut lexer = Lexer {
        chars: source.chars().peekable(),
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();

    while let Some(spanned) = lexer.next_token()? {
        tokens.push(spanned);
    }

    Ok(tokens)
}

fn is_id_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

impl Lexer<'_> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Option<Spanned>, DagError> {
        self.skip_trivia()?;

        let (line, column) = (self.line, self.column);
        let Some(c) = self.bump() else {
            return Ok(None);
        };

        let token = match c {
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '=' => Token::Equals,
            ';' => Token::Semicolon,
            ',' => Token::Comma,
            '-' => match self.chars.peek() {
                Some('>') => {
                    self.bump();
                    Token::Arrow
                }
                Some('-') => {
                    self.bump();
                    Token::UndirectedEdge
                }
                Some(d) if d.is_ascii_digit() || *d == '.' => {
                    let mut id = String::from('-');
                    self.read_bare(&mut id);
                    Token::Id(id)
                }
                _ => return Err(DagError::syntax(line, column, "unexpected '-'")),
            },
            '"' => Token::Id(self.read_quoted(line, column)?),
            '<' => Token::Id(self.read_html(line, column)?),
            c if is_id_start(c) => {
                let mut id = String::from(c);
                self.read_bare(&mut id);
                Token::Id(id)
            }
            other => {
                return Err(DagError::syntax(
                    line,
                    column,
                    format!("unexpected character {other:?}"),
                ));
            }
        };

        Ok(Some(Spanned {
            token,
            line,
            column,
        }))
    }

    /// Skip whitespace and `//`, `/* */` and `#` comments
    fn skip_trivia(&mut self) -> Result<(), DagError> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => self.skip_line(),
                Some('/') => {
                    let (line, column) = (self.line, self.column);
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.next() {
                        Some('/') => self.skip_line(),
                        Some('*') => {
                            self.bump();
                            self.bump();
                            self.skip_block_comment(line, column)?;
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<(), DagError> {
        let mut previous = None;
        while let Some(c) = self.bump() {
            if previous == Some('*') && c == '/' {
                return Ok(());
            }
            previous = Some(c);
        }
        Err(DagError::syntax(line, column, "unterminated comment"))
    }

    fn read_bare(&mut self, id: &mut String) {
        while let Some(&c) = self.chars.peek() {
            if !is_id_start(c) {
                break;
            }
            id.push(c);
            self.bump();
        }
    }

    /// Read a quoted ID; only `\"` is an escape, other backslashes are kept
    fn read_quoted(&mut self, line: usize, column: usize) -> Result<String, DagError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.chars.peek() {
                    Some('"') => {
                        value.push('"');
                        self.bump();
                    }
                    _ => value.push('\\'),
                },
                Some(c) => value.push(c),
                None => return Err(DagError::syntax(line, column, "unterminated string")),
            }
        }
    }

    /// Read an HTML-style ID, `<...>` with balanced nested angle brackets
    fn read_html(&mut self, line: usize, column: usize) -> Result<String, DagError> {
        let mut value = String::new();
        let mut depth = 1;
        loop {
            match self.bump() {
                Some('<') => {
                    depth += 1;
                    value.push('<');
                }
                Some('>') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                    value.push('>');
                }
                Some(c) => value.push(c),
                None => return Err(DagError::syntax(line, column, "unterminated HTML string")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_tokenize_node_statement() {
        assert_eq!(
            kinds("ds1 [type=http times=100];"),
            vec![
                Token::Id("ds1".to_string()),
                Token::LBracket,
                Token::Id("type".to_string()),
                Token::Equals,
                Token::Id("http".to_string()),
                Token::Id("times".to_string()),
                Token::Equals,
                Token::Id("100".to_string()),
                Token::RBracket,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted_and_html_ids() {
        assert_eq!(
            kinds(r#""say \"hi\"" <{"a": <b>}>"#),
            vec![
                Token::Id("say \"hi\"".to_string()),
                Token::Id("{\"a\": <b>}".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_edges_and_numerals() {
        assert_eq!(
            kinds("a -> b -- c -1.5"),
            vec![
                Token::Id("a".to_string()),
                Token::Arrow,
                Token::Id("b".to_string()),
                Token::UndirectedEdge,
                Token::Id("c".to_string()),
                Token::Id("-1.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "# header\n// line\na /* inline */ b\n";
        assert_eq!(
            kinds(source),
            vec![Token::Id("a".to_string()), Token::Id("b".to_string())]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = tokenize("a\n  b").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn test_unterminated_comment_fails() {
        assert!(tokenize("a /* never closed").is_err());
    }

    #[test]
    fn test_unexpected_character_fails() {
        let err = tokenize("a @ b").unwrap_err();
        assert_eq!(err, DagError::syntax(1, 3, "unexpected character '@'"));
    }
}
