//! Pipeline DAG task extraction
//!
//! Job pipelines are described in a DOT-like graph language:
//!
//! ```text
//! ds1          [type=http method=GET url="example.com"];
//! ds1_parse    [type=jsonparse path="USD"];
//! ds1 -> ds1_parse;
//! ```
//!
//! This module turns that text into an ordered list of [`DagTask`]s
//! (node name + task kind). Parsing the graph language itself sits behind
//! the [`GraphParser`] trait; [`DotParser`] is the built-in implementation.

mod extractor;
mod lexer;
mod parser;

pub use extractor::TaskExtractor;
pub use parser::{Attr, DotParser, GraphParser, Statement};

use thiserror::Error;

/// A single task node of a pipeline DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagTask {
    /// Node identifier as written in the source
    pub name: String,
    /// Value of the node's `type` attribute
    pub kind: String,
}

impl std::fmt::Display for DagTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.kind)
    }
}

/// Errors produced while extracting tasks from a DAG source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DagError {
    /// The source is not a structurally valid graph
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A node was referenced without a `type` attribute
    #[error("task {node:?} has no type attribute")]
    MissingTaskType { node: String },
}

impl DagError {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Extract the tasks of a DAG source in declaration order
///
/// Uses the built-in [`DotParser`]. No partial result is returned on error.
pub fn extract_tasks(source: &str) -> Result<Vec<DagTask>, DagError> {
    TaskExtractor::new(DotParser).extract(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE_FEED: &str = "    ds1          [type=http method=GET url=\"example.com\" allowunrestrictednetworkaccess=\"true\"];\n    ds1_parse    [type=jsonparse path=\"USD\"];\n    ds1_multiply [type=multiply times=100];\n    ds1 -> ds1_parse -> ds1_multiply;\n";

    #[test]
    fn test_extract_tasks_in_declaration_order() {
        let tasks = extract_tasks(PRICE_FEED).unwrap();

        let rendered: Vec<String> = tasks.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["ds1 http", "ds1_parse jsonparse", "ds1_multiply multiply"]
        );
    }

    #[test]
    fn test_extract_tasks_is_idempotent() {
        assert_eq!(extract_tasks(PRICE_FEED), extract_tasks(PRICE_FEED));
    }

    #[test]
    fn test_invalid_dot_fails() {
        let err = extract_tasks("invalid dot").unwrap_err();
        assert_eq!(
            err,
            DagError::MissingTaskType {
                node: "invalid".to_string()
            }
        );
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = extract_tasks("a [type=http];\nb [type=\"oops];\n").unwrap_err();
        match err {
            DagError::Syntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 9);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_has_no_tasks() {
        assert!(extract_tasks("").unwrap().is_empty());
        assert!(extract_tasks("  \n // nothing here\n").unwrap().is_empty());
    }
}
