use std::collections::HashMap;

use super::parser::{Attr, DotParser, GraphParser, Statement};
use super::{DagError, DagTask};

const TYPE_ATTR: &str = "type";

/// Turns parsed graph statements into an ordered task list
///
/// Nodes with their own statement are emitted in the order of their first
/// statement; nodes that only appear in edges follow, in order of first
/// mention. Repeated statements for one node merge, with later `type` values
/// winning. A `node [type=...]` default applies to nodes first seen after it.
#[derive(Debug, Clone, Default)]
pub struct TaskExtractor<P = DotParser> {
    parser: P,
}

impl<P: GraphParser> TaskExtractor<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn extract(&self, source: &str) -> Result<Vec<DagTask>, DagError> {
        let statements = self.parser.parse(source)?;

        let mut declared: Vec<String> = Vec::new();
        let mut referenced: Vec<String> = Vec::new();
        let mut kinds: HashMap<String, Option<String>> = HashMap::new();
        let mut default_kind: Option<String> = None;

        for statement in &statements {
            match statement {
                Statement::Node { id, attrs } => {
                    if !declared.contains(id) {
                        declared.push(id.clone());
                    }
                    let entry = kinds
                        .entry(id.clone())
                        .or_insert_with(|| default_kind.clone());
                    if let Some(kind) = find_type(attrs) {
                        *entry = Some(kind.to_string());
                    }
                }
                Statement::Edge { chain, .. } => {
                    for id in chain {
                        kinds.entry(id.clone()).or_insert_with(|| {
                            referenced.push(id.clone());
                            default_kind.clone()
                        });
                    }
                }
                Statement::Defaults { target, attrs } if target == "node" => {
                    if let Some(kind) = find_type(attrs) {
                        default_kind = Some(kind.to_string());
                    }
                }
                Statement::Defaults { .. } | Statement::Assign(_) => {}
            }
        }

        referenced.retain(|id| !declared.contains(id));
        declared
            .into_iter()
            .chain(referenced)
            .map(|name| match kinds.remove(&name).flatten() {
                Some(kind) => Ok(DagTask { name, kind }),
                None => Err(DagError::MissingTaskType { node: name }),
            })
            .collect()
    }
}

fn find_type(attrs: &[Attr]) -> Option<&str> {
    attrs
        .iter()
        .rev()
        .find(|attr| attr.key == TYPE_ATTR)
        .map(|attr| attr.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_kinds(source: &str) -> Vec<(String, String)> {
        TaskExtractor::new(DotParser)
            .extract(source)
            .unwrap()
            .into_iter()
            .map(|task| (task.name, task.kind))
            .collect()
    }

    fn pair(name: &str, kind: &str) -> (String, String) {
        (name.to_string(), kind.to_string())
    }

    #[test]
    fn test_declaration_order_not_topological() {
        let source = "b [type=multiply]\na [type=http]\na -> b";
        assert_eq!(
            names_and_kinds(source),
            vec![pair("b", "multiply"), pair("a", "http")]
        );
    }

    #[test]
    fn test_edges_before_declarations_do_not_set_order() {
        let source = "a -> b\nb [type=jsonparse]\na [type=http]";
        assert_eq!(
            names_and_kinds(source),
            vec![pair("b", "jsonparse"), pair("a", "http")]
        );
    }

    #[test]
    fn test_edge_only_nodes_follow_declared_nodes() {
        let source = "node [type=any]\nx -> y\nz [type=http]\ny [type=jsonparse]";
        assert_eq!(
            names_and_kinds(source),
            vec![pair("z", "http"), pair("y", "jsonparse"), pair("x", "any")]
        );
    }

    #[test]
    fn test_attribute_order_is_insignificant() {
        let source = "a [url=\"x\" method=GET type=http]";
        assert_eq!(names_and_kinds(source), vec![pair("a", "http")]);
    }

    #[test]
    fn test_repeated_statements_merge() {
        let source = "a [type=http]\nb [type=jsonparse]\na [method=POST]\nb [type=jsonparse2]";
        assert_eq!(
            names_and_kinds(source),
            vec![pair("a", "http"), pair("b", "jsonparse2")]
        );
    }

    #[test]
    fn test_edge_only_node_without_type_fails() {
        let err = TaskExtractor::new(DotParser)
            .extract("a [type=http]\na -> b")
            .unwrap_err();
        assert_eq!(
            err,
            DagError::MissingTaskType {
                node: "b".to_string()
            }
        );
    }

    #[test]
    fn test_node_defaults_apply_to_later_nodes() {
        let source = "a [type=http]\nnode [type=any]\nb\na -> b -> c";
        assert_eq!(
            names_and_kinds(source),
            vec![pair("a", "http"), pair("b", "any"), pair("c", "any")]
        );
    }

    #[test]
    fn test_edge_attrs_do_not_set_type() {
        let err = TaskExtractor::new(DotParser)
            .extract("a [type=http]\nb\na -> b [type=http]")
            .unwrap_err();
        assert!(matches!(err, DagError::MissingTaskType { .. }));
    }

    struct FixedParser(Vec<Statement>);

    impl GraphParser for FixedParser {
        fn parse(&self, _source: &str) -> Result<Vec<Statement>, DagError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_custom_parser_is_pluggable() {
        let extractor = TaskExtractor::new(FixedParser(vec![Statement::Node {
            id: "fetch".to_string(),
            attrs: vec![Attr {
                key: "type".to_string(),
                value: "bridge".to_string(),
            }],
        }]));

        let tasks = extractor.extract("ignored").unwrap();
        assert_eq!(
            tasks,
            vec![DagTask {
                name: "fetch".to_string(),
                kind: "bridge".to_string(),
            }]
        );
    }
}
