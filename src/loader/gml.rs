use crate::loader::LoadError;
use crate::loader::raw::{RawEdge, RawGraph, RawNode};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error raised by the parser.
pub type ParseError = peg::error::ParseError<peg::str::LineCol>;

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Number(f64),
    Text(String),
    List(Vec<(String, Value)>),
}

peg::parser! {
    grammar gml_parser() for str {
        pub(super) rule document() -> Vec<(String, Value)>
            = sp() e:entries() sp() ![_] { e }

        rule entries() -> Vec<(String, Value)>
            = entry() ** sp()

        rule entry() -> (String, Value)
            = k:key() sp() v:value() { (k, v) }

        rule value() -> Value
            = n:number() { Value::Number(n) }
            / s:quoted() { Value::Text(s) }
            / "[" sp() e:entries() sp() "]" { Value::List(e) }

        rule key() -> String
            = k:$(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*) { k.to_string() }

        rule number() -> f64
            = n:$(['-' | '+']? (digit()+ ("." digit()*)? / "." digit()+) (['e' | 'E'] ['-' | '+']? digit()+)?)
              {? n.parse().or(Err("number")) }

        rule digit()
            = ['0'..='9']

        rule quoted() -> String
            = "\"" s:$((!['"'] [_])*) "\"" { s.to_string() }

        rule sp()
            = quiet!{([' ' | '\t' | '\r' | '\n'] / "#" (!['\n'] [_])*)*}
    }
}

pub fn read(path: impl AsRef<Path>) -> Result<RawGraph, LoadError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parses a GML document. Nodes are keyed by their `label`, falling back to their `id`;
/// edges refer to nodes by `id` and carry optional numeric `a` and `b`.
pub fn parse(text: &str) -> Result<RawGraph, LoadError> {
    let document = gml_parser::document(text)?;
    let items = document
        .into_iter()
        .find_map(|(key, value)| match (key.as_str(), value) {
            ("graph", Value::List(items)) => Some(items),
            _ => None,
        })
        .ok_or_else(|| LoadError::Format("no graph section".into()))?;

    let mut graph = RawGraph::default();
    let mut keys: HashMap<String, String> = HashMap::new();
    let mut edges = Vec::new();

    for (key, value) in items {
        match (key.as_str(), value) {
            ("directed", Value::Number(n)) => graph.directed = n != 0.0,
            ("node", Value::List(node)) => {
                let id = scalar(&node, "id")
                    .ok_or_else(|| LoadError::Format("node without id".into()))?;
                let key = scalar(&node, "label").unwrap_or_else(|| id.clone());
                if keys.insert(id.clone(), key.clone()).is_some() {
                    return Err(LoadError::Format(format!("duplicate node id {}", id)));
                }
                graph.nodes.push(RawNode { key });
            }
            ("edge", Value::List(edge)) => edges.push(edge),
            _ => {}
        }
    }

    for edge in edges {
        let endpoint = |name: &str| -> Result<String, LoadError> {
            let id = scalar(&edge, name)
                .ok_or_else(|| LoadError::Format(format!("edge without {}", name)))?;
            keys.get(&id)
                .cloned()
                .ok_or_else(|| LoadError::Format(format!("edge {} refers to unknown node {}", name, id)))
        };
        graph.edges.push(RawEdge {
            source: endpoint("source")?,
            target: endpoint("target")?,
            a: coefficient(&edge, "a")?,
            b: coefficient(&edge, "b")?,
        });
    }

    debug!(
        "parsed GML: {} nodes, {} edges, directed={}",
        graph.nodes.len(),
        graph.edges.len(),
        graph.directed
    );
    Ok(graph)
}

fn lookup<'a>(items: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    items.iter().find(|(k, _)| k == name).map(|(_, v)| v)
}

fn scalar(items: &[(String, Value)], name: &str) -> Option<String> {
    match lookup(items, name)? {
        Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
        Value::Number(n) => Some(n.to_string()),
        Value::Text(s) => Some(s.clone()),
        Value::List(_) => None,
    }
}

fn coefficient(items: &[(String, Value)], name: &str) -> Result<Option<f64>, LoadError> {
    match lookup(items, name) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(_) => Err(LoadError::Format(format!("edge attribute {} is not a number", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARALLEL: &str = r#"
# two routes from 0 to 1
graph [
  directed 1
  node [ id 0 label "0" ]
  node [ id 1 label "1" ]
  node [ id 2 label "bypass" graphics [ x 1.5 y -2 ] ]
  edge [ source 0 target 1 a 1 ]
  edge [ source 0 target 2 a 0 b 1e1 ]
  edge [ source 2 target 1 ]
]
"#;

    #[test]
    fn test_parse_directed_graph() {
        let graph = parse(PARALLEL).unwrap();

        assert!(graph.directed);
        assert_eq!(
            vec!["0", "1", "bypass"],
            graph.nodes.iter().map(|n| n.key.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(
            RawEdge {
                source: "0".into(),
                target: "bypass".into(),
                a: Some(0.0),
                b: Some(10.0),
            },
            graph.edges[1]
        );
        assert_eq!(None, graph.edges[0].b);
        assert_eq!((None, None), (graph.edges[2].a, graph.edges[2].b));
    }

    #[test]
    fn test_nodes_without_label_use_id() {
        let graph = parse("graph [ directed 1 node [ id 7 ] node [ id -2.5 ] ]").unwrap();

        assert_eq!("7", graph.nodes[0].key);
        assert_eq!("-2.5", graph.nodes[1].key);
    }

    #[test]
    fn test_undirected_by_default() {
        let graph = parse("graph [ node [ id 0 ] ]").unwrap();

        assert!(!graph.directed);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse("graph [ node [ id 0 ]"), Err(LoadError::Parse(_))));
        assert!(matches!(parse("creator \"me\""), Err(LoadError::Format(_))));
        assert!(matches!(
            parse("graph [ directed 1 node [ id 0 ] edge [ source 0 target 3 ] ]"),
            Err(LoadError::Format(_))
        ));
        assert!(matches!(
            parse("graph [ directed 1 node [ id 0 ] node [ id 1 ] edge [ source 0 target 1 a \"x\" ] ]"),
            Err(LoadError::Format(_))
        ));
    }
}
