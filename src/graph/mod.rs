//! Transport graph the game is played on.
//!
//! The graph is an undirected multigraph: two nodes may be joined by several
//! edges as long as each carries its own [`Transport`]. The engine only ever
//! reads it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::Transport;

mod demo;

pub use demo::demo_map;

pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
    pub transport: Transport,
}

impl Edge {
    pub const fn new(source: NodeId, destination: NodeId, transport: Transport) -> Self {
        Self {
            source,
            destination,
            transport,
        }
    }

    const fn reversed(self) -> Self {
        Self {
            source: self.destination,
            destination: self.source,
            transport: self.transport,
        }
    }
}

type EdgeList = SmallVec<[Edge; 6]>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, EdgeList>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: &[(NodeId, NodeId, Transport)]) -> Self {
        let mut graph = Self::new();
        for &(a, b, transport) in edges {
            graph.add_edge(a, b, transport);
        }
        graph
    }

    pub fn add_node(&mut self, node: NodeId) {
        self.adjacency.entry(node).or_default();
    }

    /// Adds an undirected edge, creating either endpoint if needed.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, transport: Transport) {
        let edge = Edge::new(a, b, transport);
        self.adjacency.entry(a).or_default().push(edge);
        if a != b {
            self.adjacency.entry(b).or_default().push(edge.reversed());
        }
        self.edge_count += 1;
    }

    /// Edges leaving `node`, empty for unknown nodes.
    pub fn edges_from(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency
            .values()
            .flatten()
            .filter(|edge| edge.source <= edge.destination)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("line {line}: expected `<node>` or `<node> <node> <transport>`")]
    MalformedLine { line: usize },
    #[error("line {line}: invalid node id `{token}`")]
    InvalidNode { line: usize, token: String },
    #[error("line {line}: unknown transport `{token}`")]
    UnknownTransport { line: usize, token: String },
}

impl FromStr for Graph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut graph = Graph::new();
        for (idx, raw) in s.lines().enumerate() {
            let line = idx + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = content.split_whitespace().collect();
            match tokens.as_slice() {
                [node] => graph.add_node(parse_node(node, line)?),
                [a, b, transport] => {
                    let a = parse_node(a, line)?;
                    let b = parse_node(b, line)?;
                    let transport = Transport::from_str(transport).map_err(|_| {
                        GraphError::UnknownTransport {
                            line,
                            token: (*transport).to_string(),
                        }
                    })?;
                    graph.add_edge(a, b, transport);
                }
                _ => return Err(GraphError::MalformedLine { line }),
            }
        }
        Ok(graph)
    }
}

fn parse_node(token: &str, line: usize) -> Result<NodeId, GraphError> {
    token.parse().map_err(|_| GraphError::InvalidNode {
        line,
        token: token.to_string(),
    })
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes() {
            if self.edges_from(node).is_empty() {
                writeln!(f, "{node}")?;
            }
        }
        for edge in self.edges() {
            writeln!(f, "{} {} {}", edge.source, edge.destination, edge.transport)?;
        }
        Ok(())
    }
}
