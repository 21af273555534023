use crate::error::{Result, SortError};
use crate::graph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed dependency: `from` must come before `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    /// Create an edge meaning `from` must precede `to`
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// True when the edge points back at its own source
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl From<(usize, usize)> for Edge {
    fn from((from, to): (usize, usize)) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Vertex count plus edge list, the complete input of a sort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub num_nodes: usize,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph with `num_nodes` vertices and no edges
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
        }
    }

    /// Builder form of [`Graph::add_edge`]
    pub fn with_edge(mut self, from: usize, to: usize) -> Self {
        self.add_edge(from, to);
        self
    }

    /// Append an edge. Endpoints are checked when the graph is sorted.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.edges.push(Edge::new(from, to));
    }

    /// Topologically sort this graph, see [`graph::topological_sort`]
    pub fn sort(&self) -> Result<Vec<usize>> {
        graph::topological_sort(self.num_nodes, &self.edges)
    }

    /// Sort this graph into the tagged [`Outcome`] form
    pub fn outcome(&self) -> Result<Outcome> {
        Outcome::from_sort(self.num_nodes, &self.edges)
    }
}

impl<E: Into<Edge>> FromIterator<E> for Graph {
    /// Collect edges into a graph sized to the largest endpoint seen.
    /// An endpoint of `usize::MAX` cannot be counted and is left for the
    /// sort to reject as an invalid edge.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let edges: Vec<Edge> = iter.into_iter().map(Into::into).collect();
        let num_nodes = edges
            .iter()
            .filter_map(|e| e.from.max(e.to).checked_add(1))
            .max()
            .unwrap_or(0);
        Self { num_nodes, edges }
    }
}

/// Tagged result of a sort, keeping "empty graph" apart from "cycle"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ordered(Vec<usize>),
    CycleDetected,
}

impl Outcome {
    /// Run the sort, folding a cycle into `Outcome::CycleDetected`.
    /// Only invalid input is still reported as an error.
    pub fn from_sort(num_nodes: usize, edges: &[Edge]) -> Result<Self> {
        match graph::topological_sort(num_nodes, edges) {
            Ok(order) => Ok(Outcome::Ordered(order)),
            Err(SortError::CycleDetected { .. }) => Ok(Outcome::CycleDetected),
            Err(e) => Err(e),
        }
    }

    /// True when the graph had no valid order
    pub fn is_cycle(&self) -> bool {
        matches!(self, Outcome::CycleDetected)
    }

    /// The order, if one exists
    pub fn order(&self) -> Option<&[usize]> {
        match self {
            Outcome::Ordered(order) => Some(order.as_slice()),
            Outcome::CycleDetected => None,
        }
    }

    /// Collapse to the sentinel form, where a cycle becomes an empty order
    pub fn into_order_or_empty(self) -> Vec<usize> {
        match self {
            Outcome::Ordered(order) => order,
            Outcome::CycleDetected => Vec::new(),
        }
    }
}
