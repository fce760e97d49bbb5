//! Generic labeled directed graph.
//!
//! # Overview
//!
//! [`DirectedGraph`] stores vertices identified by an opaque label and
//! directed edges carrying an `f64` weight. Storage is a petgraph
//! [`StableDiGraph`] plus a label → [`NodeIndex`] map, so vertex removal never
//! invalidates the indices of surviving vertices.
//!
//! The graph has no notion of profiles or friendships. Callers that model a
//! symmetric relation insert one edge per direction.
//!
//! # Complexity
//!
//! - `add_vertex`, `contains_vertex`, counts: O(1)
//! - `contains_edge`, `add_edge`, `remove_edge`: O(degree)
//! - `remove_vertex`: O(degree), incident edges (incoming and outgoing) are
//!   unlinked through the stable graph's per-node edge lists.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

/// Weight given to edges created without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

// ---------------------------------------------------------------------------
// EdgeView
// ---------------------------------------------------------------------------

/// A borrowed view of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a, L> {
    pub from: &'a L,
    pub to: &'a L,
    pub weight: f64,
}

impl<L: fmt::Display> fmt::Display for EdgeView<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}:{}", self.from, self.to, self.weight)
    }
}

// ---------------------------------------------------------------------------
// DirectedGraph
// ---------------------------------------------------------------------------

/// A labeled directed graph with weighted edges.
///
/// Labels are unique. Every edge's endpoints are vertices currently present
/// in the graph; removing a vertex removes every edge touching it.
#[derive(Debug, Clone)]
pub struct DirectedGraph<L> {
    graph: StableDiGraph<L, f64>,
    index: HashMap<L, NodeIndex>,
}

impl<L> Default for DirectedGraph<L> {
    fn default() -> Self {
        Self {
            graph: StableDiGraph::default(),
            index: HashMap::new(),
        }
    }
}

impl<L> DirectedGraph<L>
where
    L: Clone + Eq + Hash + fmt::Display,
{
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.index.clear();
    }

    /// Insert a vertex labeled `label`.
    ///
    /// Returns `false` and leaves the existing vertex (and its adjacency)
    /// untouched when the label is already present.
    pub fn add_vertex(&mut self, label: L) -> bool {
        if self.index.contains_key(&label) {
            return false;
        }
        let idx = self.graph.add_node(label.clone());
        self.index.insert(label, idx);
        true
    }

    /// Returns `true` if a vertex labeled `label` exists.
    #[must_use]
    pub fn contains_vertex(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }

    /// Remove a vertex and every edge incident to it.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the label is absent.
    pub fn remove_vertex(&mut self, label: &L) -> Result<(), GraphError> {
        let idx = self
            .index
            .remove(label)
            .ok_or_else(|| GraphError::missing_vertex(label))?;
        self.graph.remove_node(idx);
        Ok(())
    }

    /// Create the edge `from → to`, or overwrite its weight if it exists.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if either endpoint is absent.
    pub fn add_edge(&mut self, from: &L, to: &L, weight: f64) -> Result<(), GraphError> {
        let a = self.node(from)?;
        let b = self.node(to)?;
        self.graph.update_edge(a, b, weight);
        Ok(())
    }

    /// [`add_edge`](Self::add_edge) with [`DEFAULT_WEIGHT`].
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if either endpoint is absent.
    pub fn add_unit_edge(&mut self, from: &L, to: &L) -> Result<(), GraphError> {
        self.add_edge(from, to, DEFAULT_WEIGHT)
    }

    /// Remove exactly the directed edge `from → to` and return its weight.
    ///
    /// The reverse edge, if any, is left in place.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingEdge`] if the edge does not exist, including when
    /// either endpoint is absent.
    pub fn remove_edge(&mut self, from: &L, to: &L) -> Result<f64, GraphError> {
        let edge = self
            .index
            .get(from)
            .zip(self.index.get(to))
            .and_then(|(&a, &b)| self.graph.find_edge(a, b))
            .ok_or_else(|| GraphError::missing_edge(from, to))?;
        self.graph
            .remove_edge(edge)
            .ok_or_else(|| GraphError::missing_edge(from, to))
    }

    /// Returns `true` if the directed edge `from → to` exists.
    #[must_use]
    pub fn contains_edge(&self, from: &L, to: &L) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Weight of the edge `from → to`, if present.
    #[must_use]
    pub fn edge_weight(&self, from: &L, to: &L) -> Option<f64> {
        let (&a, &b) = self.index.get(from).zip(self.index.get(to))?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Labels directly reachable from `label` over one outgoing edge.
    ///
    /// The iterator is lazy and finite; clone it to restart. Order is
    /// implementation-defined.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the label is absent.
    pub fn neighbors<'a>(
        &'a self,
        label: &L,
    ) -> Result<impl Iterator<Item = &'a L> + Clone + use<'a, L>, GraphError> {
        let idx = self.node(label)?;
        Ok(self
            .graph
            .neighbors(idx)
            .filter_map(|n| self.graph.node_weight(n)))
    }

    /// Outgoing edges of `label` with their weights.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingVertex`] if the label is absent.
    pub fn incident_edges(&self, label: &L) -> Result<Vec<EdgeView<'_, L>>, GraphError> {
        let idx = self.node(label)?;
        let Some(from) = self.graph.node_weight(idx) else {
            return Err(GraphError::missing_vertex(label));
        };
        Ok(self
            .graph
            .edges(idx)
            .filter_map(|edge| {
                Some(EdgeView {
                    from,
                    to: self.graph.node_weight(edge.target())?,
                    weight: *edge.weight(),
                })
            })
            .collect())
    }

    /// All vertex labels.
    ///
    /// Order is stable for as long as the graph is not modified.
    pub fn vertices(&self) -> impl Iterator<Item = &L> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
    }

    /// All directed edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_, L>> + '_ {
        self.graph.edge_indices().filter_map(|edge| {
            let (a, b) = self.graph.edge_endpoints(edge)?;
            Some(EdgeView {
                from: self.graph.node_weight(a)?,
                to: self.graph.node_weight(b)?,
                weight: *self.graph.edge_weight(edge)?,
            })
        })
    }

    fn node(&self, label: &L) -> Result<NodeIndex, GraphError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::missing_vertex(label))
    }
}

/// Debug rendering: vertex list on the first line, edges on the second.
///
/// ```text
/// 3 Vertices: 1 2 3
/// 2 Edges: 1>2:1 2>1:1
/// ```
impl<L> fmt::Display for DirectedGraph<L>
where
    L: Clone + Eq + Hash + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Vertices:", self.vertex_count())?;
        for label in self.vertices() {
            write!(f, " {label}")?;
        }
        write!(f, "\n{} Edges:", self.edge_count())?;
        for edge in self.edges() {
            write!(f, " {edge}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
