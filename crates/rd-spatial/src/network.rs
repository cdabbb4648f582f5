//! Road network representation and builder.
//!
//! # Data layout
//!
//! Nodes are stored in table insertion order and addressed by `NodeId`
//! (the insertion index).  Each node carries a unique string key, so callers
//! may work with either form:
//!
//! ```text
//! node_key[n]   → "DadarTT"
//! node_pos[n]   → GeoPoint
//! adjacency[n]  → neighbour NodeIds, sorted by key, deduplicated
//! ```
//!
//! Edges are undirected: the builder stores every road in both directions.
//! Edge cost is the planar distance between the two node positions and is
//! computed on demand rather than stored.
//!
//! # Ordering
//!
//! Two orders matter for determinism:
//!
//! - **Table order** (`NodeId`): `nearest_node` breaks distance ties in
//!   favour of the node declared first.
//! - **Key order** (`key_rank`): routing breaks cost ties in favour of the
//!   lexically smallest key, and neighbour lists are iterated in this order.

use std::collections::HashMap;

use tracing::info;

use rd_core::{GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Immutable undirected road graph with named nodes.
///
/// Construct once at startup with [`RoadNetworkBuilder`] and share it by
/// reference (or `Arc`) with everything that routes.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    /// Unique key of each node.  Indexed by `NodeId`.
    pub node_key: Vec<String>,

    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Neighbours of each node, sorted by key rank.
    adjacency: Vec<Vec<NodeId>>,

    /// Position of each node in lexical key order.  Indexed by `NodeId`.
    key_rank: Vec<u32>,

    /// Inverse of `key_rank`: `by_rank[r]` is the node with rank `r`.
    by_rank: Vec<NodeId>,

    by_key: HashMap<String, NodeId>,

    edge_count: usize,
}

impl RoadNetwork {
    /// A network with no nodes.  Every snap on it fails, so every path
    /// request degrades to the straight-line fallback.
    pub fn empty() -> Self {
        Self {
            node_key:   Vec::new(),
            node_pos:   Vec::new(),
            adjacency:  Vec::new(),
            key_rank:   Vec::new(),
            by_rank:    Vec::new(),
            by_key:     HashMap::new(),
            edge_count: 0,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected roads.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// `NodeId` for `key`, or `None` if the key is not in the table.
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    /// Key of `node`, or `None` if the id is out of range.
    pub fn key(&self, node: NodeId) -> Option<&str> {
        self.node_key.get(node.index()).map(String::as_str)
    }

    /// Position of `node`, or `None` if the id is out of range.
    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    /// All node ids in table order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_pos.len() as u32).map(NodeId)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Directly connected neighbours of `node`, in key order.
    ///
    /// An unknown id yields an empty slice: a node with no edges is a valid
    /// dead end for path search, not an error.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Neighbour keys of the node named `key`; empty for an unknown key.
    pub fn neighbor_keys<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + 'a {
        let neighbors = match self.node_id(key) {
            Some(id) => self.neighbors(id),
            None     => &[],
        };
        neighbors.iter().map(|&n| self.node_key[n.index()].as_str())
    }

    /// Degree of `node` (0 for unknown ids).
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// `true` if `a` and `b` share a road.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).binary_search_by_key(&self.rank(b), |&n| self.rank(n)).is_ok()
    }

    /// Traversal cost between two nodes: planar distance of their positions.
    #[inline]
    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> f64 {
        self.node_pos[a.index()].distance(self.node_pos[b.index()])
    }

    // ── Key ordering ──────────────────────────────────────────────────────

    /// Lexical rank of `node`'s key; `u32::MAX` for unknown ids.
    #[inline]
    pub fn rank(&self, node: NodeId) -> u32 {
        self.key_rank.get(node.index()).copied().unwrap_or(u32::MAX)
    }

    /// The node whose key has lexical rank `rank`.
    #[inline]
    pub fn by_rank(&self, rank: u32) -> NodeId {
        self.by_rank[rank as usize]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest to `point` by planar distance.
    ///
    /// Linear scan in table order; the first node at the minimum distance
    /// wins.  Returns `None` only for an empty network or a non-finite point.
    pub fn nearest_node(&self, point: GeoPoint) -> Option<NodeId> {
        if !point.is_finite() {
            return None;
        }
        let mut best: Option<(NodeId, f64)> = None;
        for (i, &pos) in self.node_pos.iter().enumerate() {
            let d = pos.distance(point);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((NodeId(i as u32), d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Key of the node nearest to `point` (see [`nearest_node`](Self::nearest_node)).
    pub fn nearest_node_key(&self, point: GeoPoint) -> Option<&str> {
        self.nearest_node(point).and_then(|id| self.key(id))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] from node and road tables, then call
/// [`build`](Self::build).
///
/// Roads may be declared from one side only; `build()` stores every road in
/// both directions and validates that each endpoint was declared.
///
/// # Example
///
/// ```
/// use rd_core::GeoPoint;
/// use rd_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_node("A", GeoPoint::new(0.0, 0.0));
/// b.add_node("B", GeoPoint::new(0.0, 1.0));
/// b.add_road("A", "B");
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 1);
/// assert_eq!(net.neighbor_keys("B").collect::<Vec<_>>(), ["A"]);
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    nodes: Vec<(String, GeoPoint)>,
    roads: Vec<(String, String)>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node.  Returns the `NodeId` it will have in the built
    /// network (sequential from 0, in declaration order).
    pub fn add_node(&mut self, key: impl Into<String>, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((key.into(), pos));
        id
    }

    /// Declare an undirected road between two node keys.
    pub fn add_road(&mut self, a: impl Into<String>, b: impl Into<String>) {
        self.roads.push((a.into(), b.into()));
    }

    /// Declare a road from `key` to each of `neighbors` (adjacency-list form).
    pub fn add_adjacency(&mut self, key: &str, neighbors: &[&str]) {
        for &n in neighbors {
            self.add_road(key, n);
        }
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn road_count(&self) -> usize { self.roads.len() }

    /// Validate the tables and produce a [`RoadNetwork`].
    ///
    /// # Errors
    ///
    /// - [`SpatialError::DuplicateNode`] if a key is declared twice.
    /// - [`SpatialError::InvalidPosition`] for non-finite coordinates.
    /// - [`SpatialError::UnknownNode`] if a road references an undeclared key.
    pub fn build(self) -> SpatialResult<RoadNetwork> {
        let node_count = self.nodes.len();

        let mut by_key: HashMap<String, NodeId> = HashMap::with_capacity(node_count);
        for (i, (key, pos)) in self.nodes.iter().enumerate() {
            if !pos.is_finite() {
                return Err(SpatialError::InvalidPosition { key: key.clone() });
            }
            if by_key.insert(key.clone(), NodeId(i as u32)).is_some() {
                return Err(SpatialError::DuplicateNode(key.clone()));
            }
        }

        // Lexical rank of every key, and its inverse.
        let mut by_rank: Vec<NodeId> = (0..node_count as u32).map(NodeId).collect();
        by_rank.sort_unstable_by(|a, b| self.nodes[a.index()].0.cmp(&self.nodes[b.index()].0));
        let mut key_rank = vec![0u32; node_count];
        for (rank, id) in by_rank.iter().enumerate() {
            key_rank[id.index()] = rank as u32;
        }

        // Symmetric adjacency.  Self-loops carry no information and are dropped.
        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        for (a, b) in &self.roads {
            let lookup = |k: &String| {
                by_key.get(k).copied().ok_or_else(|| SpatialError::UnknownNode {
                    from:    a.clone(),
                    to:      b.clone(),
                    missing: k.clone(),
                })
            };
            let (ia, ib) = (lookup(a)?, lookup(b)?);
            if ia == ib {
                continue;
            }
            adjacency[ia.index()].push(ib);
            adjacency[ib.index()].push(ia);
        }
        for list in &mut adjacency {
            list.sort_unstable_by_key(|n| key_rank[n.index()]);
            list.dedup();
        }
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;

        let (node_key, node_pos): (Vec<String>, Vec<GeoPoint>) = self.nodes.into_iter().unzip();

        info!(nodes = node_count, roads = edge_count, "road network built");

        Ok(RoadNetwork {
            node_key,
            node_pos,
            adjacency,
            key_rank,
            by_rank,
            by_key,
            edge_count,
        })
    }
}
