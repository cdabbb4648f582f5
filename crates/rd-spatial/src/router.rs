//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! [`Pathfinder`][crate::Pathfinder] calls routing via the [`Router`] trait,
//! so applications can swap in A* or a precomputed table without touching
//! the dispatch layer.
//!
//! # Cost units
//!
//! Costs are planar distances in degrees (`f64`), the same unit the rest of
//! the engine measures in.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rd_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── NodePath ──────────────────────────────────────────────────────────────────

/// The raw result of a routing query: node sequence and total edge length.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePath {
    /// Nodes to visit in order, including both endpoints.
    pub nodes: Vec<NodeId>,
    /// Sum of edge costs along `nodes`.
    pub length: f64,
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A polyline from a real origin to a real destination, via network nodes.
///
/// `points[0]` is the requested origin and `points[last]` the requested
/// destination; everything between is the coordinates of `via`.  A route
/// with no `via` nodes is the straight-line fallback.  Routes are immutable
/// once computed: a new request produces a new `Route`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub points: Vec<GeoPoint>,
    pub via:    Vec<NodeId>,
}

impl Route {
    /// The two-point straight-line route `[origin, destination]`.
    pub fn direct(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self { points: vec![origin, destination], via: Vec::new() }
    }

    /// `true` if this is the straight-line fallback.
    pub fn is_direct(&self) -> bool {
        self.via.is_empty()
    }

    /// Number of waypoints (always ≥ 2 for routes built by this crate).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn waypoint(&self, i: usize) -> Option<GeoPoint> {
        self.points.get(i).copied()
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    /// Total polyline length in planar degrees.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Total polyline length in metres (haversine per segment).
    pub fn length_m(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable node-to-node routing engine.
///
/// Implementations must be `Send + Sync` so a pathfinder can run on a
/// background worker pool.
pub trait Router: Send + Sync {
    /// Compute the minimum-cost node path from `from` to `to`.
    ///
    /// `from == to` yields a single-node path of length 0.  Returns
    /// [`SpatialError::NoRoute`] when `to` is unreachable.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<NodePath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the road graph with an indexed min-heap.
///
/// Extraction order is (tentative cost, key rank): among equally distant
/// frontier nodes the lexically smallest key is settled first, so the result
/// is reproducible for a fixed table.  Search stops as soon as the
/// destination is settled.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<NodePath> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total order over finite path costs so they can live in a `BinaryHeap`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

const UNREACHED: usize = usize::MAX;

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<NodePath> {
    let n = network.node_count();
    for id in [from, to] {
        if id.index() >= n {
            return Err(SpatialError::NodeNotFound(id));
        }
    }
    if from == to {
        return Ok(NodePath { nodes: vec![from], length: 0.0 });
    }

    // dist[v] = best known cost to reach v.
    let mut dist    = vec![f64::INFINITY; n];
    // prev[v] = index of the node that reached v; UNREACHED otherwise.
    let mut prev    = vec![UNREACHED; n];
    let mut settled = vec![false; n];

    dist[from.index()] = 0.0;

    // Min-heap on (cost, key rank).  Reverse turns BinaryHeap (max) into a min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, u32)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), network.rank(from))));

    while let Some(Reverse((Cost(cost), rank))) = heap.pop() {
        let node = network.by_rank(rank);
        if settled[node.index()] {
            continue; // stale entry
        }
        settled[node.index()] = true;

        if node == to {
            return Ok(reconstruct(&prev, from, to, cost));
        }

        for &neighbor in network.neighbors(node) {
            if settled[neighbor.index()] {
                continue;
            }
            let alt = cost + network.edge_cost(node, neighbor);
            if alt < dist[neighbor.index()] {
                dist[neighbor.index()] = alt;
                prev[neighbor.index()] = node.index();
                heap.push(Reverse((Cost(alt), network.rank(neighbor))));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(prev: &[usize], from: NodeId, to: NodeId, length: f64) -> NodePath {
    let mut nodes = vec![to];
    let mut cur = to.index();
    while cur != from.index() {
        cur = prev[cur];
        nodes.push(NodeId(cur as u32));
    }
    nodes.reverse();
    NodePath { nodes, length }
}
