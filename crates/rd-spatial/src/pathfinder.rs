//! Point-to-point path finding over the road network.

use std::sync::Arc;

use tracing::debug;

use rd_core::GeoPoint;

use crate::network::RoadNetwork;
use crate::router::{DijkstraRouter, Route, Router};

/// Computes [`Route`]s between arbitrary geographic points.
///
/// Both endpoints are snapped to their nearest network node, the node path is
/// found with `R`, and the real endpoints are attached to either end of the
/// node polyline.  `find_path` never fails: when snapping fails, when both
/// points snap to the same node, or when the graph does not connect them,
/// the result is the straight line `[origin, destination]`.
///
/// The network is held behind an `Arc` so a `Pathfinder` can be cloned into
/// background route workers.
#[derive(Clone)]
pub struct Pathfinder<R: Router = DijkstraRouter> {
    network: Arc<RoadNetwork>,
    router:  R,
}

impl Pathfinder<DijkstraRouter> {
    /// Pathfinder using the default [`DijkstraRouter`].
    pub fn dijkstra(network: Arc<RoadNetwork>) -> Self {
        Self::new(network, DijkstraRouter)
    }
}

impl<R: Router> Pathfinder<R> {
    pub fn new(network: Arc<RoadNetwork>, router: R) -> Self {
        Self { network, router }
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn shared_network(&self) -> Arc<RoadNetwork> {
        Arc::clone(&self.network)
    }

    /// Route from `origin` to `destination`.  Always at least two points.
    pub fn find_path(&self, origin: GeoPoint, destination: GeoPoint) -> Route {
        let net = &*self.network;

        let (Some(start), Some(end)) = (net.nearest_node(origin), net.nearest_node(destination))
        else {
            debug!(%origin, %destination, "snap failed, using straight line");
            return Route::direct(origin, destination);
        };
        if start == end {
            return Route::direct(origin, destination);
        }

        match self.router.route(net, start, end) {
            Ok(path) => {
                let mut points = Vec::with_capacity(path.nodes.len() + 2);
                points.push(origin);
                points.extend(path.nodes.iter().map(|n| net.node_pos[n.index()]));
                points.push(destination);
                Route { points, via: path.nodes }
            }
            Err(e) => {
                debug!(error = %e, "no network path, using straight line");
                Route::direct(origin, destination)
            }
        }
    }
}
