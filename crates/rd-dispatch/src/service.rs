//! Route computation off the dispatch path.
//!
//! Dispatch never waits for a route.  Requests are submitted to a
//! [`RouteService`] and the results are collected later with `poll`, at
//! which point the coordinator decides whether they still apply.

use std::collections::VecDeque;

use rd_spatial::{DijkstraRouter, Pathfinder, Router};

use crate::{RouteRequest, RouteResolution};

/// Asynchronous route resolution.
pub trait RouteService {
    /// Queue a request.  Never blocks.
    fn submit(&mut self, request: RouteRequest);

    /// Collect every resolution that is ready.  Never blocks.
    fn poll(&mut self) -> Vec<RouteResolution>;

    /// Requests submitted but not yet returned by `poll`.
    fn pending(&self) -> usize;

    /// Block until every pending request is resolved and return them all.
    fn wait_all(&mut self) -> Vec<RouteResolution> {
        self.poll()
    }
}

// ── InlineRouteService ────────────────────────────────────────────────────────

/// Resolves queued requests on the polling thread, in submission order.
///
/// Deterministic: the same sequence of submits and polls always yields the
/// same resolutions.
pub struct InlineRouteService<R: Router = DijkstraRouter> {
    pathfinder: Pathfinder<R>,
    queue:      VecDeque<RouteRequest>,
}

impl<R: Router> InlineRouteService<R> {
    pub fn new(pathfinder: Pathfinder<R>) -> Self {
        Self { pathfinder, queue: VecDeque::new() }
    }

    pub fn pathfinder(&self) -> &Pathfinder<R> {
        &self.pathfinder
    }
}

impl<R: Router> RouteService for InlineRouteService<R> {
    fn submit(&mut self, request: RouteRequest) {
        self.queue.push_back(request);
    }

    fn poll(&mut self) -> Vec<RouteResolution> {
        self.queue
            .drain(..)
            .map(|request| {
                let route = self.pathfinder.find_path(request.origin, request.destination);
                RouteResolution { request, route }
            })
            .collect()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

// ── PooledRouteService ────────────────────────────────────────────────────────

#[cfg(feature = "parallel")]
pub use pooled::PooledRouteService;

#[cfg(feature = "parallel")]
mod pooled {
    use std::sync::mpsc::{Receiver, Sender, channel};

    use rd_spatial::{DijkstraRouter, Pathfinder, Router};

    use crate::{RouteRequest, RouteResolution};
    use super::RouteService;

    /// Resolves requests on Rayon's global pool.
    ///
    /// Each request becomes one `rayon::spawn` job holding a clone of the
    /// pathfinder (an `Arc` bump).  Finished routes come back over a channel.
    /// `poll` returns them sorted by submission order so the caller applies
    /// them in a reproducible order regardless of which job finished first.
    pub struct PooledRouteService<R: Router + Clone + 'static = DijkstraRouter> {
        pathfinder:  Pathfinder<R>,
        tx:          Sender<(u64, RouteResolution)>,
        rx:          Receiver<(u64, RouteResolution)>,
        next_ticket: u64,
        in_flight:   usize,
    }

    impl<R: Router + Clone + 'static> PooledRouteService<R> {
        pub fn new(pathfinder: Pathfinder<R>) -> Self {
            let (tx, rx) = channel();
            Self { pathfinder, tx, rx, next_ticket: 0, in_flight: 0 }
        }

        fn finish(&mut self, mut done: Vec<(u64, RouteResolution)>) -> Vec<RouteResolution> {
            self.in_flight -= done.len();
            done.sort_by_key(|(ticket, _)| *ticket);
            done.into_iter().map(|(_, r)| r).collect()
        }
    }

    impl<R: Router + Clone + 'static> RouteService for PooledRouteService<R> {
        fn submit(&mut self, request: RouteRequest) {
            let pathfinder = self.pathfinder.clone();
            let tx = self.tx.clone();
            let ticket = self.next_ticket;
            self.next_ticket += 1;
            self.in_flight += 1;
            rayon::spawn(move || {
                let route = pathfinder.find_path(request.origin, request.destination);
                // Fails only if the service was dropped.
                let _ = tx.send((ticket, RouteResolution { request, route }));
            });
        }

        fn poll(&mut self) -> Vec<RouteResolution> {
            let done: Vec<_> = self.rx.try_iter().collect();
            self.finish(done)
        }

        fn pending(&self) -> usize {
            self.in_flight
        }

        fn wait_all(&mut self) -> Vec<RouteResolution> {
            let mut done = Vec::with_capacity(self.in_flight);
            while done.len() < self.in_flight {
                match self.rx.recv() {
                    Ok(item) => done.push(item),
                    Err(_) => break,
                }
            }
            self.finish(done)
        }
    }
}
