//! mumbai: rescue dispatch over the built-in Mumbai road network.
//!
//! Loads an embedded roster and incident list, adds a seeded stream of
//! synthetic reports, and runs the dispatch loop.  Vehicles that have spent
//! `ON_SCENE_TICKS` on scene are sent back to base, which resolves their
//! incident and frees them for the next one.
//!
//! ```text
//! mumbai [config.json]
//! ```
//!
//! The optional argument is a JSON `SimConfig`; missing fields take their
//! defaults.  Output goes to `output/mumbai/`.  Set `RUST_LOG=debug` for
//! per-tick logging.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rd_core::{GeoPoint, IncidentId, NeedType, SimConfig, Tick, Urgency, VehicleId};
use rd_dispatch::{DispatchEvent, NearestIdlePolicy, RouteService};
use rd_fleet::{IncidentLedger, IncidentReport, VehicleRegistry, VehicleStatus, load_incidents_reader, load_roster_reader};
use rd_output::{CsvWriter, OutputWriter, SimOutputObserver};
use rd_sim::{Sim, SimBuilder, SimObserver, TickSummary};
use rd_spatial::{Pathfinder, RoadNetwork, presets};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:        &str = "output/mumbai";
const DEMO_TICKS:        u64  = 3_000; // 5 simulated minutes at 100 ms/tick
const SNAPSHOT_INTERVAL: u64  = 50;
const SYNTHETIC_REPORTS: u32  = 12;
const ON_SCENE_TICKS:    u64  = 150;

// ── Embedded data ─────────────────────────────────────────────────────────────

const ROSTER_CSV: &str = "\
name,capability,lat,lng\n\
AMB-1,ambulance,18.9486,72.8336\n\
AMB-2,ambulance,19.0178,72.8478\n\
AMB-3,ambulance,19.1136,72.8697\n\
POL-1,police,18.9401,72.8347\n\
POL-2,police,19.0600,72.8450\n\
FIRE-1,fire,18.9486,72.8336\n\
FIRE-2,fire,19.0730,72.8810\n\
FIRE-3,fire,19.1860,72.8370\n\
";

const INCIDENTS_CSV: &str = "\
id,urgency,need_type,severity,lat,lng,timestamp,authenticity,description\n\
1,Life-threatening,Rescue,,19.0380,72.8530,2024-07-01T09:10:00,8,Family trapped on roof in Dharavi\n\
2,Life-threatening,Medical,,18.9750,72.8330,2024-07-01T09:11:30,9,Elderly man unconscious in flooded chawl\n\
3,Urgent,Food,,19.0400,72.8640,2024-07-01T09:12:00,6,Relief camp short on rations\n\
4,,Infrastructure,8.5,19.1000,72.8270,2024-07-01T09:14:00,7,Transformer sparking over waterlogged road\n\
5,Minor,Shelter,,19.1450,72.8300,2024-07-01T09:15:00,2,Unverified report of roof damage\n\
6,Urgent,Medical,,19.1720,72.9560,2024-07-01T09:17:00,,Injured cyclist near Mulund check naka\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Forwards to the CSV observer and keeps a few run totals.
struct DemoObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    dispatched:   usize,
    arrivals:     usize,
    resolved:     usize,
    stale:        usize,
    peak_waiting: usize,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, dispatched: 0, arrivals: 0, resolved: 0, stale: 0, peak_waiting: 0 }
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &DispatchEvent) {
        match event {
            DispatchEvent::Dispatched { .. }                     => self.dispatched += 1,
            DispatchEvent::Arrived { .. }                        => self.arrivals += 1,
            DispatchEvent::ReturnedToBase { resolved: true, .. } => self.resolved += 1,
            DispatchEvent::StaleRouteDiscarded { .. }            => self.stale += 1,
            _ => {}
        }
        self.inner.on_event(tick, event);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.peak_waiting = self.peak_waiting.max(summary.waiting);
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &VehicleRegistry, incidents: &IncidentLedger) {
        self.inner.on_snapshot(tick, vehicles, incidents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== mumbai: rescue dispatch ===");

    // 1. Configuration.
    let config = load_config(std::env::args().nth(1).map(PathBuf::from))?;
    println!(
        "Ticks: {}  |  Tick: {} ms  |  Speed: {} deg/tick  |  Seed: {}",
        config.total_ticks, config.tick_duration_ms, config.vehicle_speed_deg_per_tick, config.seed
    );

    // 2. Road network.
    let network = Arc::new(presets::mumbai()?);
    println!("Road network: {} nodes, {} roads", network.node_count(), network.edge_count());

    // 3. Roster and reports.
    let roster = load_roster_reader(Cursor::new(ROSTER_CSV))?;
    let reports = load_incidents_reader(Cursor::new(INCIDENTS_CSV))?;
    let synthetic = synthetic_feed(&network, &config);
    println!(
        "Fleet: {} vehicles  |  Reports: {} loaded + {} synthetic",
        roster.len(),
        reports.len(),
        synthetic.len()
    );
    println!();

    // 4. Build.
    let pathfinder = Pathfinder::dijkstra(network);
    let mut builder = SimBuilder::new(config, roster, pathfinder.clone()).incidents(reports);
    for (at, report) in synthetic {
        builder = builder.schedule(at, report);
    }

    #[cfg(feature = "parallel")]
    let sim = builder.route_service(rd_dispatch::PooledRouteService::new(pathfinder)).build()?;
    #[cfg(not(feature = "parallel"))]
    let sim = builder.build()?;

    run(sim)
}

fn run<S: RouteService>(mut sim: Sim<NearestIdlePolicy, S>) -> Result<()> {
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = DemoObserver::new(SimOutputObserver::new(writer, &sim.config));

    // 5. Run, sending vehicles home once they have been on scene long enough.
    let mut busy_since: Vec<Option<Tick>> = vec![None; sim.vehicles().len()];
    let end = sim.config.end_tick();
    let t0 = Instant::now();

    while sim.now() < end {
        sim.step(&mut obs);
        let now = sim.now();

        let mut done: Vec<VehicleId> = Vec::new();
        for v in sim.vehicles().iter() {
            let slot = &mut busy_since[v.id.index()];
            match (v.status(), *slot) {
                (VehicleStatus::Busy, None) => *slot = Some(now),
                (VehicleStatus::Busy, Some(since)) if now.since(since) >= ON_SCENE_TICKS => done.push(v.id),
                (VehicleStatus::Busy, Some(_)) => {}
                _ => *slot = None,
            }
        }
        for id in done {
            sim.return_to_base(id);
            busy_since[id.index()] = None;
        }
    }
    sim.finish(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    info!(elapsed_ms = elapsed.as_millis() as u64, "run complete");
    println!("Simulation complete in {:.3} s ({} simulated)", elapsed.as_secs_f64(), sim.clock);
    println!("  dispatches      : {}", obs.dispatched);
    println!("  arrivals        : {}", obs.arrivals);
    println!("  resolved        : {}", obs.resolved);
    println!("  stale routes    : {}", obs.stale);
    println!("  peak waiting    : {}", obs.peak_waiting);
    println!("  pending routes  : {}", sim.pending_routes());
    println!();

    // 7. Final fleet table.
    println!(
        "{:<8} {:<10} {:<11} {:>9} {:>9} {:>9} {:>9}",
        "Vehicle", "Type", "Status", "Lat", "Lng", "Incident", "Route km"
    );
    println!("{}", "-".repeat(72));
    for v in sim.vehicles().iter() {
        let pos = v.position();
        let incident = v.incident().map_or_else(|| "-".to_owned(), |i| i.0.to_string());
        let km = v.route().map_or_else(|| "-".to_owned(), |r| format!("{:.2}", r.length_m() / 1000.0));
        println!(
            "{:<8} {:<10} {:<11} {:>9.4} {:>9.4} {:>9} {:>9}",
            v.name, v.capability, v.status(), pos.lat, pos.lng, incident, km
        );
    }
    println!();

    // 8. Feed view.
    println!("Feed (authenticity >= {}, most severe first):", sim.config.min_authenticity);
    for i in sim.feed().iter().take(8) {
        let state = match (i.is_resolved(), i.assigned()) {
            (true, _)        => "resolved".to_owned(),
            (false, Some(v)) => format!("assigned {v}"),
            (false, None)    => "waiting".to_owned(),
        };
        println!("  #{:<4} {:>4.1}  {:<15} {}", i.id().0, i.severity(), i.need(), state);
    }

    // 9. Final snapshot as JSON.
    let path = Path::new(OUTPUT_DIR).join("snapshot.json");
    let file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(file, &sim.snapshot())?;
    println!();
    println!("Wrote CSVs and {}", path.display());

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig {
            total_ticks:             DEMO_TICKS,
            snapshot_interval_ticks: SNAPSHOT_INTERVAL,
            ..SimConfig::default()
        });
    };
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))
}

/// Seeded reports scattered around network nodes over the first half of the run.
fn synthetic_feed(network: &RoadNetwork, config: &SimConfig) -> Vec<(Tick, IncidentReport)> {
    const NEEDS: [NeedType; 6] = [
        NeedType::Rescue,
        NeedType::Medical,
        NeedType::Food,
        NeedType::Shelter,
        NeedType::Supplies,
        NeedType::Infrastructure,
    ];
    const URGENCIES: [Urgency; 3] = [Urgency::LifeThreatening, Urgency::Urgent, Urgency::Minor];

    let sites: Vec<GeoPoint> = network.node_ids().filter_map(|n| network.position(n)).collect();
    if sites.is_empty() {
        return Vec::new();
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let horizon = (config.total_ticks / 2).max(1);

    (0..SYNTHETIC_REPORTS)
        .map(|i| {
            let site = sites[rng.gen_range(0..sites.len())];
            let location = GeoPoint::new(
                site.lat + rng.gen_range(-0.004..0.004),
                site.lng + rng.gen_range(-0.004..0.004),
            );
            let need = NEEDS[rng.gen_range(0..NEEDS.len())];
            let urgency = URGENCIES[rng.gen_range(0..URGENCIES.len())];
            let report = IncidentReport::scored(IncidentId(100 + i), urgency, need, location)
                .with_authenticity(rng.gen_range(1..=10))
                .with_description(format!("{} / {}", urgency.as_str(), need.as_str()));
            (Tick(rng.gen_range(0..horizon)), report)
        })
        .collect()
}
