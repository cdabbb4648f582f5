//! CSV loaders for the vehicle roster and incident reports.
//!
//! # Roster format
//!
//! ```csv
//! name,capability,lat,lng
//! AMB-1,ambulance,18.9486,72.8336
//! POL-1,police,19.0178,72.8478
//! FIRE-1,fire,19.1136,72.8697
//! ```
//!
//! `capability` accepts `ambulance`/`medical`, `police`, or `fire`.
//! Vehicles receive ids in row order.
//!
//! # Incident format
//!
//! ```csv
//! id,urgency,need_type,severity,lat,lng,timestamp,authenticity,description
//! 1,Life-threatening,Rescue,,19.0600,72.8450,2024-07-01T09:10:00,8,Water rising in basement
//! 2,,Food,3.5,19.0400,72.8640,2024-07-01T09:12:00,,Relief camp short on rations
//! ```
//!
//! `urgency`, `severity`, and `authenticity` may be empty.  When `severity`
//! is empty it is derived from `urgency` and `need_type`; a row with
//! neither is rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rd_core::{Capability, GeoPoint, IncidentId, NeedType, Urgency, severity_score};

use crate::{FleetError, FleetResult, IncidentReport, VehicleRegistry};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    name:       String,
    capability: String,
    lat:        f64,
    lng:        f64,
}

#[derive(Deserialize)]
struct IncidentRecord {
    id:           u32,
    urgency:      Option<String>,
    need_type:    String,
    severity:     Option<f32>,
    lat:          f64,
    lng:          f64,
    #[serde(default)]
    timestamp:    String,
    authenticity: Option<u8>,
    #[serde(default)]
    description:  String,
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// Load a vehicle roster from a CSV file.
pub fn load_roster_csv(path: &Path) -> FleetResult<VehicleRegistry> {
    let file = std::fs::File::open(path)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
pub fn load_roster_reader<R: Read>(reader: R) -> FleetResult<VehicleRegistry> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut registry = VehicleRegistry::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let row = result.map_err(|e| FleetError::Parse(e.to_string()))?;
        let capability: Capability = row.capability.parse()?;
        let position = GeoPoint::new(row.lat, row.lng);
        if !position.is_finite() {
            return Err(FleetError::InvalidPosition(format!("vehicle {:?}", row.name)));
        }
        registry.add(row.name, capability, position);
    }

    Ok(registry)
}

// ── Incidents ─────────────────────────────────────────────────────────────────

/// Load incident reports from a CSV file, in file order.
pub fn load_incidents_csv(path: &Path) -> FleetResult<Vec<IncidentReport>> {
    let file = std::fs::File::open(path)?;
    load_incidents_reader(file)
}

/// Like [`load_incidents_csv`] but accepts any `Read` source.
///
/// Reports are parsed, not validated; validation happens when they are
/// submitted to an [`IncidentLedger`](crate::IncidentLedger).
pub fn load_incidents_reader<R: Read>(reader: R) -> FleetResult<Vec<IncidentReport>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut reports = Vec::new();

    for result in csv_reader.deserialize::<IncidentRecord>() {
        let row = result.map_err(|e| FleetError::Parse(e.to_string()))?;
        reports.push(to_report(row)?);
    }

    Ok(reports)
}

fn to_report(row: IncidentRecord) -> FleetResult<IncidentReport> {
    let id = IncidentId(row.id);
    let need: NeedType = row.need_type.parse()?;
    let urgency = match row.urgency.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(u) => Some(u.parse::<Urgency>()?),
    };
    let severity = match (row.severity, urgency) {
        (Some(s), _)    => s,
        (None, Some(u)) => severity_score(u, need),
        (None, None)    => {
            return Err(FleetError::Parse(format!("incident {id}: needs a severity or an urgency")));
        }
    };

    let mut report = IncidentReport::new(id, severity, need, GeoPoint::new(row.lat, row.lng))
        .with_timestamp(row.timestamp)
        .with_description(row.description);
    report.authenticity = row.authenticity;
    Ok(report)
}
