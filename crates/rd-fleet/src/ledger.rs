//! In-memory incident collection.
//!
//! Incidents are kept in arrival order, which is the order auto-dispatch
//! walks them.  Ids come from the reporting side and are not dense, so an
//! `FxHashMap` maps them to positions.

use rustc_hash::FxHashMap;
use tracing::debug;

use rd_core::IncidentId;

use crate::{FleetError, FleetResult, Incident, IncidentReport, IncidentSnapshot};

#[derive(Debug, Clone, Default)]
pub struct IncidentLedger {
    incidents: Vec<Incident>,
    index:     FxHashMap<IncidentId, usize>,
}

impl IncidentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a report.
    ///
    /// # Errors
    ///
    /// [`FleetError::DuplicateIncident`] if the id is already present, and
    /// the validation errors of the report itself (severity outside 0–10,
    /// authenticity outside 1–10, non-finite location).
    pub fn submit(&mut self, report: IncidentReport) -> FleetResult<IncidentId> {
        report.validate()?;
        let id = report.id;
        if self.index.contains_key(&id) {
            return Err(FleetError::DuplicateIncident(id));
        }
        debug!(incident = %id, severity = report.severity, need = %report.need, "incident logged");
        self.index.insert(id, self.incidents.len());
        self.incidents.push(Incident::from_report(report));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    pub fn contains(&self, id: IncidentId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: IncidentId) -> Option<&Incident> {
        self.index.get(&id).map(|&i| &self.incidents[i])
    }

    pub fn get_mut(&mut self, id: IncidentId) -> Option<&mut Incident> {
        self.index.get(&id).map(|&i| &mut self.incidents[i])
    }

    /// Incidents in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.iter()
    }

    /// Ids in arrival order.
    pub fn ids(&self) -> impl Iterator<Item = IncidentId> + '_ {
        self.incidents.iter().map(Incident::id)
    }

    /// Open, unassigned incidents.
    pub fn waiting(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.iter().filter(|i| i.is_waiting())
    }

    pub fn resolved_count(&self) -> usize {
        self.incidents.iter().filter(|i| i.is_resolved()).count()
    }

    /// The collaborator-facing feed: incidents whose authenticity is unknown
    /// or at least `min_authenticity`, most severe first.  Equal severities
    /// keep arrival order.
    pub fn feed(&self, min_authenticity: u8) -> Vec<&Incident> {
        let mut feed: Vec<&Incident> = self
            .incidents
            .iter()
            .filter(|i| i.authenticity().is_none_or(|a| a >= min_authenticity))
            .collect();
        feed.sort_by(|a, b| b.severity().total_cmp(&a.severity()));
        feed
    }

    pub fn snapshot(&self) -> Vec<IncidentSnapshot> {
        self.incidents.iter().map(IncidentSnapshot::of).collect()
    }
}
