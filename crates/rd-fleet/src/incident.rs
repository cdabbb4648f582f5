//! Incidents: reports as submitted, and the ledger entries built from them.

use rd_core::capability::MAX_SEVERITY;
use rd_core::{Capability, GeoPoint, IncidentId, NeedType, Urgency, VehicleId, severity_score};

use crate::{FleetError, FleetResult};

// ── IncidentReport ────────────────────────────────────────────────────────────

/// A new report as supplied by the intake collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentReport {
    pub id:           IncidentId,
    /// 0–10, higher is more urgent.
    pub severity:     f32,
    pub need:         NeedType,
    pub location:     GeoPoint,
    pub description:  String,
    /// Free-form timestamp as received; the engine does not interpret it.
    pub timestamp:    String,
    /// Credibility score 1–10 from upstream screening, if any.
    pub authenticity: Option<u8>,
}

impl IncidentReport {
    /// A report with an explicit severity.
    pub fn new(id: IncidentId, severity: f32, need: NeedType, location: GeoPoint) -> Self {
        Self {
            id,
            severity,
            need,
            location,
            description:  String::new(),
            timestamp:    String::new(),
            authenticity: None,
        }
    }

    /// A report whose severity is derived from urgency and need.
    pub fn scored(id: IncidentId, urgency: Urgency, need: NeedType, location: GeoPoint) -> Self {
        Self::new(id, severity_score(urgency, need), need, location)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_authenticity(mut self, score: u8) -> Self {
        self.authenticity = Some(score);
        self
    }

    /// Check severity, authenticity, and location ranges.
    pub fn validate(&self) -> FleetResult<()> {
        if !self.severity.is_finite() || !(0.0..=MAX_SEVERITY).contains(&self.severity) {
            return Err(FleetError::InvalidSeverity { id: self.id, severity: self.severity });
        }
        match self.authenticity {
            Some(score) if !(1..=10).contains(&score) => {
                return Err(FleetError::InvalidAuthenticity { id: self.id, score });
            }
            _ => {}
        }
        if !self.location.is_finite() {
            return Err(FleetError::InvalidPosition(format!("incident {}", self.id)));
        }
        Ok(())
    }
}

// ── Incident ──────────────────────────────────────────────────────────────────

/// A ledger entry.
///
/// Everything copied from the report is fixed at creation.  The assignment
/// link and the resolved flag are the only mutable state, and only the
/// dispatch layer changes them.
#[derive(Debug, Clone)]
pub struct Incident {
    report:     IncidentReport,
    capability: Capability,
    assigned:   Option<VehicleId>,
    resolved:   bool,
}

impl Incident {
    pub(crate) fn from_report(report: IncidentReport) -> Self {
        let capability = report.need.required_capability();
        Self { report, capability, assigned: None, resolved: false }
    }

    #[inline]
    pub fn id(&self) -> IncidentId {
        self.report.id
    }

    #[inline]
    pub fn severity(&self) -> f32 {
        self.report.severity
    }

    #[inline]
    pub fn need(&self) -> NeedType {
        self.report.need
    }

    /// Capability class a vehicle needs to answer this incident.
    #[inline]
    pub fn required_capability(&self) -> Capability {
        self.capability
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.report.location
    }

    pub fn description(&self) -> &str {
        &self.report.description
    }

    pub fn timestamp(&self) -> &str {
        &self.report.timestamp
    }

    pub fn authenticity(&self) -> Option<u8> {
        self.report.authenticity
    }

    pub fn report(&self) -> &IncidentReport {
        &self.report
    }

    #[inline]
    pub fn assigned(&self) -> Option<VehicleId> {
        self.assigned
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Open and unassigned.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.assigned.is_none() && !self.resolved
    }

    // ── Mutation (dispatch layer) ─────────────────────────────────────────

    /// Link `vehicle`.  Re-opens a resolved incident.
    pub fn assign(&mut self, vehicle: VehicleId) {
        self.assigned = Some(vehicle);
        self.resolved = false;
    }

    /// Drop the vehicle link; returns the vehicle that was linked.
    pub fn unassign(&mut self) -> Option<VehicleId> {
        self.assigned.take()
    }

    /// Mark handled and drop the vehicle link.
    pub fn resolve(&mut self) -> Option<VehicleId> {
        self.resolved = true;
        self.assigned.take()
    }
}
