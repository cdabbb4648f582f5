use thiserror::Error;

use rd_core::{CoreError, IncidentId, VehicleId};

use crate::VehicleStatus;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("incident {0} already exists")]
    DuplicateIncident(IncidentId),

    #[error("incident {id}: severity {severity} outside 0–10")]
    InvalidSeverity { id: IncidentId, severity: f32 },

    #[error("incident {id}: authenticity {score} outside 1–10")]
    InvalidAuthenticity { id: IncidentId, score: u8 },

    #[error("invalid position {0}")]
    InvalidPosition(String),

    #[error("{vehicle}: illegal transition {from} → {to}")]
    IllegalTransition {
        vehicle: VehicleId,
        from:    VehicleStatus,
        to:      VehicleStatus,
    },
}

pub type FleetResult<T> = Result<T, FleetError>;
