//! Capability classes, need classification, and severity scoring.
//!
//! Incoming reports are classified by *need* (what the caller asked for) and
//! *urgency*.  The need determines which capability class of vehicle may
//! answer the incident; urgency and need together yield a severity score when
//! the report does not carry one.

use std::str::FromStr;

use crate::CoreError;

// ── Capability ────────────────────────────────────────────────────────────────

/// The category of emergency resource a vehicle provides.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Ambulance.
    Medical,
    /// Police unit.
    LawEnforcement,
    /// Fire and heavy-rescue appliance.
    Fire,
}

impl Capability {
    pub const ALL: [Capability; 3] =
        [Capability::Medical, Capability::LawEnforcement, Capability::Fire];

    /// Vehicle-type label used by renderers and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Medical        => "ambulance",
            Capability::LawEnforcement => "police",
            Capability::Fire           => "fire",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ambulance" | "medical"                      => Ok(Capability::Medical),
            "police" | "law-enforcement" | "lawenforcement" => Ok(Capability::LawEnforcement),
            "fire" | "fire-truck" | "firetruck"          => Ok(Capability::Fire),
            other => Err(CoreError::Parse(format!("unknown capability {other:?}"))),
        }
    }
}

// ── NeedType ──────────────────────────────────────────────────────────────────

/// What the reporter needs, as classified upstream.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeedType {
    Rescue,
    Medical,
    Food,
    Shelter,
    Supplies,
    Infrastructure,
}

impl NeedType {
    /// The capability class that must answer this need.
    pub fn required_capability(self) -> Capability {
        match self {
            NeedType::Medical                          => Capability::Medical,
            NeedType::Rescue | NeedType::Infrastructure => Capability::Fire,
            NeedType::Food | NeedType::Shelter | NeedType::Supplies => {
                Capability::LawEnforcement
            }
        }
    }

    /// Contribution of the need to the severity score.
    fn score(self) -> f32 {
        match self {
            NeedType::Rescue | NeedType::Medical => 5.0,
            NeedType::Infrastructure             => 3.0,
            NeedType::Shelter                    => 2.0,
            NeedType::Food | NeedType::Supplies  => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NeedType::Rescue         => "Rescue",
            NeedType::Medical        => "Medical",
            NeedType::Food           => "Food",
            NeedType::Shelter        => "Shelter",
            NeedType::Supplies       => "Supplies",
            NeedType::Infrastructure => "Infrastructure",
        }
    }
}

impl std::fmt::Display for NeedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NeedType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rescue"         => Ok(NeedType::Rescue),
            "medical"        => Ok(NeedType::Medical),
            "food"           => Ok(NeedType::Food),
            "shelter"        => Ok(NeedType::Shelter),
            "supplies"       => Ok(NeedType::Supplies),
            "infrastructure" => Ok(NeedType::Infrastructure),
            other => Err(CoreError::Parse(format!("unknown need type {other:?}"))),
        }
    }
}

// ── Urgency ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Urgency {
    LifeThreatening,
    Urgent,
    Minor,
}

impl Urgency {
    fn score(self) -> f32 {
        match self {
            Urgency::LifeThreatening => 10.0,
            Urgency::Urgent          => 6.0,
            Urgency::Minor           => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::LifeThreatening => "Life-threatening",
            Urgency::Urgent          => "Urgent",
            Urgency::Minor           => "Minor",
        }
    }
}

impl FromStr for Urgency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "life-threatening" | "life threatening" | "lifethreatening" => {
                Ok(Urgency::LifeThreatening)
            }
            "urgent" => Ok(Urgency::Urgent),
            "minor"  => Ok(Urgency::Minor),
            other => Err(CoreError::Parse(format!("unknown urgency {other:?}"))),
        }
    }
}

// ── Severity ──────────────────────────────────────────────────────────────────

/// Upper bound of the severity scale accepted from reports.
pub const MAX_SEVERITY: f32 = 10.0;

/// Severity derived from urgency and need, clamped to `0..=MAX_SEVERITY`.
///
/// ```
/// use rd_core::{NeedType, Urgency, severity_score};
///
/// assert_eq!(severity_score(Urgency::Urgent, NeedType::Food), 7.0);
/// assert_eq!(severity_score(Urgency::LifeThreatening, NeedType::Rescue), 10.0);
/// ```
pub fn severity_score(urgency: Urgency, need: NeedType) -> f32 {
    (urgency.score() + need.score()).min(MAX_SEVERITY)
}
