//! Error taxonomy for report submission and cascade edits
use crate::fuel::{Consumer, FuelType};
use crate::report::ReportType;

/// Raised synchronously while a report is submitted. Any variant aborts the
/// whole submission; nothing is written.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("a voyage must open with a departure report, got {0:?}")]
    MissingDeparture(ReportType),
    #[error("a {current:?} report may not follow a {previous:?} report")]
    IllegalSequence {
        previous: ReportType,
        current: ReportType,
    },
    #[error("ROSP requires the previous report to be in SOSP passage state")]
    RospWithoutSosp,
    #[error("passage state after SOSP must be SOSP or ROSP")]
    SospNotResumed,
    #[error("{field} must lie within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("engine unit {0} readings are missing")]
    MissingEngineUnit(u8),
    #[error("auxiliary engine {0} readings are missing")]
    MissingAuxEngine(String),
}

/// A field modification that cannot be applied to the targeted report at
/// all. Short-circuits the edit before any cascade computation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("{field} does not apply to a {report_type:?} report")]
    NotApplicable {
        field: &'static str,
        report_type: ReportType,
    },
    #[error("{consumer:?} consumption is not tracked for {fuel:?}")]
    UnsupportedConsumer { fuel: FuelType, consumer: Consumer },
}

/// A recomputed report that would break the ledger invariant. Collected per
/// affected report, never thrown mid-cascade, so the caller sees the full
/// blast radius before deciding.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CascadeViolation {
    #[error("report {report_id}: average voyage speed {value} kn is outside 0..=30")]
    SpeedOutOfBounds { report_id: String, value: f64 },
    #[error("report {report_id}: total distance travelled {value} is negative")]
    NegativeDistance { report_id: String, value: f64 },
    #[error(
        "report {report_id}: total distance travelled {value} exceeds voyage distance allowance {limit}"
    )]
    DistanceExceedsVoyage {
        report_id: String,
        value: f64,
        limit: f64,
    },
    #[error("report {report_id}: {fuel:?} ROB would drop to {value}")]
    NegativeRob {
        report_id: String,
        fuel: FuelType,
        value: f64,
    },
}

/// Precondition failures of the modification entry point.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModifyError {
    #[error("report {0} was not found")]
    NotFound(String),
    #[error("report {0} is not approved; cascade edits require an approved baseline")]
    NotApproved(String),
    #[error("cascade produced {0} validation error(s); nothing was written")]
    InvalidCascade(usize),
}
