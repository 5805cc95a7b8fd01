//! Sequence acceptor, passage sub-machine, and per-type field checks
//!
//! All checks run at submission time, before anything is written. A single
//! failure aborts the submission.
use crate::error::ValidationError;
use crate::fuel::{BunkerInput, FuelType};
use crate::report::{
    Machinery, PassageState, Report, ReportDetails, ReportType, Weather,
};

/// Report types allowed after the given predecessor. With no predecessor the
/// voyage must open with a departure. A new departure after berth belongs to
/// the next voyage and is authorised by the voyage lifecycle, not here.
pub fn allowed_after(previous: Option<ReportType>) -> &'static [ReportType] {
    match previous {
        None => &[ReportType::Departure],
        Some(ReportType::Departure) => &[ReportType::Noon, ReportType::Arrival],
        Some(ReportType::Noon) => &[ReportType::Noon, ReportType::Arrival],
        Some(ReportType::Arrival) => &[ReportType::Berth, ReportType::ArrivalAnchorNoon],
        Some(ReportType::ArrivalAnchorNoon) => {
            &[ReportType::ArrivalAnchorNoon, ReportType::Berth]
        }
        Some(ReportType::Berth) => &[ReportType::Berth],
    }
}

pub fn check_sequence(
    previous: Option<ReportType>,
    current: ReportType,
) -> Result<(), ValidationError> {
    if allowed_after(previous).contains(&current) {
        return Ok(());
    }
    match previous {
        None => Err(ValidationError::MissingDeparture(current)),
        Some(previous) => Err(ValidationError::IllegalSequence { previous, current }),
    }
}

/// Passage sub-machine, evaluated for noon reports only. After SOSP the
/// vessel either stays stopped or resumes; ROSP is unreachable from any
/// other state.
pub fn check_passage(
    previous: Option<PassageState>,
    current: PassageState,
) -> Result<(), ValidationError> {
    match previous {
        Some(PassageState::Sosp) => match current {
            PassageState::Sosp | PassageState::Rosp => Ok(()),
            PassageState::Noon => Err(ValidationError::SospNotResumed),
        },
        _ => match current {
            PassageState::Rosp => Err(ValidationError::RospWithoutSosp),
            _ => Ok(()),
        },
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn check_weather(weather: &Weather) -> Result<(), ValidationError> {
    check_range("windForce", weather.wind_force, 0.0, 12.0)?;
    check_range("seaState", weather.sea_state, 0.0, 9.0)?;
    check_range("swellHeight", weather.swell_height, 0.0, 9.0)?;
    check_range("course", weather.course, 0.0, 360.0)?;
    check_non_negative("speed", weather.speed)?;
    Ok(())
}

fn check_bunkers(bunkers: &BunkerInput) -> Result<(), ValidationError> {
    check_non_negative("meConsumptionLsifo", bunkers.me_lsifo)?;
    check_non_negative("boilerConsumptionLsifo", bunkers.boiler_lsifo)?;
    check_non_negative("auxConsumptionLsifo", bunkers.aux_lsifo)?;
    check_non_negative("meConsumptionLsmgo", bunkers.me_lsmgo)?;
    check_non_negative("boilerConsumptionLsmgo", bunkers.boiler_lsmgo)?;
    check_non_negative("auxConsumptionLsmgo", bunkers.aux_lsmgo)?;
    check_non_negative("meConsumptionCylOil", bunkers.me_cyl_oil)?;
    check_non_negative("meConsumptionMeOil", bunkers.me_me_oil)?;
    check_non_negative("meConsumptionAeOil", bunkers.me_ae_oil)?;
    for fuel in FuelType::ALL {
        check_non_negative("supply", bunkers.supply.get(fuel))?;
    }
    Ok(())
}

/// Sea reports must carry readings for main-engine units 1..=6 and at least
/// generator DG1. Berth reports are exempt and carry no machinery block.
fn check_machinery(machinery: &Machinery) -> Result<(), ValidationError> {
    for unit in 1..=6u8 {
        if !machinery.units.iter().any(|u| u.unit == unit) {
            return Err(ValidationError::MissingEngineUnit(unit));
        }
    }
    if !machinery.aux_engines.iter().any(|a| a.name == "DG1") {
        return Err(ValidationError::MissingAuxEngine("DG1".into()));
    }
    Ok(())
}

/// Per-type field presence and range checks. A zero value is a present,
/// valid value; only genuinely out-of-range or negative figures fail.
pub fn check_fields(report: &Report) -> Result<(), ValidationError> {
    check_non_negative("sailingTimeVoyage", report.sailing_time_voyage)?;
    check_bunkers(&report.bunkers)?;

    match &report.details {
        ReportDetails::Departure {
            harbour_distance,
            weather,
            machinery,
        } => {
            check_non_negative("harbourDistance", *harbour_distance)?;
            check_weather(weather)?;
            check_machinery(machinery)?;
        }
        ReportDetails::Noon {
            distance_since_last_report,
            weather,
            machinery,
            ..
        }
        | ReportDetails::Arrival {
            distance_since_last_report,
            weather,
            machinery,
        }
        | ReportDetails::ArrivalAnchorNoon {
            distance_since_last_report,
            weather,
            machinery,
        } => {
            check_non_negative("distanceSinceLastReport", *distance_since_last_report)?;
            check_weather(weather)?;
            check_machinery(machinery)?;
        }
        ReportDetails::Berth {
            cargo_loaded,
            cargo_unloaded,
            ..
        } => {
            check_non_negative("cargoLoaded", *cargo_loaded)?;
            check_non_negative("cargoUnloaded", *cargo_unloaded)?;
        }
    }
    Ok(())
}
