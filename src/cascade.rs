//! Cascade calculator: applies field edits to one approved report and
//! replays the resulting deltas across every later approved report in the
//! voyage.
//!
//! The calculator is pure. It receives the source report, its original
//! predecessor, the voyage, and the ordered list of later approved reports,
//! and returns a [`CascadeResult`] without touching any store. Running the
//! same edit list twice yields the same result.
use crate::error::{CascadeViolation, EditError};
use crate::fuel::{Consumer, FuelLevels, FuelType};
use crate::ledger;
use crate::report::{
    CargoStatus, Passage, PassageState, Report, ReportDetails, ReportType,
};
use crate::voyage::Voyage;

/// Which running-total track an edited field belongs to. A field with no
/// category is applied to the source report but never cascades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeCategory {
    Distance,
    BunkerConsumption,
    BunkerSupply,
    Cargo,
}

/// One edit to one report. The enumeration is closed on purpose: a new
/// cascading field cannot be added without the compiler forcing a decision
/// in [`FieldModification::category`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldModification {
    DistanceSinceLastReport(f64),
    HarbourDistance(f64),
    /// Authoritative voyage distance, editable through a departure report
    /// only; it then governs every distance computation in the cascade.
    VoyageDistance(f64),
    TotalDistanceTravelled(f64),
    Consumption(FuelType, Consumer, f64),
    Supply(FuelType, f64),
    CargoLoaded(f64),
    CargoUnloaded(f64),
    CargoQuantity(f64),
    CargoType(String),
    CargoStatus(CargoStatus),
    /// Replaces the noon passage sub-state wholesale. Moving away from
    /// SOSP/ROSP drops that sub-state's position/time fields by
    /// construction; the drop is recorded in the diff.
    Passage(Passage),
    WindForce(f64),
    Course(f64),
}

impl FieldModification {
    pub fn category(&self) -> Option<CascadeCategory> {
        match self {
            FieldModification::DistanceSinceLastReport(_)
            | FieldModification::HarbourDistance(_)
            | FieldModification::VoyageDistance(_)
            | FieldModification::TotalDistanceTravelled(_) => Some(CascadeCategory::Distance),
            FieldModification::Consumption(..) => Some(CascadeCategory::BunkerConsumption),
            FieldModification::Supply(..) => Some(CascadeCategory::BunkerSupply),
            FieldModification::CargoLoaded(_)
            | FieldModification::CargoUnloaded(_)
            | FieldModification::CargoQuantity(_)
            | FieldModification::CargoType(_)
            | FieldModification::CargoStatus(_) => Some(CascadeCategory::Cargo),
            FieldModification::Passage(_)
            | FieldModification::WindForce(_)
            | FieldModification::Course(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldModification::DistanceSinceLastReport(_) => "distanceSinceLastReport",
            FieldModification::HarbourDistance(_) => "harbourDistance",
            FieldModification::VoyageDistance(_) => "voyageDistance",
            FieldModification::TotalDistanceTravelled(_) => "totalDistanceTravelled",
            FieldModification::Consumption(fuel, consumer, _) => {
                consumption_label(*fuel, *consumer)
            }
            FieldModification::Supply(fuel, _) => supply_label(*fuel),
            FieldModification::CargoLoaded(_) => "cargoLoaded",
            FieldModification::CargoUnloaded(_) => "cargoUnloaded",
            FieldModification::CargoQuantity(_) => "cargoQuantity",
            FieldModification::CargoType(_) => "cargoType",
            FieldModification::CargoStatus(_) => "cargoStatus",
            FieldModification::Passage(_) => "passageState",
            FieldModification::WindForce(_) => "windForce",
            FieldModification::Course(_) => "course",
        }
    }
}

fn consumption_label(fuel: FuelType, consumer: Consumer) -> &'static str {
    match (consumer, fuel) {
        (Consumer::MainEngine, FuelType::Lsifo) => "meConsumptionLsifo",
        (Consumer::MainEngine, FuelType::Lsmgo) => "meConsumptionLsmgo",
        (Consumer::MainEngine, FuelType::CylOil) => "meConsumptionCylOil",
        (Consumer::MainEngine, FuelType::MeOil) => "meConsumptionMeOil",
        (Consumer::MainEngine, FuelType::AeOil) => "meConsumptionAeOil",
        (Consumer::Boiler, FuelType::Lsifo) => "boilerConsumptionLsifo",
        (Consumer::Boiler, FuelType::Lsmgo) => "boilerConsumptionLsmgo",
        (Consumer::Auxiliary, FuelType::Lsifo) => "auxConsumptionLsifo",
        (Consumer::Auxiliary, FuelType::Lsmgo) => "auxConsumptionLsmgo",
        // Not tracked; the apply step rejects these before labelling matters.
        (Consumer::Boiler | Consumer::Auxiliary, _) => "consumption",
    }
}

fn supply_label(fuel: FuelType) -> &'static str {
    match fuel {
        FuelType::Lsifo => "supplyLsifo",
        FuelType::Lsmgo => "supplyLsmgo",
        FuelType::CylOil => "supplyCylOil",
        FuelType::MeOil => "supplyMeOil",
        FuelType::AeOil => "supplyAeOil",
    }
}

fn rob_label(fuel: FuelType) -> &'static str {
    match fuel {
        FuelType::Lsifo => "currentRobLsifo",
        FuelType::Lsmgo => "currentRobLsmgo",
        FuelType::CylOil => "currentRobCylOil",
        FuelType::MeOil => "currentRobMeOil",
        FuelType::AeOil => "currentRobAeOil",
    }
}

/// Old/new value of one field in a diff.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Num(f64),
    Text(String),
    Passage(PassageState),
    Cargo(CargoStatus),
    /// The field does not exist on the report in this state, e.g. a ROSP
    /// position after the passage state was forced back to NOON.
    Missing,
}

impl FieldValue {
    fn opt_num(value: Option<f64>) -> FieldValue {
        value.map_or(FieldValue::Missing, FieldValue::Num)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: FieldValue,
    pub new: FieldValue,
}

/// One report touched by a cascade: its diff, its fully recomputed state,
/// and any ledger violations the new state would carry.
#[derive(Debug, Clone)]
pub struct AffectedReport {
    pub report_id: String,
    pub report_type: ReportType,
    pub changes: Vec<FieldChange>,
    pub state: Report,
    pub violations: Vec<CascadeViolation>,
}

#[derive(Debug, Clone)]
pub struct CascadeResult {
    pub is_valid: bool,
    /// The recomputed source report first, then every later report whose
    /// value actually changed, in chain order.
    pub affected: Vec<AffectedReport>,
    /// Every violation across all affected reports, flattened.
    pub violations: Vec<CascadeViolation>,
    /// Voyage distance in effect for the cascade; differs from the stored
    /// voyage when the edit set changed it.
    pub voyage_distance: f64,
}

impl CascadeResult {
    pub fn source(&self) -> &AffectedReport {
        &self.affected[0]
    }
}

/// Everything the calculator needs, already loaded by the caller.
pub struct CascadeInput<'a> {
    pub source: &'a Report,
    /// The report immediately before the source in the approved chain, if
    /// any. Its ROB, distance and cargo figures are the recompute baseline.
    pub predecessor: Option<&'a Report>,
    /// Vessel ROB baseline, consumed only when no predecessor exists.
    pub initial_rob: &'a FuelLevels,
    pub voyage: &'a Voyage,
    /// Every later approved report of the voyage, ascending sequence order.
    pub later: &'a [Report],
}

#[derive(Debug, Default, Clone, Copy)]
struct Tracks {
    distance: bool,
    bunker: bool,
    cargo: bool,
}

impl Tracks {
    fn any(self) -> bool {
        self.distance || self.bunker || self.cargo
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Deltas {
    distance: f64,
    rob: FuelLevels,
    cargo_quantity: f64,
}

/// Run one cascade over the given edit set. Pure; retains no state between
/// invocations.
pub fn run(
    input: &CascadeInput<'_>,
    modifications: &[FieldModification],
) -> Result<CascadeResult, EditError> {
    let mut source = input.source.clone();
    let mut changes: Vec<FieldChange> = vec![];
    let mut tracks = Tracks::default();
    let mut voyage_distance = input.voyage.voyage_distance;

    for modification in modifications {
        apply_edit(
            modification,
            &mut source,
            &mut changes,
            &mut voyage_distance,
            input.voyage.voyage_distance,
        )?;
        match modification.category() {
            Some(CascadeCategory::Distance) => tracks.distance = true,
            Some(CascadeCategory::BunkerConsumption | CascadeCategory::BunkerSupply) => {
                tracks.bunker = true;
            }
            Some(CascadeCategory::Cargo) => tracks.cargo = true,
            None => {}
        }
    }

    // A direct total override wins over recomputation from the predecessor.
    let total_override = modifications.iter().rev().find_map(|m| match m {
        FieldModification::TotalDistanceTravelled(v) => Some(*v),
        _ => None,
    });
    let cargo_inputs_edited = modifications.iter().any(|m| {
        matches!(
            m,
            FieldModification::CargoLoaded(_) | FieldModification::CargoUnloaded(_)
        )
    });
    let cargo_quantity_edited = modifications
        .iter()
        .any(|m| matches!(m, FieldModification::CargoQuantity(_)));

    let passage_changed = source.passage_state() != input.source.passage_state();
    let mut deltas = Deltas::default();

    // Recompute the source's own derived fields per triggered track, always
    // against the original predecessor baseline.
    if tracks.distance {
        let new_total = total_override.unwrap_or_else(|| match &source.details {
            ReportDetails::Departure {
                harbour_distance, ..
            } => *harbour_distance,
            _ => {
                let previous_total = input
                    .predecessor
                    .map_or(0.0, |p| p.total_distance_travelled);
                previous_total + source.distance_since_last()
            }
        });
        deltas.distance = new_total - input.source.total_distance_travelled;
        push_change(
            &mut changes,
            "totalDistanceTravelled",
            FieldValue::Num(input.source.total_distance_travelled),
            FieldValue::Num(new_total),
        );
        source.total_distance_travelled = new_total;

        let distance_to_go = ledger::distance_to_go(voyage_distance, new_total);
        push_change(
            &mut changes,
            "distanceToGo",
            FieldValue::Num(input.source.distance_to_go),
            FieldValue::Num(distance_to_go),
        );
        source.distance_to_go = distance_to_go;

        let speed = ledger::avg_speed(new_total, source.sailing_time_voyage);
        push_change(
            &mut changes,
            "avgSpeedVoyage",
            FieldValue::opt_num(input.source.avg_speed_voyage),
            FieldValue::opt_num(speed),
        );
        source.avg_speed_voyage = speed;
    }

    if tracks.bunker {
        let baseline = input.predecessor.map_or(input.initial_rob, |p| &p.rob);
        let new_rob = ledger::next_rob(baseline, &source.bunkers);
        for fuel in FuelType::ALL {
            let old = input.source.rob.get(fuel);
            let new = new_rob.get(fuel);
            deltas.rob.set(fuel, new - old);
            push_change(
                &mut changes,
                rob_label(fuel),
                FieldValue::Num(old),
                FieldValue::Num(new),
            );
        }
        source.rob = new_rob;
    }

    if tracks.cargo {
        let old_quantity = input.source.cargo_quantity().unwrap_or(0.0);
        let old_status = match &input.source.details {
            ReportDetails::Berth { cargo_status, .. } => *cargo_status,
            _ => CargoStatus::Empty,
        };
        if let ReportDetails::Berth {
            cargo_loaded,
            cargo_unloaded,
            cargo_quantity,
            cargo_status,
            ..
        } = &mut source.details
        {
            if cargo_inputs_edited {
                // Load/discharge figures changed: rebuild the balance from
                // the predecessor's quantity.
                let previous_quantity = input
                    .predecessor
                    .and_then(Report::cargo_quantity)
                    .unwrap_or(0.0);
                let (quantity, status) =
                    ledger::cargo_balance(previous_quantity, *cargo_loaded, *cargo_unloaded);
                *cargo_quantity = quantity;
                *cargo_status = status;
            } else if cargo_quantity_edited {
                *cargo_status = ledger::cargo_status(*cargo_quantity);
            }
            deltas.cargo_quantity = *cargo_quantity - old_quantity;
            push_change(
                &mut changes,
                "cargoQuantity",
                FieldValue::Num(old_quantity),
                FieldValue::Num(*cargo_quantity),
            );
            push_change(
                &mut changes,
                "cargoStatus",
                FieldValue::Cargo(old_status),
                FieldValue::Cargo(*cargo_status),
            );
        }
    }

    let source_violations = validate_recomputed(&source, voyage_distance);
    let mut affected = vec![AffectedReport {
        report_id: source.id.clone(),
        report_type: source.report_type(),
        changes,
        violations: source_violations,
        state: source.clone(),
    }];

    // Fold the deltas forward, carrying the predecessor's passage state so
    // an orphaned ROSP leg can be detected.
    if tracks.any() || passage_changed {
        let mut previous_passage = source.passage_state();
        for original in input.later {
            let mut report = original.clone();
            let mut report_changes: Vec<FieldChange> = vec![];

            if tracks.distance {
                let total = report.total_distance_travelled + deltas.distance;
                push_change(
                    &mut report_changes,
                    "totalDistanceTravelled",
                    FieldValue::Num(original.total_distance_travelled),
                    FieldValue::Num(total),
                );
                report.total_distance_travelled = total;

                let distance_to_go = ledger::distance_to_go(voyage_distance, total);
                push_change(
                    &mut report_changes,
                    "distanceToGo",
                    FieldValue::Num(original.distance_to_go),
                    FieldValue::Num(distance_to_go),
                );
                report.distance_to_go = distance_to_go;

                // Sailing time is this report's own figure and never moves
                // in a cascade; only the distance component changes.
                let speed = ledger::avg_speed(total, report.sailing_time_voyage);
                push_change(
                    &mut report_changes,
                    "avgSpeedVoyage",
                    FieldValue::opt_num(original.avg_speed_voyage),
                    FieldValue::opt_num(speed),
                );
                report.avg_speed_voyage = speed;
            }

            if tracks.bunker {
                for fuel in FuelType::ALL {
                    let delta = deltas.rob.get(fuel);
                    if delta == 0.0 {
                        continue;
                    }
                    let new = report.rob.get(fuel) + delta;
                    push_change(
                        &mut report_changes,
                        rob_label(fuel),
                        FieldValue::Num(original.rob.get(fuel)),
                        FieldValue::Num(new),
                    );
                    report.rob.set(fuel, new);
                }
            }

            if tracks.cargo && deltas.cargo_quantity != 0.0 {
                if let ReportDetails::Berth {
                    cargo_quantity,
                    cargo_status,
                    ..
                } = &mut report.details
                {
                    let old_quantity = *cargo_quantity;
                    let old_status = *cargo_status;
                    *cargo_quantity += deltas.cargo_quantity;
                    *cargo_status = ledger::cargo_status(*cargo_quantity);
                    push_change(
                        &mut report_changes,
                        "cargoQuantity",
                        FieldValue::Num(old_quantity),
                        FieldValue::Num(*cargo_quantity),
                    );
                    push_change(
                        &mut report_changes,
                        "cargoStatus",
                        FieldValue::Cargo(old_status),
                        FieldValue::Cargo(*cargo_status),
                    );
                }
            }

            // A ROSP leg cannot survive without a SOSP immediately upstream
            // once the edits ripple through; force it back to plain NOON.
            if report.passage_state() == Some(PassageState::Rosp)
                && previous_passage != Some(PassageState::Sosp)
            {
                if let ReportDetails::Noon { passage, .. } = &mut report.details {
                    if let Passage::Rosp { position, since } = passage.clone() {
                        push_change(
                            &mut report_changes,
                            "passageState",
                            FieldValue::Passage(PassageState::Rosp),
                            FieldValue::Passage(PassageState::Noon),
                        );
                        push_change(
                            &mut report_changes,
                            "rospPosition",
                            FieldValue::Text(position),
                            FieldValue::Missing,
                        );
                        push_change(
                            &mut report_changes,
                            "rospSince",
                            FieldValue::Text(since.to_datetime_utc().to_rfc3339()),
                            FieldValue::Missing,
                        );
                        *passage = Passage::Noon;
                    }
                }
            }

            previous_passage = report.passage_state();

            // Violations never stop the fold; later reports still get
            // computed so the full blast radius is visible.
            let violations = validate_recomputed(&report, voyage_distance);
            if !report_changes.is_empty() || !violations.is_empty() {
                affected.push(AffectedReport {
                    report_id: report.id.clone(),
                    report_type: report.report_type(),
                    changes: report_changes,
                    violations,
                    state: report,
                });
            }
        }
    }

    let violations: Vec<CascadeViolation> = affected
        .iter()
        .flat_map(|a| a.violations.iter().cloned())
        .collect();

    Ok(CascadeResult {
        is_valid: violations.is_empty(),
        affected,
        violations,
        voyage_distance,
    })
}

/// Applies one modification to the in-memory source copy, recording the
/// literal field change. Derived-field recomputation happens afterwards in
/// [`run`].
fn apply_edit(
    modification: &FieldModification,
    report: &mut Report,
    changes: &mut Vec<FieldChange>,
    voyage_distance: &mut f64,
    original_voyage_distance: f64,
) -> Result<(), EditError> {
    let report_type = report.report_type();
    let not_applicable = || EditError::NotApplicable {
        field: modification.label(),
        report_type,
    };

    match modification {
        FieldModification::VoyageDistance(value) => {
            if report_type != ReportType::Departure {
                return Err(not_applicable());
            }
            push_change(
                changes,
                "voyageDistance",
                FieldValue::Num(original_voyage_distance),
                FieldValue::Num(*value),
            );
            *voyage_distance = *value;
            Ok(())
        }
        FieldModification::TotalDistanceTravelled(value) => {
            push_change(
                changes,
                "totalDistanceTravelled",
                FieldValue::Num(report.total_distance_travelled),
                FieldValue::Num(*value),
            );
            report.total_distance_travelled = *value;
            Ok(())
        }
        FieldModification::DistanceSinceLastReport(value) => match &mut report.details {
            ReportDetails::Noon {
                distance_since_last_report,
                ..
            }
            | ReportDetails::Arrival {
                distance_since_last_report,
                ..
            }
            | ReportDetails::ArrivalAnchorNoon {
                distance_since_last_report,
                ..
            } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(*distance_since_last_report),
                    FieldValue::Num(*value),
                );
                *distance_since_last_report = *value;
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::HarbourDistance(value) => match &mut report.details {
            ReportDetails::Departure {
                harbour_distance, ..
            } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(*harbour_distance),
                    FieldValue::Num(*value),
                );
                *harbour_distance = *value;
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::Consumption(fuel, consumer, value) => {
            let old = report.bunkers.consumption(*fuel, *consumer).ok_or(
                EditError::UnsupportedConsumer {
                    fuel: *fuel,
                    consumer: *consumer,
                },
            )?;
            push_change(
                changes,
                modification.label(),
                FieldValue::Num(old),
                FieldValue::Num(*value),
            );
            report.bunkers.set_consumption(*fuel, *consumer, *value);
            Ok(())
        }
        FieldModification::Supply(fuel, value) => {
            push_change(
                changes,
                modification.label(),
                FieldValue::Num(report.bunkers.supply.get(*fuel)),
                FieldValue::Num(*value),
            );
            report.bunkers.supply.set(*fuel, *value);
            Ok(())
        }
        FieldModification::CargoLoaded(value) => match &mut report.details {
            ReportDetails::Berth { cargo_loaded, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(*cargo_loaded),
                    FieldValue::Num(*value),
                );
                *cargo_loaded = *value;
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::CargoUnloaded(value) => match &mut report.details {
            ReportDetails::Berth { cargo_unloaded, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(*cargo_unloaded),
                    FieldValue::Num(*value),
                );
                *cargo_unloaded = *value;
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::CargoQuantity(value) => match &mut report.details {
            ReportDetails::Berth { cargo_quantity, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(*cargo_quantity),
                    FieldValue::Num(*value),
                );
                *cargo_quantity = *value;
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::CargoType(value) => match &mut report.details {
            ReportDetails::Berth { cargo_type, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Text(cargo_type.clone()),
                    FieldValue::Text(value.clone()),
                );
                *cargo_type = value.clone();
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::CargoStatus(value) => match &mut report.details {
            ReportDetails::Berth { cargo_status, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Cargo(*cargo_status),
                    FieldValue::Cargo(*value),
                );
                *cargo_status = *value;
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::Passage(new_passage) => match &mut report.details {
            ReportDetails::Noon { passage, .. } => {
                let old = passage.clone();
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Passage(old.state()),
                    FieldValue::Passage(new_passage.state()),
                );
                // Leaving SOSP/ROSP drops the sub-state's position and time
                // fields; record the drop alongside the state change.
                if old.state() != new_passage.state() {
                    match &old {
                        Passage::Sosp { position, since } => {
                            push_change(
                                changes,
                                "sospPosition",
                                FieldValue::Text(position.clone()),
                                FieldValue::Missing,
                            );
                            push_change(
                                changes,
                                "sospSince",
                                FieldValue::Text(since.to_datetime_utc().to_rfc3339()),
                                FieldValue::Missing,
                            );
                        }
                        Passage::Rosp { position, since } => {
                            push_change(
                                changes,
                                "rospPosition",
                                FieldValue::Text(position.clone()),
                                FieldValue::Missing,
                            );
                            push_change(
                                changes,
                                "rospSince",
                                FieldValue::Text(since.to_datetime_utc().to_rfc3339()),
                                FieldValue::Missing,
                            );
                        }
                        Passage::Noon => {}
                    }
                }
                *passage = new_passage.clone();
                Ok(())
            }
            _ => Err(not_applicable()),
        },
        FieldModification::WindForce(value) => match &mut report.details {
            ReportDetails::Departure { weather, .. }
            | ReportDetails::Noon { weather, .. }
            | ReportDetails::Arrival { weather, .. }
            | ReportDetails::ArrivalAnchorNoon { weather, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(weather.wind_force),
                    FieldValue::Num(*value),
                );
                weather.wind_force = *value;
                Ok(())
            }
            ReportDetails::Berth { .. } => Err(not_applicable()),
        },
        FieldModification::Course(value) => match &mut report.details {
            ReportDetails::Departure { weather, .. }
            | ReportDetails::Noon { weather, .. }
            | ReportDetails::Arrival { weather, .. }
            | ReportDetails::ArrivalAnchorNoon { weather, .. } => {
                push_change(
                    changes,
                    modification.label(),
                    FieldValue::Num(weather.course),
                    FieldValue::Num(*value),
                );
                weather.course = *value;
                Ok(())
            }
            ReportDetails::Berth { .. } => Err(not_applicable()),
        },
    }
}

/// Records a change, skipping no-ops. When the same field is touched twice
/// the first old value is kept; a change that lands back on the original
/// value is dropped again.
fn push_change(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    old: FieldValue,
    new: FieldValue,
) {
    if let Some(index) = changes.iter().position(|c| c.field == field) {
        if changes[index].old == new {
            changes.remove(index);
        } else {
            changes[index].new = new;
        }
        return;
    }
    if old != new {
        changes.push(FieldChange { field, old, new });
    }
}

/// The ledger checks a recomputed report must pass. An unresolved average
/// speed (sailing time zero, distance nonzero) is not a violation.
fn validate_recomputed(report: &Report, voyage_distance: f64) -> Vec<CascadeViolation> {
    let mut violations = vec![];

    if let Some(speed) = report.avg_speed_voyage {
        if !(0.0..=30.0).contains(&speed) {
            violations.push(CascadeViolation::SpeedOutOfBounds {
                report_id: report.id.clone(),
                value: speed,
            });
        }
    }
    if report.total_distance_travelled < 0.0 {
        violations.push(CascadeViolation::NegativeDistance {
            report_id: report.id.clone(),
            value: report.total_distance_travelled,
        });
    }
    let limit = voyage_distance * 1.1;
    if report.total_distance_travelled > limit {
        violations.push(CascadeViolation::DistanceExceedsVoyage {
            report_id: report.id.clone(),
            value: report.total_distance_travelled,
            limit,
        });
    }
    for fuel in FuelType::ALL {
        let rob = report.rob.get(fuel);
        if rob < 0.0 {
            violations.push(CascadeViolation::NegativeRob {
                report_id: report.id.clone(),
                fuel,
                value: rob,
            });
        }
    }
    violations
}
