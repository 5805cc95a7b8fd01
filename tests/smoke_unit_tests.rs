//! Smoke unit tests for the voyage ledger components
//!
//! These are unit tests that span the codebase, testing behavior in
//! isolation from integration scenarios. The cascade tests drive the pure
//! calculator directly with hand-built report chains, no store involved.
use voyage_ledger::{
    cascade::{
        self, CascadeCategory, CascadeInput, FieldModification, FieldValue,
    },
    error::CascadeViolation,
    fuel::{BunkerInput, Consumer, FuelLevels, FuelType},
    ledger,
    report::{
        CargoStatus, Machinery, Passage, Report, ReportDetails, ReportStatus, TimeStamp, Weather,
    },
    voyage::Voyage,
};

fn sea_weather() -> Weather {
    Weather {
        wind_force: 4.0,
        sea_state: 3.0,
        swell_height: 2.0,
        course: 180.0,
        speed: 12.0,
    }
}

fn rob(lsifo: f64) -> FuelLevels {
    FuelLevels {
        lsifo,
        lsmgo: 100.0,
        cyl_oil: 20.0,
        me_oil: 15.0,
        ae_oil: 10.0,
    }
}

fn approved_report(
    id: &str,
    seq: u64,
    details: ReportDetails,
    rob: FuelLevels,
    total_distance: f64,
    voyage_distance: f64,
    sailing_time: f64,
) -> Report {
    Report {
        id: id.into(),
        voyage_id: "voy_test".into(),
        status: ReportStatus::Approved,
        seq: Some(seq),
        reported_at: TimeStamp::new(),
        bunkers: BunkerInput::new(),
        rob,
        total_distance_travelled: total_distance,
        distance_to_go: ledger::distance_to_go(voyage_distance, total_distance),
        avg_speed_voyage: ledger::avg_speed(total_distance, sailing_time),
        sailing_time_voyage: sailing_time,
        details,
    }
}

fn departure(id: &str, seq: u64, harbour: f64, rob_lsifo: f64, voyage_distance: f64) -> Report {
    approved_report(
        id,
        seq,
        ReportDetails::Departure {
            harbour_distance: harbour,
            weather: sea_weather(),
            machinery: Machinery::nominal(),
        },
        rob(rob_lsifo),
        harbour,
        voyage_distance,
        1.0,
    )
}

fn noon(
    id: &str,
    seq: u64,
    distance: f64,
    total: f64,
    rob_lsifo: f64,
    voyage_distance: f64,
    sailing_time: f64,
) -> Report {
    approved_report(
        id,
        seq,
        ReportDetails::Noon {
            distance_since_last_report: distance,
            passage: Passage::Noon,
            weather: sea_weather(),
            machinery: Machinery::nominal(),
        },
        rob(rob_lsifo),
        total,
        voyage_distance,
        sailing_time,
    )
}

fn test_voyage(voyage_distance: f64) -> Voyage {
    let mut voyage = Voyage::new("voy_test".into(), "vsl_test".into(), voyage_distance);
    voyage.next_seq = 10;
    voyage
}

mod category_tests {
    use super::*;

    #[test]
    fn distance_fields_map_to_distance() {
        assert_eq!(
            FieldModification::HarbourDistance(1.0).category(),
            Some(CascadeCategory::Distance)
        );
        assert_eq!(
            FieldModification::DistanceSinceLastReport(1.0).category(),
            Some(CascadeCategory::Distance)
        );
        assert_eq!(
            FieldModification::VoyageDistance(1.0).category(),
            Some(CascadeCategory::Distance)
        );
        assert_eq!(
            FieldModification::TotalDistanceTravelled(1.0).category(),
            Some(CascadeCategory::Distance)
        );
    }

    #[test]
    fn bunker_fields_split_consumption_and_supply() {
        assert_eq!(
            FieldModification::Consumption(FuelType::Lsifo, Consumer::Boiler, 1.0).category(),
            Some(CascadeCategory::BunkerConsumption)
        );
        assert_eq!(
            FieldModification::Supply(FuelType::AeOil, 1.0).category(),
            Some(CascadeCategory::BunkerSupply)
        );
    }

    #[test]
    fn cargo_fields_map_to_cargo() {
        assert_eq!(
            FieldModification::CargoLoaded(1.0).category(),
            Some(CascadeCategory::Cargo)
        );
        assert_eq!(
            FieldModification::CargoStatus(CargoStatus::Empty).category(),
            Some(CascadeCategory::Cargo)
        );
        assert_eq!(
            FieldModification::CargoType("coal".into()).category(),
            Some(CascadeCategory::Cargo)
        );
    }

    #[test]
    fn weather_and_passage_never_cascade() {
        assert_eq!(FieldModification::WindForce(6.0).category(), None);
        assert_eq!(FieldModification::Course(90.0).category(), None);
        assert_eq!(FieldModification::Passage(Passage::Noon).category(), None);
    }
}

mod cascade_tests {
    use super::*;

    #[test]
    fn non_cascading_edit_touches_only_the_source() {
        let voyage = test_voyage(1_000.0);
        let source = departure("rpt_dep", 0, 10.0, 490.0, 1_000.0);
        let later = [noon("rpt_noon", 1, 120.0, 130.0, 470.0, 1_000.0, 11.0)];

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &later,
            },
            &[FieldModification::WindForce(8.0)],
        )
        .unwrap();

        assert!(result.is_valid);
        assert_eq!(result.affected.len(), 1);
        assert!(result.affected[0]
            .changes
            .iter()
            .any(|c| c.field == "windForce" && c.new == FieldValue::Num(8.0)));
    }

    #[test]
    fn wrong_report_type_is_rejected_before_computation() {
        let voyage = test_voyage(1_000.0);
        let source = noon("rpt_noon", 1, 120.0, 130.0, 470.0, 1_000.0, 11.0);

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &[],
            },
            &[FieldModification::HarbourDistance(15.0)],
        );
        assert!(result.is_err());

        // Boiler figures do not exist for lube oils.
        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &[],
            },
            &[FieldModification::Consumption(
                FuelType::CylOil,
                Consumer::Boiler,
                1.0,
            )],
        );
        assert!(result.is_err());
    }

    #[test]
    fn voyage_distance_edit_recomputes_distance_to_go_everywhere() {
        let voyage = test_voyage(1_000.0);
        let source = departure("rpt_dep", 0, 10.0, 490.0, 1_000.0);
        let later = [noon("rpt_noon", 1, 120.0, 130.0, 470.0, 1_000.0, 11.0)];

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &later,
            },
            &[FieldModification::VoyageDistance(900.0)],
        )
        .unwrap();

        assert!(result.is_valid);
        assert_eq!(result.voyage_distance, 900.0);
        assert_eq!(result.source().state.distance_to_go, 890.0);
        let ripple = &result.affected[1];
        assert_eq!(ripple.report_id, "rpt_noon");
        // Distance travelled itself is unchanged; only the remaining
        // distance moved.
        assert_eq!(ripple.state.total_distance_travelled, 130.0);
        assert_eq!(ripple.state.distance_to_go, 770.0);

        // Editable through the departure row only.
        let via_noon = cascade::run(
            &CascadeInput {
                source: &later[0],
                predecessor: Some(&source),
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &[],
            },
            &[FieldModification::VoyageDistance(900.0)],
        );
        assert!(via_noon.is_err());
    }

    #[test]
    fn supply_edit_raises_rob_downstream() {
        let voyage = test_voyage(1_000.0);
        let mut source = departure("rpt_dep", 0, 10.0, 490.0, 1_000.0);
        source.bunkers = BunkerInput::new().set_me(FuelType::Lsifo, 10.0);
        source.rob.lsifo = 490.0;
        let later = [
            noon("rpt_n1", 1, 120.0, 130.0, 470.0, 1_000.0, 11.0),
            noon("rpt_n2", 2, 110.0, 240.0, 450.0, 1_000.0, 22.0),
        ];

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &later,
            },
            &[FieldModification::Supply(FuelType::Lsifo, 40.0)],
        )
        .unwrap();

        assert!(result.is_valid);
        // 500 - 10 + 40 = 530 on the source, +40 on every later report.
        assert_eq!(result.source().state.rob.lsifo, 530.0);
        assert_eq!(result.affected[1].state.rob.lsifo, 510.0);
        assert_eq!(result.affected[2].state.rob.lsifo, 490.0);
        // The other fuels never moved and are absent from the diff.
        assert!(result.affected[1]
            .changes
            .iter()
            .all(|c| c.field != "currentRobLsmgo"));
    }

    #[test]
    fn total_distance_override_wins_over_recomputation() {
        let voyage = test_voyage(1_000.0);
        let source = departure("rpt_dep", 0, 10.0, 490.0, 1_000.0);

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &[],
            },
            &[FieldModification::TotalDistanceTravelled(25.0)],
        )
        .unwrap();

        assert_eq!(result.source().state.total_distance_travelled, 25.0);
        assert_eq!(result.source().state.distance_to_go, 975.0);
    }

    #[test]
    fn excessive_distance_is_a_collected_violation() {
        let voyage = test_voyage(200.0);
        let source = departure("rpt_dep", 0, 10.0, 490.0, 200.0);
        let later = [noon("rpt_noon", 1, 120.0, 130.0, 470.0, 200.0, 11.0)];

        // 10 -> 150 pushes the noon report to 270, past 200 * 1.1.
        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &later,
            },
            &[FieldModification::HarbourDistance(150.0)],
        )
        .unwrap();

        assert!(!result.is_valid);
        assert!(result.violations.iter().any(|v| matches!(
            v,
            CascadeViolation::DistanceExceedsVoyage { report_id, .. } if report_id == "rpt_noon"
        )));
        // The fold still produced the full recomputed state.
        assert_eq!(result.affected[1].state.total_distance_travelled, 270.0);
    }

    #[test]
    fn speed_out_of_bounds_is_a_collected_violation() {
        let voyage = test_voyage(10_000.0);
        let source = departure("rpt_dep", 0, 10.0, 490.0, 10_000.0);
        // 1 hour of sailing time: +400 distance means 530 kn.
        let later = [noon("rpt_noon", 1, 120.0, 130.0, 470.0, 10_000.0, 1.0)];

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &later,
            },
            &[FieldModification::HarbourDistance(410.0)],
        )
        .unwrap();

        assert!(!result.is_valid);
        assert!(result.violations.iter().any(|v| matches!(
            v,
            CascadeViolation::SpeedOutOfBounds { report_id, .. } if report_id == "rpt_noon"
        )));
    }

    #[test]
    fn edit_landing_on_the_original_value_changes_nothing_downstream() {
        let voyage = test_voyage(1_000.0);
        let source = departure("rpt_dep", 0, 10.0, 490.0, 1_000.0);
        let later = [noon("rpt_noon", 1, 120.0, 130.0, 470.0, 1_000.0, 11.0)];

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor: None,
                initial_rob: &rob(500.0),
                voyage: &voyage,
                later: &later,
            },
            &[FieldModification::HarbourDistance(10.0)],
        )
        .unwrap();

        assert!(result.is_valid);
        // Zero delta: only the source row appears, and with no changes.
        assert_eq!(result.affected.len(), 1);
        assert!(result.affected[0].changes.is_empty());
    }
}

mod ledger_tests {
    use super::*;

    #[test]
    fn conservation_against_predecessor() {
        let previous = rob(500.0);
        let bunkers = BunkerInput::new()
            .set_me(FuelType::Lsifo, 12.0)
            .set_boiler(FuelType::Lsifo, 1.5)
            .set_aux(FuelType::Lsifo, 0.5)
            .set_supply(FuelType::Lsifo, 100.0);

        let rob = ledger::next_rob(&previous, &bunkers);
        assert_eq!(rob.lsifo, 500.0 - 14.0 + 100.0);
        // Untouched fuels carry straight through.
        assert_eq!(rob.lsmgo, previous.lsmgo);
    }

    #[test]
    fn departure_distance_comes_from_harbour() {
        let figures = ledger::distance_figures(0.0, 10.0, 1_000.0, 1.0);
        assert_eq!(figures.total_distance_travelled, 10.0);
        assert_eq!(figures.distance_to_go, 990.0);
        assert_eq!(figures.avg_speed_voyage, Some(10.0));
    }

    #[test]
    fn unresolved_speed_when_sailing_time_missing() {
        let figures = ledger::distance_figures(100.0, 50.0, 1_000.0, 0.0);
        assert_eq!(figures.avg_speed_voyage, None);
    }
}
