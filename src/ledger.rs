//! Pure ledger arithmetic: consumption totals, ROB balances, distance and
//! cargo running figures. No state, no I/O; the validator and cascade both
//! build on these.
use crate::fuel::{BunkerInput, FuelLevels, FuelType};
use crate::report::CargoStatus;

/// Total consumption per fuel for one report period. lsifo and lsmgo burn in
/// the main engine, boiler and auxiliaries; the lube oils burn in the main
/// engine only.
pub fn total_consumption(bunkers: &BunkerInput) -> FuelLevels {
    FuelLevels {
        lsifo: bunkers.me_lsifo + bunkers.boiler_lsifo + bunkers.aux_lsifo,
        lsmgo: bunkers.me_lsmgo + bunkers.boiler_lsmgo + bunkers.aux_lsmgo,
        cyl_oil: bunkers.me_cyl_oil,
        me_oil: bunkers.me_me_oil,
        ae_oil: bunkers.me_ae_oil,
    }
}

/// ROB after one report period: previous ROB minus total consumption plus
/// supply, floored at zero per fuel. First-computation clamps rather than
/// errors; the cascade re-validation is what treats a negative balance as a
/// ledger violation.
pub fn next_rob(previous: &FuelLevels, bunkers: &BunkerInput) -> FuelLevels {
    let consumed = total_consumption(bunkers);
    let mut rob = FuelLevels::default();
    for fuel in FuelType::ALL {
        let balance = previous.get(fuel) - consumed.get(fuel) + bunkers.supply.get(fuel);
        rob.set(fuel, balance.max(0.0));
    }
    rob
}

/// Average voyage speed in knots. Unresolved (None) when sailing time is
/// zero but distance is not.
pub fn avg_speed(total_distance: f64, sailing_time: f64) -> Option<f64> {
    if sailing_time > 0.0 {
        Some(total_distance / sailing_time)
    } else if total_distance == 0.0 {
        Some(0.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceFigures {
    pub total_distance_travelled: f64,
    pub distance_to_go: f64,
    pub avg_speed_voyage: Option<f64>,
}

/// Distance running figures for one report. A departure report has no
/// predecessor in the voyage; pass its harbour distance as
/// `distance_since_last` against a zero previous total.
pub fn distance_figures(
    previous_total: f64,
    distance_since_last: f64,
    voyage_distance: f64,
    sailing_time: f64,
) -> DistanceFigures {
    let total = previous_total + distance_since_last;
    DistanceFigures {
        total_distance_travelled: total,
        distance_to_go: (voyage_distance - total).max(0.0),
        avg_speed_voyage: avg_speed(total, sailing_time),
    }
}

pub fn distance_to_go(voyage_distance: f64, total_distance: f64) -> f64 {
    (voyage_distance - total_distance).max(0.0)
}

/// Cargo balance of a berth report from its predecessor's quantity and this
/// report's own load/discharge figures.
pub fn cargo_balance(previous_quantity: f64, loaded: f64, unloaded: f64) -> (f64, CargoStatus) {
    let quantity = previous_quantity + loaded - unloaded;
    (quantity, cargo_status(quantity))
}

pub fn cargo_status(quantity: f64) -> CargoStatus {
    if quantity > 0.0 {
        CargoStatus::Loaded
    } else {
        CargoStatus::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::Consumer;

    #[test]
    fn lube_oils_ignore_boiler_and_aux() {
        let bunkers = BunkerInput::new()
            .set_me(FuelType::CylOil, 0.4)
            .set_me(FuelType::Lsifo, 10.0)
            .set_boiler(FuelType::Lsifo, 2.0)
            .set_aux(FuelType::Lsifo, 1.5);

        let consumed = total_consumption(&bunkers);
        assert_eq!(consumed.lsifo, 13.5);
        assert_eq!(consumed.cyl_oil, 0.4);
        assert_eq!(bunkers.consumption(FuelType::CylOil, Consumer::Boiler), None);
    }

    #[test]
    fn rob_is_floored_at_zero() {
        let previous = FuelLevels {
            lsifo: 5.0,
            ..Default::default()
        };
        let bunkers = BunkerInput::new().set_me(FuelType::Lsifo, 8.0);

        let rob = next_rob(&previous, &bunkers);
        assert_eq!(rob.lsifo, 0.0);
    }

    #[test]
    fn supply_raises_rob() {
        let previous = FuelLevels {
            lsmgo: 40.0,
            ..Default::default()
        };
        let bunkers = BunkerInput::new()
            .set_me(FuelType::Lsmgo, 3.0)
            .set_supply(FuelType::Lsmgo, 25.0);

        let rob = next_rob(&previous, &bunkers);
        assert_eq!(rob.lsmgo, 62.0);
    }

    #[test]
    fn avg_speed_branches() {
        assert_eq!(avg_speed(120.0, 10.0), Some(12.0));
        assert_eq!(avg_speed(0.0, 0.0), Some(0.0));
        assert_eq!(avg_speed(120.0, 0.0), None);
    }

    #[test]
    fn distance_to_go_never_negative() {
        let figures = distance_figures(950.0, 100.0, 1000.0, 84.0);
        assert_eq!(figures.total_distance_travelled, 1050.0);
        assert_eq!(figures.distance_to_go, 0.0);
    }

    #[test]
    fn cargo_balance_and_status() {
        let (quantity, status) = cargo_balance(100.0, 0.0, 100.0);
        assert_eq!(quantity, 0.0);
        assert_eq!(status, CargoStatus::Empty);

        let (quantity, status) = cargo_balance(0.0, 5_000.0, 0.0);
        assert_eq!(quantity, 5_000.0);
        assert_eq!(status, CargoStatus::Loaded);
    }
}
