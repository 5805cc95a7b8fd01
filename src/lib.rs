//! Voyage report sequencing and bunker ledger cascade engine.
//!
//! A voyage is an ordered chain of operational reports (departure, noon,
//! arrival, arrival-at-anchor-noon, berth) whose running totals — fuel
//! remaining on board, distance travelled, cargo quantity — must stay
//! consistent across the whole chain. The engine validates which report may
//! follow which, derives each report's ledger figures from its predecessor,
//! and, when an approved historical report is edited, replays the resulting
//! deltas across every later approved report.

pub mod cascade;
pub mod error;
pub mod fuel;
pub mod ledger;
pub mod report;
pub mod service;
pub mod utils;
pub mod validate;
pub mod voyage;
