//! Voyage and vessel records
use crate::fuel::FuelLevels;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoyageStatus {
    #[n(0)]
    Active,
    #[n(1)]
    Completed,
}

/// Groups the ordered chain of reports for one vessel and holds the
/// authoritative voyage distance.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub struct Voyage {
    #[n(0)]
    pub id: String, // uuid7, bech32 encoded with "voy_"
    #[n(1)]
    pub vessel_id: String,
    #[n(2)]
    pub voyage_distance: f64, // nautical miles
    #[n(3)]
    pub status: VoyageStatus,
    /// Report ids in submission order, every status included.
    #[n(4)]
    pub report_ids: Vec<String>,
    /// Next approval sequence number to hand out.
    #[n(5)]
    pub next_seq: u64,
}

impl Voyage {
    pub fn new(id: String, vessel_id: String, voyage_distance: f64) -> Self {
        Self {
            id,
            vessel_id,
            voyage_distance,
            status: VoyageStatus::Active,
            report_ids: vec![],
            next_seq: 0,
        }
    }
}

/// Owns the ROB in effect before the voyage's first departure report.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub struct Vessel {
    #[n(0)]
    pub id: String, // uuid7, bech32 encoded with "vsl_"
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub initial_rob: FuelLevels,
}
