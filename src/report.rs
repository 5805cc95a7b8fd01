//! Core report types: the voyage timeline row and its per-type details
use crate::fuel::{BunkerInput, FuelLevels};
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct TimeStamp<T: TimeZone>(DateTime<T>);

impl TimeStamp<Utc> {
    pub fn new() -> Self {
        Self(Utc::now())
    }
    pub fn new_with(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .unwrap()
            .into()
    }
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for TimeStamp<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeZone> From<DateTime<T>> for TimeStamp<T> {
    fn from(value: DateTime<T>) -> Self {
        TimeStamp(value)
    }
}

impl<C> minicbor::Encode<C> for TimeStamp<Utc> {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        if let Some(nsec) = self.0.timestamp_nanos_opt() {
            return e.i64(nsec)?.ok();
        }

        Err(minicbor::encode::Error::message(
            "failed to encode timestamp. timestamp_nanos_opt returned None",
        ))
    }
}

impl<'b, C> minicbor::Decode<'b, C> for TimeStamp<Utc> {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let nsecs = d.i64()?;

        Ok(TimeStamp(DateTime::from_timestamp_nanos(nsecs)))
    }
}

/// Lifecycle of a report row. A report is created `Pending`, may be edited in
/// place while `Pending` or `ChangesRequested`, and once `Approved` can only
/// change through the cascade-edit path.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    #[n(0)]
    Pending,
    #[n(1)]
    Approved,
    #[n(2)]
    Rejected,
    #[n(3)]
    ChangesRequested,
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    #[n(0)]
    Departure,
    #[n(1)]
    Noon,
    #[n(2)]
    Arrival,
    #[n(3)]
    ArrivalAnchorNoon,
    #[n(4)]
    Berth,
}

impl ReportType {
    pub fn label(self) -> &'static str {
        match self {
            ReportType::Departure => "departure",
            ReportType::Noon => "noon",
            ReportType::Arrival => "arrival",
            ReportType::ArrivalAnchorNoon => "arrival_anchor_noon",
            ReportType::Berth => "berth",
        }
    }
}

/// Bare passage-state discriminant, used by the sequence validator and the
/// cascade passage-consistency rule.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageState {
    #[n(0)]
    Noon,
    #[n(1)]
    Sosp,
    #[n(2)]
    Rosp,
}

impl PassageState {
    pub fn label(self) -> &'static str {
        match self {
            PassageState::Noon => "NOON",
            PassageState::Sosp => "SOSP",
            PassageState::Rosp => "ROSP",
        }
    }
}

/// Noon-report passage sub-state. Position and time fields exist only on the
/// stoppage/resumption variants that need them.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub enum Passage {
    #[n(0)]
    Noon,
    #[n(1)]
    Sosp {
        #[n(0)]
        position: String,
        #[n(1)]
        since: TimeStamp<Utc>,
    },
    #[n(2)]
    Rosp {
        #[n(0)]
        position: String,
        #[n(1)]
        since: TimeStamp<Utc>,
    },
}

impl Passage {
    pub fn state(&self) -> PassageState {
        match self {
            Passage::Noon => PassageState::Noon,
            Passage::Sosp { .. } => PassageState::Sosp,
            Passage::Rosp { .. } => PassageState::Rosp,
        }
    }
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CargoStatus {
    #[n(0)]
    Loaded,
    #[n(1)]
    Empty,
}

impl CargoStatus {
    pub fn label(self) -> &'static str {
        match self {
            CargoStatus::Loaded => "Loaded",
            CargoStatus::Empty => "Empty",
        }
    }
}

/// Observations reported by the bridge. Range-checked at submission.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, PartialEq)]
pub struct Weather {
    #[n(0)]
    pub wind_force: f64, // Beaufort, 0..=12
    #[n(1)]
    pub sea_state: f64, // 0..=9
    #[n(2)]
    pub swell_height: f64, // 0..=9
    #[n(3)]
    pub course: f64, // degrees, 0..=360
    #[n(4)]
    pub speed: f64, // knots, >= 0
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub struct EngineUnit {
    #[n(0)]
    pub unit: u8,
    #[n(1)]
    pub exhaust_temp: f64,
    #[n(2)]
    pub under_piston_air: f64,
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub struct AuxEngine {
    #[n(0)]
    pub name: String,
    #[n(1)]
    pub load: f64,
}

/// Engine-room readings. Sea reports must cover main-engine units 1..=6 and
/// at least generator DG1; berth reports carry no machinery block at all.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, PartialEq)]
pub struct Machinery {
    #[n(0)]
    pub units: Vec<EngineUnit>,
    #[n(1)]
    pub aux_engines: Vec<AuxEngine>,
}

impl Machinery {
    /// A complete set of nominal readings, units 1..=6 plus DG1.
    pub fn nominal() -> Self {
        Self {
            units: (1..=6)
                .map(|unit| EngineUnit {
                    unit,
                    exhaust_temp: 350.0,
                    under_piston_air: 2.1,
                })
                .collect(),
            aux_engines: vec![AuxEngine {
                name: "DG1".into(),
                load: 60.0,
            }],
        }
    }
}

/// The per-type half of a report. Only the fields relevant to each report
/// type exist on its variant.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub enum ReportDetails {
    #[n(0)]
    Departure {
        #[n(0)]
        harbour_distance: f64,
        #[n(1)]
        weather: Weather,
        #[n(2)]
        machinery: Machinery,
    },
    #[n(1)]
    Noon {
        #[n(0)]
        distance_since_last_report: f64,
        #[n(1)]
        passage: Passage,
        #[n(2)]
        weather: Weather,
        #[n(3)]
        machinery: Machinery,
    },
    #[n(2)]
    Arrival {
        #[n(0)]
        distance_since_last_report: f64,
        #[n(1)]
        weather: Weather,
        #[n(2)]
        machinery: Machinery,
    },
    #[n(3)]
    ArrivalAnchorNoon {
        #[n(0)]
        distance_since_last_report: f64,
        #[n(1)]
        weather: Weather,
        #[n(2)]
        machinery: Machinery,
    },
    #[n(4)]
    Berth {
        #[n(0)]
        cargo_loaded: f64,
        #[n(1)]
        cargo_unloaded: f64,
        #[n(2)]
        cargo_quantity: f64,
        #[n(3)]
        cargo_status: CargoStatus,
        #[n(4)]
        cargo_type: String,
    },
}

impl ReportDetails {
    pub fn report_type(&self) -> ReportType {
        match self {
            ReportDetails::Departure { .. } => ReportType::Departure,
            ReportDetails::Noon { .. } => ReportType::Noon,
            ReportDetails::Arrival { .. } => ReportType::Arrival,
            ReportDetails::ArrivalAnchorNoon { .. } => ReportType::ArrivalAnchorNoon,
            ReportDetails::Berth { .. } => ReportType::Berth,
        }
    }
}

/// One row in the voyage timeline.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub struct Report {
    #[n(0)]
    pub id: String, // uuid7, bech32 encoded with "rpt_"
    #[n(1)]
    pub voyage_id: String,
    #[n(2)]
    pub status: ReportStatus,
    /// Monotonic position in the approved chain, assigned at approval time.
    /// The reported_at timestamp is display-only and never orders the chain.
    #[n(3)]
    pub seq: Option<u64>,
    #[n(4)]
    pub reported_at: TimeStamp<Utc>,
    #[n(5)]
    pub bunkers: BunkerInput,
    #[n(6)]
    pub rob: FuelLevels,
    #[n(7)]
    pub total_distance_travelled: f64,
    #[n(8)]
    pub distance_to_go: f64,
    /// None when sailing time is zero but distance is not; the average is
    /// left unresolved rather than carrying a stale figure.
    #[n(9)]
    pub avg_speed_voyage: Option<f64>,
    #[n(10)]
    pub sailing_time_voyage: f64, // hours
    #[n(11)]
    pub details: ReportDetails,
}

impl Report {
    pub fn report_type(&self) -> ReportType {
        self.details.report_type()
    }

    /// Distance logged since the previous report. Departure and berth rows
    /// contribute nothing here; departure distance enters through
    /// harbour_distance instead.
    pub fn distance_since_last(&self) -> f64 {
        match &self.details {
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
            } => *distance_since_last_report,
            ReportDetails::Departure { .. } | ReportDetails::Berth { .. } => 0.0,
        }
    }

    pub fn passage_state(&self) -> Option<PassageState> {
        match &self.details {
            ReportDetails::Noon { passage, .. } => Some(passage.state()),
            _ => None,
        }
    }

    pub fn cargo_quantity(&self) -> Option<f64> {
        match &self.details {
            ReportDetails::Berth { cargo_quantity, .. } => Some(*cargo_quantity),
            _ => None,
        }
    }
}

/// Builder used when submitting a new report. The derived ledger fields
/// (ROB, distance totals, cargo balance) are computed by the service, not
/// supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub voyage_id: String,
    pub reported_at: TimeStamp<Utc>,
    pub bunkers: BunkerInput,
    pub sailing_time_voyage: f64,
    pub details: ReportDetails,
}

impl ReportDraft {
    pub fn new(voyage_id: impl Into<String>, details: ReportDetails) -> Self {
        Self {
            voyage_id: voyage_id.into(),
            reported_at: TimeStamp::new(),
            bunkers: BunkerInput::new(),
            sailing_time_voyage: 0.0,
            details,
        }
    }
    pub fn set_reported_at(mut self, at: TimeStamp<Utc>) -> Self {
        self.reported_at = at;
        self
    }
    pub fn set_bunkers(mut self, bunkers: BunkerInput) -> Self {
        self.bunkers = bunkers;
        self
    }
    pub fn set_sailing_time(mut self, hours: f64) -> Self {
        self.sailing_time_voyage = hours;
        self
    }
}
