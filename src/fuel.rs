//! Fuel types, per-fuel quantity maps and per-report bunker inputs

/// The five fuel grades tracked on board.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    #[n(0)]
    Lsifo,
    #[n(1)]
    Lsmgo,
    #[n(2)]
    CylOil,
    #[n(3)]
    MeOil,
    #[n(4)]
    AeOil,
}

impl FuelType {
    pub const ALL: [FuelType; 5] = [
        FuelType::Lsifo,
        FuelType::Lsmgo,
        FuelType::CylOil,
        FuelType::MeOil,
        FuelType::AeOil,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FuelType::Lsifo => "lsifo",
            FuelType::Lsmgo => "lsmgo",
            FuelType::CylOil => "cylOil",
            FuelType::MeOil => "meOil",
            FuelType::AeOil => "aeOil",
        }
    }
}

/// Which machinery burned the fuel. Boiler and auxiliary figures exist only
/// for lsifo and lsmgo; the lube oils are consumed by the main engine alone.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumer {
    #[n(0)]
    MainEngine,
    #[n(1)]
    Boiler,
    #[n(2)]
    Auxiliary,
}

/// One quantity per fuel grade, in metric tons. Used for ROB balances,
/// supplies, and cascade deltas alike.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelLevels {
    #[n(0)]
    pub lsifo: f64,
    #[n(1)]
    pub lsmgo: f64,
    #[n(2)]
    pub cyl_oil: f64,
    #[n(3)]
    pub me_oil: f64,
    #[n(4)]
    pub ae_oil: f64,
}

impl FuelLevels {
    pub fn get(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Lsifo => self.lsifo,
            FuelType::Lsmgo => self.lsmgo,
            FuelType::CylOil => self.cyl_oil,
            FuelType::MeOil => self.me_oil,
            FuelType::AeOil => self.ae_oil,
        }
    }

    pub fn set(&mut self, fuel: FuelType, value: f64) {
        match fuel {
            FuelType::Lsifo => self.lsifo = value,
            FuelType::Lsmgo => self.lsmgo = value,
            FuelType::CylOil => self.cyl_oil = value,
            FuelType::MeOil => self.me_oil = value,
            FuelType::AeOil => self.ae_oil = value,
        }
    }

    /// True when every fuel entry is exactly zero. Cascades use this to skip
    /// the bunker track entirely.
    pub fn is_zero(&self) -> bool {
        FuelType::ALL.iter().all(|f| self.get(*f) == 0.0)
    }
}

/// The raw consumption and supply figures reported for one report period.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, PartialEq)]
pub struct BunkerInput {
    #[n(0)]
    pub me_lsifo: f64,
    #[n(1)]
    pub boiler_lsifo: f64,
    #[n(2)]
    pub aux_lsifo: f64,
    #[n(3)]
    pub me_lsmgo: f64,
    #[n(4)]
    pub boiler_lsmgo: f64,
    #[n(5)]
    pub aux_lsmgo: f64,
    #[n(6)]
    pub me_cyl_oil: f64,
    #[n(7)]
    pub me_me_oil: f64,
    #[n(8)]
    pub me_ae_oil: f64,
    #[n(9)]
    pub supply: FuelLevels,
}

impl BunkerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consumption(&self, fuel: FuelType, consumer: Consumer) -> Option<f64> {
        match (fuel, consumer) {
            (FuelType::Lsifo, Consumer::MainEngine) => Some(self.me_lsifo),
            (FuelType::Lsifo, Consumer::Boiler) => Some(self.boiler_lsifo),
            (FuelType::Lsifo, Consumer::Auxiliary) => Some(self.aux_lsifo),
            (FuelType::Lsmgo, Consumer::MainEngine) => Some(self.me_lsmgo),
            (FuelType::Lsmgo, Consumer::Boiler) => Some(self.boiler_lsmgo),
            (FuelType::Lsmgo, Consumer::Auxiliary) => Some(self.aux_lsmgo),
            (FuelType::CylOil, Consumer::MainEngine) => Some(self.me_cyl_oil),
            (FuelType::MeOil, Consumer::MainEngine) => Some(self.me_me_oil),
            (FuelType::AeOil, Consumer::MainEngine) => Some(self.me_ae_oil),
            // The lube oils carry no boiler or auxiliary figure.
            (_, Consumer::Boiler | Consumer::Auxiliary) => None,
        }
    }

    /// Returns false when the (fuel, consumer) pair is not tracked.
    pub fn set_consumption(&mut self, fuel: FuelType, consumer: Consumer, value: f64) -> bool {
        let slot = match (fuel, consumer) {
            (FuelType::Lsifo, Consumer::MainEngine) => &mut self.me_lsifo,
            (FuelType::Lsifo, Consumer::Boiler) => &mut self.boiler_lsifo,
            (FuelType::Lsifo, Consumer::Auxiliary) => &mut self.aux_lsifo,
            (FuelType::Lsmgo, Consumer::MainEngine) => &mut self.me_lsmgo,
            (FuelType::Lsmgo, Consumer::Boiler) => &mut self.boiler_lsmgo,
            (FuelType::Lsmgo, Consumer::Auxiliary) => &mut self.aux_lsmgo,
            (FuelType::CylOil, Consumer::MainEngine) => &mut self.me_cyl_oil,
            (FuelType::MeOil, Consumer::MainEngine) => &mut self.me_me_oil,
            (FuelType::AeOil, Consumer::MainEngine) => &mut self.me_ae_oil,
            (_, Consumer::Boiler | Consumer::Auxiliary) => return false,
        };
        *slot = value;
        true
    }

    pub fn set_supply(mut self, fuel: FuelType, value: f64) -> Self {
        self.supply.set(fuel, value);
        self
    }

    pub fn set_me(mut self, fuel: FuelType, value: f64) -> Self {
        self.set_consumption(fuel, Consumer::MainEngine, value);
        self
    }

    pub fn set_boiler(mut self, fuel: FuelType, value: f64) -> Self {
        self.set_consumption(fuel, Consumer::Boiler, value);
        self
    }

    pub fn set_aux(mut self, fuel: FuelType, value: f64) -> Self {
        self.set_consumption(fuel, Consumer::Auxiliary, value);
        self
    }
}
