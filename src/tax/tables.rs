//! Published rate tables (Law 239/2025).
//!
//! All amounts are lei. Vehicle rates are per 200 cm³ of engine capacity,
//! building rates per m², land rates per hectare.

use crate::core::{Rank, ZoneRankTable};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Which vehicles a rate row applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Cars up to 1600 cm³, also motorcycles up to 1600 cm³
    CarOrSmallMotorcycle,
    LargeMotorcycle,
    Car,
    Bus,
    Other,
}

impl RowKind {
    /// Rows taking part in the car bracket scan
    pub fn is_car_bracket(self) -> bool {
        matches!(self, RowKind::CarOrSmallMotorcycle | RowKind::Car)
    }
}

/// One row of the vehicle rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleRate {
    pub name: &'static str,
    pub kind: RowKind,
    pub capacity_min: Decimal,
    pub capacity_max: Decimal,
    pub euro0_3: Decimal,
    pub euro4: Decimal,
    pub euro5: Decimal,
    pub euro6: Decimal,
    pub hybrid_over_50: Decimal,
}

impl VehicleRate {
    /// Closed interval containment
    pub fn contains(&self, capacity: Decimal) -> bool {
        self.capacity_min <= capacity && capacity <= self.capacity_max
    }
}

pub static VEHICLE_RATES: [VehicleRate; 8] = [
    VehicleRate {
        name: "car_motorcycle_small",
        kind: RowKind::CarOrSmallMotorcycle,
        capacity_min: dec!(0),
        capacity_max: dec!(1600),
        euro0_3: dec!(19.5),
        euro4: dec!(18.8),
        euro5: dec!(17.6),
        euro6: dec!(16.5),
        hybrid_over_50: dec!(16.2),
    },
    // The published interval is empty (max < min). Motorcycles reach this row
    // through an explicit capacity branch, never through `contains`.
    VehicleRate {
        name: "motorcycle_large",
        kind: RowKind::LargeMotorcycle,
        capacity_min: dec!(1601),
        capacity_max: dec!(1600),
        euro0_3: dec!(22.1),
        euro4: dec!(21.3),
        euro5: dec!(19.9),
        euro6: dec!(18.7),
        hybrid_over_50: dec!(18.4),
    },
    VehicleRate {
        name: "car_1601_2000",
        kind: RowKind::Car,
        capacity_min: dec!(1601),
        capacity_max: dec!(2000),
        euro0_3: dec!(29.7),
        euro4: dec!(28.5),
        euro5: dec!(26.7),
        euro6: dec!(25.1),
        hybrid_over_50: dec!(24.6),
    },
    VehicleRate {
        name: "car_2001_2600",
        kind: RowKind::Car,
        capacity_min: dec!(2001),
        capacity_max: dec!(2600),
        euro0_3: dec!(92.2),
        euro4: dec!(88.6),
        euro5: dec!(82.8),
        euro6: dec!(77.8),
        hybrid_over_50: dec!(76.3),
    },
    VehicleRate {
        name: "car_2601_3000",
        kind: RowKind::Car,
        capacity_min: dec!(2601),
        capacity_max: dec!(3000),
        euro0_3: dec!(182.9),
        euro4: dec!(172.8),
        euro5: dec!(154.1),
        euro6: dec!(151.2),
        hybrid_over_50: dec!(149.8),
    },
    VehicleRate {
        name: "car_over_3001",
        kind: RowKind::Car,
        capacity_min: dec!(3001),
        capacity_max: dec!(999999),
        euro0_3: dec!(319.0),
        euro4: dec!(297.3),
        euro5: dec!(294.4),
        euro6: dec!(290.0),
        hybrid_over_50: dec!(275.5),
    },
    VehicleRate {
        name: "bus",
        kind: RowKind::Bus,
        capacity_min: dec!(0),
        capacity_max: dec!(999999),
        euro0_3: dec!(31.2),
        euro4: dec!(30.0),
        euro5: dec!(28.1),
        euro6: dec!(26.4),
        hybrid_over_50: dec!(25.9),
    },
    VehicleRate {
        name: "other_vehicle",
        kind: RowKind::Other,
        capacity_min: dec!(0),
        capacity_max: dec!(999999),
        euro0_3: dec!(39.0),
        euro4: dec!(37.5),
        euro5: dec!(35.1),
        euro6: dec!(33.0),
        hybrid_over_50: dec!(32.4),
    },
];

/// First row of the given kind
pub fn vehicle_row(kind: RowKind) -> Option<&'static VehicleRate> {
    VEHICLE_RATES.iter().find(|r| r.kind == kind)
}

/// First car bracket whose interval contains `capacity`
pub fn car_bracket(capacity: Decimal) -> Option<&'static VehicleRate> {
    VEHICLE_RATES
        .iter()
        .find(|r| r.kind.is_car_bracket() && r.contains(capacity))
}

/// Building rate row (lei/m²)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingRate {
    pub name: &'static str,
    pub with_utilities: Decimal,
    pub without_utilities: Decimal,
}

/// Indexed by building type A..D
pub static BUILDING_RATES: [BuildingRate; 4] = [
    BuildingRate {
        name: "Clădire cu cadre din beton armat sau cu pereți exteriori din cărămidă arsă sau din materiale tratate termic/ chimic",
        with_utilities: dec!(2677),
        without_utilities: dec!(1606),
    },
    BuildingRate {
        name: "Clădire cu pereții exteriori din lemn, piatră naturală, cărămidă nearsă, vălătuci sau alte materiale netratate",
        with_utilities: dec!(803),
        without_utilities: dec!(535),
    },
    BuildingRate {
        name: "Clădire-anexă cu cadre din beton armat sau cu pereți exteriori din cărămidă arsă ori materiale tratate",
        with_utilities: dec!(535),
        without_utilities: dec!(469),
    },
    BuildingRate {
        name: "Clădire-anexă cu pereții exteriori din lemn, piatră naturală, cărămidă nearsă, vălătuci sau alte materiale netratate",
        with_utilities: dec!(335),
        without_utilities: dec!(201),
    },
];

/// Building coefficients by zone (rows) and rank (columns 0, I..V)
pub static CITY_COEFFICIENTS: ZoneRankTable<Decimal> = [
    [dec!(2.60), dec!(2.50), dec!(2.40), dec!(2.30), dec!(1.10), dec!(1.05)],
    [dec!(2.50), dec!(2.40), dec!(2.30), dec!(2.20), dec!(1.05), dec!(1.00)],
    [dec!(2.40), dec!(2.30), dec!(2.20), dec!(2.10), dec!(1.00), dec!(0.95)],
    [dec!(2.30), dec!(2.20), dec!(2.10), dec!(2.00), dec!(0.95), dec!(0.90)],
];

/// Published `{min, max}` band in lei/ha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl RateRange {
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        RateRange { min, max }
    }

    /// A scalar published value stands for `min = max`
    pub const fn flat(value: Decimal) -> Self {
        RateRange {
            min: value,
            max: value,
        }
    }

    pub fn midpoint(&self) -> Decimal {
        (self.min + self.max) / dec!(2)
    }
}

const fn range(min: Decimal, max: Decimal) -> RateRange {
    RateRange::new(min, max)
}

/// Intravilan land with construction, by zone and rank
pub static LAND_INTRAVILAN_CONSTRUCTION: ZoneRankTable<RateRange> = [
    [
        range(dec!(8282), dec!(20706)),
        range(dec!(6878), dec!(17194)),
        range(dec!(6042), dec!(15106)),
        range(dec!(5236), dec!(13090)),
        range(dec!(711), dec!(1788)),
        range(dec!(569), dec!(1422)),
    ],
    [
        range(dec!(6878), dec!(17194)),
        range(dec!(5199), dec!(12998)),
        range(dec!(4215), dec!(10538)),
        range(dec!(3558), dec!(8894)),
        range(dec!(569), dec!(1422)),
        range(dec!(427), dec!(1068)),
    ],
    [
        range(dec!(5199), dec!(12998)),
        range(dec!(3558), dec!(8894)),
        range(dec!(2668), dec!(6670)),
        range(dec!(1690), dec!(4226)),
        range(dec!(427), dec!(1068)),
        range(dec!(284), dec!(710)),
    ],
    [
        range(dec!(3558), dec!(8894)),
        range(dec!(1690), dec!(4226)),
        range(dec!(1410), dec!(3526)),
        range(dec!(984), dec!(2439)),
        range(dec!(278), dec!(696)),
        range(dec!(142), dec!(356)),
    ],
];

/// Intravilan land without construction over 400 m², by zone (rows) and
/// land use (columns in `LandUse::intravilan_column` order)
pub static LAND_INTRAVILAN_OTHER_BASE: [[Decimal; 10]; 4] = [
    [dec!(75), dec!(56), dec!(56), dec!(122), dec!(143), dec!(75), dec!(41), dec!(0), dec!(0), dec!(41)],
    [dec!(56), dec!(51), dec!(51), dec!(94), dec!(122), dec!(56), dec!(36), dec!(0), dec!(0), dec!(36)],
    [dec!(51), dec!(41), dec!(41), dec!(75), dec!(94), dec!(51), dec!(22), dec!(0), dec!(0), dec!(22)],
    [dec!(41), dec!(36), dec!(36), dec!(51), dec!(75), dec!(41), dec!(0), dec!(0), dec!(0), dec!(0)],
];

/// Correction coefficient by rank, shared by intravilan-other and extravilan
pub static LAND_RANK_CORRECTION: [Decimal; 6] = [
    dec!(8.0),
    dec!(5.0),
    dec!(4.0),
    dec!(3.0),
    dec!(1.1),
    dec!(1.0),
];

pub fn rank_correction(rank: Rank) -> Decimal {
    match rank {
        Rank::R0 => LAND_RANK_CORRECTION[0],
        Rank::I => LAND_RANK_CORRECTION[1],
        Rank::II => LAND_RANK_CORRECTION[2],
        Rank::III => LAND_RANK_CORRECTION[3],
        Rank::IV => LAND_RANK_CORRECTION[4],
        Rank::V => LAND_RANK_CORRECTION[5],
    }
}
