use crate::core::error::{checked_product, non_negative};
use crate::core::format::{fixed, plain};
use crate::core::{zone_rank_lookup, Rank, TaxError, TaxResult, Zone};
use crate::tax::tables::{
    self, RateRange, LAND_INTRAVILAN_CONSTRUCTION, LAND_INTRAVILAN_OTHER_BASE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Square metres in one hectare
pub const M2_PER_HECTARE: Decimal = dec!(10000);

/// Where the parcel lies and what stands on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LandScenario {
    /// Inside the built-up boundary, with construction
    IntravilanConstruction,
    /// Inside the built-up boundary, without construction, over 400 m²
    IntravilanOtherLarge,
    /// Outside the built-up boundary
    Extravilan,
}

impl LandScenario {
    pub const ALL: [LandScenario; 3] = [
        LandScenario::IntravilanConstruction,
        LandScenario::IntravilanOtherLarge,
        LandScenario::Extravilan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LandScenario::IntravilanConstruction => "intravilan_construction",
            LandScenario::IntravilanOtherLarge => "intravilan_other_large",
            LandScenario::Extravilan => "extravilan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LandScenario::IntravilanConstruction => "Intravilan (teren cu construcții)",
            LandScenario::IntravilanOtherLarge => "Intravilan (teren fără construcții, >400 m²)",
            LandScenario::Extravilan => "Extravilan (în afara localității)",
        }
    }
}

impl FromStr for LandScenario {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LandScenario::ALL
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaxError::UnknownScenario(s.to_string()))
    }
}

impl fmt::Display for LandScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Land-use category of a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    Arable,
    Pasture,
    Hayfield,
    Vine,
    Orchard,
    Forest,
    Water,
    Roads,
    Unproductive,
    Beach,
    /// Only published for extravilan parcels
    Construction,
}

impl LandUse {
    pub const ALL: [LandUse; 11] = [
        LandUse::Arable,
        LandUse::Pasture,
        LandUse::Hayfield,
        LandUse::Vine,
        LandUse::Orchard,
        LandUse::Forest,
        LandUse::Water,
        LandUse::Roads,
        LandUse::Unproductive,
        LandUse::Beach,
        LandUse::Construction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LandUse::Arable => "arable",
            LandUse::Pasture => "pasture",
            LandUse::Hayfield => "hayfield",
            LandUse::Vine => "vine",
            LandUse::Orchard => "orchard",
            LandUse::Forest => "forest",
            LandUse::Water => "water",
            LandUse::Roads => "roads",
            LandUse::Unproductive => "unproductive",
            LandUse::Beach => "beach",
            LandUse::Construction => "construction",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LandUse::Arable => "Teren arabil",
            LandUse::Pasture => "Pășune",
            LandUse::Hayfield => "Fâneață",
            LandUse::Vine => "Vie",
            LandUse::Orchard => "Livadă",
            LandUse::Forest => "Pădure / vegetație forestieră",
            LandUse::Water => "Teren cu apă",
            LandUse::Roads => "Drumuri și căi ferate",
            LandUse::Unproductive => "Teren neproductiv",
            LandUse::Beach => "Plajă cu activități economice",
            LandUse::Construction => "Teren cu construcții (extravilan)",
        }
    }

    /// Column in `LAND_INTRAVILAN_OTHER_BASE`
    fn intravilan_column(self) -> Option<usize> {
        match self {
            LandUse::Arable => Some(0),
            LandUse::Pasture => Some(1),
            LandUse::Hayfield => Some(2),
            LandUse::Vine => Some(3),
            LandUse::Orchard => Some(4),
            LandUse::Forest => Some(5),
            LandUse::Water => Some(6),
            LandUse::Roads => Some(7),
            LandUse::Unproductive => Some(8),
            LandUse::Beach => Some(9),
            LandUse::Construction => None,
        }
    }

    /// Published extravilan base band in lei/ha
    pub fn extravilan_base(self) -> RateRange {
        match self {
            LandUse::Construction => RateRange::new(dec!(60), dec!(83)),
            LandUse::Arable => RateRange::new(dec!(112), dec!(134)),
            LandUse::Pasture => RateRange::new(dec!(54), dec!(75)),
            LandUse::Hayfield => RateRange::new(dec!(54), dec!(75)),
            LandUse::Vine => RateRange::new(dec!(129), dec!(148)),
            LandUse::Orchard => RateRange::new(dec!(129), dec!(150)),
            LandUse::Forest => RateRange::new(dec!(22), dec!(43)),
            LandUse::Water => RateRange::new(dec!(3), dec!(15)),
            LandUse::Roads => RateRange::new(dec!(0), dec!(0)),
            LandUse::Unproductive => RateRange::flat(dec!(0)),
            LandUse::Beach => RateRange::new(dec!(3), dec!(15)),
        }
    }
}

impl FromStr for LandUse {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LandUse::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaxError::InvalidLandUse(s.to_string()))
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Land parcel as submitted: the scenario plus whichever fields were filled in.
///
/// Fields a scenario does not use are ignored; convert into [`LandParcel`] to
/// check that the ones it does use are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandTaxInput {
    pub scenario: LandScenario,
    /// Parcel area in m²
    #[serde(rename = "areaM2")]
    #[schemars(with = "f64")]
    pub area_m2: Decimal,
    #[serde(default)]
    pub city_zone: Option<Zone>,
    #[serde(default)]
    pub city_rank: Option<Rank>,
    /// e.g. "arable", "pasture"
    #[serde(default)]
    pub land_use_category: Option<String>,
}

impl LandTaxInput {
    pub fn new(scenario: LandScenario, area_m2: Decimal) -> Self {
        LandTaxInput {
            scenario,
            area_m2,
            city_zone: None,
            city_rank: None,
            land_use_category: None,
        }
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.city_zone = Some(zone);
        self
    }

    pub fn rank(mut self, rank: Rank) -> Self {
        self.city_rank = Some(rank);
        self
    }

    pub fn land_use(mut self, category: impl Into<String>) -> Self {
        self.land_use_category = Some(category.into());
        self
    }
}

/// A validated land parcel, one variant per scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandParcel {
    IntravilanConstruction {
        area_m2: Decimal,
        zone: Zone,
        rank: Rank,
    },
    IntravilanOtherLarge {
        area_m2: Decimal,
        zone: Zone,
        rank: Rank,
        land_use: LandUse,
    },
    Extravilan {
        area_m2: Decimal,
        rank: Rank,
        land_use: LandUse,
    },
}

impl TryFrom<&LandTaxInput> for LandParcel {
    type Error = TaxError;

    /// Every missing field is reported at once, before any key is parsed.
    fn try_from(input: &LandTaxInput) -> Result<Self, Self::Error> {
        let area_m2 = non_negative("areaM2", input.area_m2)?;
        let land_use = input
            .land_use_category
            .as_deref()
            .filter(|s| !s.trim().is_empty());

        let needs_zone = input.scenario != LandScenario::Extravilan;
        let needs_land_use = input.scenario != LandScenario::IntravilanConstruction;
        let mut missing = Vec::new();
        if needs_zone && input.city_zone.is_none() {
            missing.push("cityZone");
        }
        if input.city_rank.is_none() {
            missing.push("cityRank");
        }
        if needs_land_use && land_use.is_none() {
            missing.push("landUseCategory");
        }

        let missing_field = || TaxError::MissingField {
            scenario: input.scenario.to_string(),
            fields: missing.clone(),
        };

        match input.scenario {
            LandScenario::IntravilanConstruction => match (input.city_zone, input.city_rank) {
                (Some(zone), Some(rank)) => Ok(LandParcel::IntravilanConstruction {
                    area_m2,
                    zone,
                    rank,
                }),
                _ => Err(missing_field()),
            },
            LandScenario::IntravilanOtherLarge => {
                match (input.city_zone, input.city_rank, land_use) {
                    (Some(zone), Some(rank), Some(category)) => {
                        Ok(LandParcel::IntravilanOtherLarge {
                            area_m2,
                            zone,
                            rank,
                            land_use: category.parse()?,
                        })
                    }
                    _ => Err(missing_field()),
                }
            }
            LandScenario::Extravilan => match (input.city_rank, land_use) {
                (Some(rank), Some(category)) => Ok(LandParcel::Extravilan {
                    area_m2,
                    rank,
                    land_use: category.parse()?,
                }),
                _ => Err(missing_field()),
            },
        }
    }
}

impl LandParcel {
    pub fn scenario(&self) -> LandScenario {
        match self {
            LandParcel::IntravilanConstruction { .. } => LandScenario::IntravilanConstruction,
            LandParcel::IntravilanOtherLarge { .. } => LandScenario::IntravilanOtherLarge,
            LandParcel::Extravilan { .. } => LandScenario::Extravilan,
        }
    }

    pub fn area_m2(&self) -> Decimal {
        match *self {
            LandParcel::IntravilanConstruction { area_m2, .. }
            | LandParcel::IntravilanOtherLarge { area_m2, .. }
            | LandParcel::Extravilan { area_m2, .. } => area_m2,
        }
    }

    /// Assess the parcel: `tax = area (ha) × rate per ha`
    pub fn assess(&self) -> Result<TaxResult, TaxError> {
        let area_m2 = self.area_m2();
        let area_ha = area_m2 / M2_PER_HECTARE;
        let area_text = format!("{} m² ({} ha)", plain(area_m2), fixed(area_ha, 4));

        let result = match *self {
            LandParcel::IntravilanConstruction { zone, rank, .. } => {
                let range = zone_rank_lookup(&LAND_INTRAVILAN_CONSTRUCTION, zone, rank)?;
                let rate = range.midpoint();
                let tax = checked_product("areaM2", &[area_ha, rate])?;
                TaxResult::new(
                    tax,
                    format!(
                        "{} × {} lei/ha (median din interval {}–{}) = {} lei",
                        area_text,
                        fixed(rate, 0),
                        plain(range.min),
                        plain(range.max),
                        fixed(tax, 2)
                    ),
                )
            }
            LandParcel::IntravilanOtherLarge {
                zone,
                rank,
                land_use,
                ..
            } => {
                let base = intravilan_other_base(zone, land_use)?;
                let coefficient = tables::rank_correction(rank);
                let rate = base * coefficient;
                let tax = checked_product("areaM2", &[area_ha, rate])?;
                TaxResult::new(
                    tax,
                    format!(
                        "{} × {} lei/ha (bază) × {} (coef. rang) = {} lei/ha × {} = {} lei",
                        area_text,
                        plain(base),
                        plain(coefficient),
                        fixed(rate, 2),
                        fixed(area_ha, 4),
                        fixed(tax, 2)
                    ),
                )
            }
            LandParcel::Extravilan { rank, land_use, .. } => {
                let range = land_use.extravilan_base();
                let coefficient = tables::rank_correction(rank);
                let rate = range.midpoint() * coefficient;
                let tax = checked_product("areaM2", &[area_ha, rate])?;
                TaxResult::new(
                    tax,
                    format!(
                        "{} × ({}–{} lei/ha × {} coef. rang) ≈ {} lei/ha = {} lei",
                        area_text,
                        plain(range.min),
                        plain(range.max),
                        plain(coefficient),
                        fixed(rate, 2),
                        fixed(tax, 2)
                    ),
                )
            }
        };

        log::debug!(
            "Land {} {} m²: tax {}",
            self.scenario(),
            area_m2,
            result.tax
        );
        Ok(result)
    }
}

fn intravilan_other_base(zone: Zone, land_use: LandUse) -> Result<Decimal, TaxError> {
    land_use
        .intravilan_column()
        .and_then(|column| {
            LAND_INTRAVILAN_OTHER_BASE
                .get(zone.index())
                .and_then(|row| row.get(column))
        })
        .copied()
        .ok_or_else(|| TaxError::InvalidLandUse(land_use.to_string()))
}

/// Calculate the yearly land tax for any scenario.
pub fn calculate_land_tax(input: &LandTaxInput) -> Result<TaxResult, TaxError> {
    LandParcel::try_from(input)?.assess()
}
