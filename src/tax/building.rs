use crate::core::error::{checked_product, non_negative};
use crate::core::format::{fixed, plain};
use crate::core::{zone_rank_lookup, Rank, TaxError, TaxResult, Zone};
use crate::tax::tables::{BuildingRate, BUILDING_RATES, CITY_COEFFICIENTS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest local levy, in percent of the taxable value
pub const MIN_LOCAL_RATE_PERCENT: Decimal = dec!(0.08);
/// Highest local levy, in percent of the taxable value
pub const MAX_LOCAL_RATE_PERCENT: Decimal = dec!(0.2);
/// Local levy applied when the council has not set one
pub const DEFAULT_LOCAL_RATE_PERCENT: Decimal = dec!(0.1);

/// Construction class of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum BuildingType {
    /// Reinforced concrete frame or fired brick / treated material walls
    A,
    /// Wood, natural stone, unfired brick or other untreated walls
    B,
    /// Annex building, type A materials
    C,
    /// Annex building, type B materials
    D,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::A,
        BuildingType::B,
        BuildingType::C,
        BuildingType::D,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingType::A => "A",
            BuildingType::B => "B",
            BuildingType::C => "C",
            BuildingType::D => "D",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingType::A => {
                "A. Clădire din beton armat/ pereți exteriori din cărămidă arsă/ materiale tratate"
            }
            BuildingType::B => {
                "B. Clădire din lemn/ piatră naturală/ cărămidă nearsă/ vălătuci/ materiale netratate"
            }
            BuildingType::C => {
                "C. Clădire-anexă din beton armat/ pereți din cărămidă arsă/ materiale tratate"
            }
            BuildingType::D => {
                "D. Clădire-anexă din lemn/ piatră naturală/ cărămidă nearsă/ vălătuci/ materiale netratate"
            }
        }
    }
}

impl FromStr for BuildingType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaxError::UnknownBuildingType(s.to_string()))
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate row for a building type (descriptive name and lei/m² rates)
pub fn building_type_details(building_type: BuildingType) -> &'static BuildingRate {
    match building_type {
        BuildingType::A => &BUILDING_RATES[0],
        BuildingType::B => &BUILDING_RATES[1],
        BuildingType::C => &BUILDING_RATES[2],
        BuildingType::D => &BUILDING_RATES[3],
    }
}

/// Basement, semi-basement or attic rooms used for a purpose other than
/// the main building's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpecialUsage {
    #[default]
    None,
    /// Used as dwelling
    Locuinta,
    /// Used for any other purpose
    AlteScopuri,
}

impl SpecialUsage {
    pub const ALL: [SpecialUsage; 3] = [
        SpecialUsage::None,
        SpecialUsage::Locuinta,
        SpecialUsage::AlteScopuri,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialUsage::None => "none",
            SpecialUsage::Locuinta => "locuinta",
            SpecialUsage::AlteScopuri => "alte_scopuri",
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            SpecialUsage::None => dec!(1.0),
            SpecialUsage::Locuinta => dec!(0.75),
            SpecialUsage::AlteScopuri => dec!(0.5),
        }
    }

    fn breakdown_step(self) -> Option<&'static str> {
        match self {
            SpecialUsage::None => None,
            SpecialUsage::Locuinta => Some("× 0.75 (încăperi S/D/M folosite ca locuință)"),
            SpecialUsage::AlteScopuri => Some("× 0.50 (încăperi S/D/M folosite în alte scopuri)"),
        }
    }
}

impl FromStr for SpecialUsage {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecialUsage::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaxError::UnknownUsage(s.to_string()))
    }
}

/// Building description for assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingTaxInput {
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    /// Built area in m²
    #[schemars(with = "f64")]
    pub area: Decimal,
    pub has_utilities: bool,
    pub city_rank: Rank,
    pub city_zone: Zone,
    /// Council levy in percent (0.08 - 0.2); out-of-range values are clamped
    #[serde(default = "default_local_rate")]
    #[schemars(with = "f64")]
    pub local_rate_percent: Decimal,
    #[serde(default)]
    pub special_usage: SpecialUsage,
}

fn default_local_rate() -> Decimal {
    DEFAULT_LOCAL_RATE_PERCENT
}

/// Council levy limited to `[0.08, 0.2]` percent
pub fn clamp_local_rate_percent(percent: Decimal) -> Decimal {
    percent.clamp(MIN_LOCAL_RATE_PERCENT, MAX_LOCAL_RATE_PERCENT)
}

/// Calculate the yearly building tax.
///
/// `tax = area × rate × zone coefficient × usage multiplier × local rate`
pub fn calculate_building_tax(input: &BuildingTaxInput) -> Result<TaxResult, TaxError> {
    let area = non_negative("area", input.area)?;
    let rate_row = building_type_details(input.building_type);
    let rate = if input.has_utilities {
        rate_row.with_utilities
    } else {
        rate_row.without_utilities
    };
    let zone_coeff = zone_rank_lookup(&CITY_COEFFICIENTS, input.city_zone, input.city_rank)?;
    let usage_multiplier = input.special_usage.multiplier();

    let local_percent = clamp_local_rate_percent(input.local_rate_percent);
    if local_percent != input.local_rate_percent {
        log::debug!(
            "Local rate {}% clamped to {}%",
            input.local_rate_percent,
            local_percent
        );
    }
    let local_fraction = local_percent / dec!(100);

    let taxable_base = checked_product("area", &[area, rate, zone_coeff, usage_multiplier])?;
    let tax = taxable_base * local_fraction;
    log::debug!(
        "Building {} zone {} rank {}: base {} x {}",
        input.building_type,
        input.city_zone,
        input.city_rank,
        taxable_base,
        local_fraction
    );

    let mut steps = vec![
        format!("{} m²", plain(area)),
        format!("× {} lei/m²", plain(rate)),
        format!("× {} (coef. zonă/rang)", fixed(zone_coeff, 2)),
    ];
    if let Some(step) = input.special_usage.breakdown_step() {
        steps.push(step.to_string());
    }
    steps.push(format!("× {}% (cota locală)", fixed(local_percent, 2)));
    let utilities = if input.has_utilities {
        "cu utilități"
    } else {
        "fără utilități"
    };
    let breakdown = format!("{} = {} lei ({})", steps.join(" "), fixed(tax, 2), utilities);

    Ok(TaxResult::new(tax, breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(area: Decimal) -> BuildingTaxInput {
        BuildingTaxInput {
            building_type: BuildingType::A,
            area,
            has_utilities: true,
            city_rank: Rank::R0,
            city_zone: Zone::A,
            local_rate_percent: dec!(0.1),
            special_usage: SpecialUsage::None,
        }
    }

    #[test]
    fn type_a_capital_centre() {
        let result = calculate_building_tax(&house(dec!(100))).unwrap();
        // 100 × 2677 × 2.60 × 1.0 × 0.001
        assert_eq!(result.tax, dec!(696.02));
        assert_eq!(
            result.breakdown,
            "100 m² × 2677 lei/m² × 2.60 (coef. zonă/rang) × 0.10% (cota locală) = 696.02 lei (cu utilități)"
        );
    }

    #[test]
    fn without_utilities_uses_lower_rate() {
        let mut input = house(dec!(100));
        input.has_utilities = false;
        let result = calculate_building_tax(&input).unwrap();
        assert_eq!(result.tax, dec!(100) * dec!(1606) * dec!(2.60) * dec!(0.001));
        assert!(result.breakdown.ends_with("(fără utilități)"));
    }

    #[test]
    fn special_usage_multipliers() {
        let base = calculate_building_tax(&house(dec!(80))).unwrap().tax;

        let mut dwelling = house(dec!(80));
        dwelling.special_usage = SpecialUsage::Locuinta;
        let dwelling = calculate_building_tax(&dwelling).unwrap();
        assert_eq!(dwelling.tax, base * dec!(0.75));
        assert!(dwelling
            .breakdown
            .contains("× 2.60 (coef. zonă/rang) × 0.75 (încăperi S/D/M folosite ca locuință) × 0.10%"));

        let mut other = house(dec!(80));
        other.special_usage = SpecialUsage::AlteScopuri;
        let other = calculate_building_tax(&other).unwrap();
        assert_eq!(other.tax, base * dec!(0.5));
        assert!(other.tax < base);
    }

    #[test]
    fn local_rate_is_clamped() {
        let mut low = house(dec!(100));
        low.local_rate_percent = dec!(0.01);
        let mut floor = house(dec!(100));
        floor.local_rate_percent = dec!(0.08);
        assert_eq!(
            calculate_building_tax(&low).unwrap(),
            calculate_building_tax(&floor).unwrap()
        );

        let mut high = house(dec!(100));
        high.local_rate_percent = dec!(5);
        let mut ceiling = house(dec!(100));
        ceiling.local_rate_percent = dec!(0.2);
        assert_eq!(
            calculate_building_tax(&high).unwrap(),
            calculate_building_tax(&ceiling).unwrap()
        );
    }

    #[test]
    fn monotonic_in_area_and_zone_coefficient() {
        let small = calculate_building_tax(&house(dec!(50))).unwrap().tax;
        let large = calculate_building_tax(&house(dec!(51))).unwrap().tax;
        assert!(large > small);

        let mut lower_zone = house(dec!(50));
        lower_zone.city_zone = Zone::D;
        lower_zone.city_rank = Rank::V;
        assert!(calculate_building_tax(&lower_zone).unwrap().tax < small);
    }

    #[test]
    fn zero_area_owes_nothing() {
        assert_eq!(calculate_building_tax(&house(dec!(0))).unwrap().tax, dec!(0));
    }

    #[test]
    fn negative_area_rejected() {
        assert!(matches!(
            calculate_building_tax(&house(dec!(-5))),
            Err(TaxError::NegativeAmount { field: "area", .. })
        ));
    }

    #[test]
    fn unknown_type_key() {
        assert_eq!(
            "E".parse::<BuildingType>(),
            Err(TaxError::UnknownBuildingType("E".to_string()))
        );
    }

    #[test]
    fn details_expose_rates() {
        let details = building_type_details(BuildingType::C);
        assert_eq!(details.with_utilities, dec!(535));
        assert_eq!(details.without_utilities, dec!(469));
    }

    #[test]
    fn deserialize_defaults() {
        let input: BuildingTaxInput = serde_json::from_str(
            r#"{"type":"B","area":60,"hasUtilities":false,"cityRank":"II","cityZone":"C"}"#,
        )
        .unwrap();
        assert_eq!(input.local_rate_percent, dec!(0.1));
        assert_eq!(input.special_usage, SpecialUsage::None);
        assert_eq!(input.city_rank, Rank::II);
    }

    #[test]
    fn huge_area_is_an_error() {
        assert_eq!(
            calculate_building_tax(&house(dec!(100000000000000000000000000))),
            Err(TaxError::AmountTooLarge { field: "area" })
        );
        assert_eq!(
            calculate_building_tax(&house(Decimal::MAX)),
            Err(TaxError::AmountTooLarge { field: "area" })
        );
    }
}
