//! `{value, label}` lists for selection controls.

use crate::core::{Rank, SelectOption, Zone};
use crate::tax::building::BuildingType;
use crate::tax::land::{LandScenario, LandUse};
use crate::tax::vehicle::{EuroNorm, VehicleType};

pub fn vehicle_types() -> Vec<SelectOption> {
    VehicleType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

pub fn euro_norms() -> Vec<SelectOption> {
    EuroNorm::ALL
        .iter()
        .map(|n| SelectOption::new(n.as_str(), n.label()))
        .collect()
}

pub fn building_types() -> Vec<SelectOption> {
    BuildingType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

pub fn city_ranks() -> Vec<SelectOption> {
    Rank::ALL
        .iter()
        .map(|r| SelectOption::new(r.as_str(), rank_label(*r)))
        .collect()
}

pub fn city_zones() -> Vec<SelectOption> {
    Zone::ALL
        .iter()
        .map(|z| SelectOption::new(z.as_str(), zone_label(*z)))
        .collect()
}

pub fn land_tax_scenarios() -> Vec<SelectOption> {
    LandScenario::ALL
        .iter()
        .map(|s| SelectOption::new(s.as_str(), s.label()))
        .collect()
}

pub fn land_use_categories() -> Vec<SelectOption> {
    LandUse::ALL
        .iter()
        .map(|u| SelectOption::new(u.as_str(), u.label()))
        .collect()
}

fn rank_label(rank: Rank) -> &'static str {
    match rank {
        Rank::R0 => "Rang 0 — București (capitală)",
        Rank::I => "Rang I",
        Rank::II => "Rang II",
        Rank::III => "Rang III",
        Rank::IV => "Rang IV",
        Rank::V => "Rang V",
    }
}

fn zone_label(zone: Zone) -> &'static str {
    match zone {
        Zone::A => "Zona A",
        Zone::B => "Zona B",
        Zone::C => "Zona C",
        Zone::D => "Zona D",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_values_parse_back() {
        for o in vehicle_types() {
            assert_eq!(o.value.parse::<VehicleType>().unwrap().as_str(), o.value);
        }
        for o in euro_norms() {
            assert_eq!(o.value.parse::<EuroNorm>().unwrap().as_str(), o.value);
        }
        for o in land_use_categories() {
            assert_eq!(o.value.parse::<LandUse>().unwrap().as_str(), o.value);
        }
        for o in city_ranks() {
            assert_eq!(o.value.parse::<Rank>().unwrap().as_str(), o.value);
        }
    }

    #[test]
    fn option_counts() {
        assert_eq!(vehicle_types().len(), 4);
        assert_eq!(euro_norms().len(), 7);
        assert_eq!(building_types().len(), 4);
        assert_eq!(city_ranks().len(), 6);
        assert_eq!(city_zones().len(), 4);
        assert_eq!(land_tax_scenarios().len(), 3);
        assert_eq!(land_use_categories().len(), 11);
    }

    #[test]
    fn labels() {
        assert_eq!(city_ranks()[0].label, "Rang 0 — București (capitală)");
        assert_eq!(vehicle_types()[1].label, "Motocicletă/Triciclu");
        assert_eq!(land_tax_scenarios()[2].value, "extravilan");
    }
}
