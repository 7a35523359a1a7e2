use crate::core::error::{checked_product, non_negative};
use crate::core::format::{fixed, plain};
use crate::core::{TaxError, TaxResult};
use crate::tax::tables::{self, RowKind, VehicleRate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat yearly amount for electric vehicles
pub const ELECTRIC_FLAT_TAX: Decimal = dec!(40);

/// Capacity covered by one rate unit (cm³)
pub const CAPACITY_UNIT: Decimal = dec!(200);

/// Upper bound for the local discount on low-emission hybrids
pub const MAX_HYBRID_DISCOUNT: Decimal = dec!(0.30);

/// Motorcycles above this capacity use the large-motorcycle row
pub const MOTORCYCLE_SMALL_MAX: Decimal = dec!(1600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Bus,
    Other,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Car,
        VehicleType::Motorcycle,
        VehicleType::Bus,
        VehicleType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Bus => "bus",
            VehicleType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "Autoturism",
            VehicleType::Motorcycle => "Motocicletă/Triciclu",
            VehicleType::Bus => "Autobuz/Microbuz",
            VehicleType::Other => "Altă categorie",
        }
    }
}

impl FromStr for VehicleType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaxError::UnknownVehicleType(s.to_string()))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pollution class of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EuroNorm {
    #[serde(rename = "euro0_3")]
    Euro0To3,
    #[serde(rename = "euro4")]
    Euro4,
    #[serde(rename = "euro5")]
    Euro5,
    #[serde(rename = "euro6")]
    Euro6,
    /// Hybrid emitting at most 50 g CO₂/km; eligible for a local discount
    #[serde(rename = "hybrid_le_50")]
    HybridLe50,
    #[serde(rename = "hybrid_gt_50")]
    HybridGt50,
    #[serde(rename = "electric")]
    Electric,
}

impl EuroNorm {
    pub const ALL: [EuroNorm; 7] = [
        EuroNorm::Euro0To3,
        EuroNorm::Euro4,
        EuroNorm::Euro5,
        EuroNorm::Euro6,
        EuroNorm::HybridLe50,
        EuroNorm::HybridGt50,
        EuroNorm::Electric,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EuroNorm::Euro0To3 => "euro0_3",
            EuroNorm::Euro4 => "euro4",
            EuroNorm::Euro5 => "euro5",
            EuroNorm::Euro6 => "euro6",
            EuroNorm::HybridLe50 => "hybrid_le_50",
            EuroNorm::HybridGt50 => "hybrid_gt_50",
            EuroNorm::Electric => "electric",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EuroNorm::Euro0To3 => "Euro 0-3 (vehicule mai vechi)",
            EuroNorm::Euro4 => "Euro 4",
            EuroNorm::Euro5 => "Euro 5",
            EuroNorm::Euro6 => "Euro 6 (cel mai nou)",
            EuroNorm::HybridLe50 => "Hibrid (≤50g CO₂/km) — lei/200 cm³ (max -30% local)",
            EuroNorm::HybridGt50 => "Hibrid (>50g CO₂/km) — lei/200 cm³",
            EuroNorm::Electric => "Electric — 40 lei/an",
        }
    }

    /// Per-unit rate from a table row. Both hybrid classes read the same column.
    fn rate_in(self, row: &VehicleRate) -> Option<Decimal> {
        match self {
            EuroNorm::Euro0To3 => Some(row.euro0_3),
            EuroNorm::Euro4 => Some(row.euro4),
            EuroNorm::Euro5 => Some(row.euro5),
            EuroNorm::Euro6 => Some(row.euro6),
            EuroNorm::HybridLe50 | EuroNorm::HybridGt50 => Some(row.hybrid_over_50),
            EuroNorm::Electric => None,
        }
    }
}

impl FromStr for EuroNorm {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EuroNorm::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaxError::InvalidNorm(s.to_string()))
    }
}

impl fmt::Display for EuroNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle description for assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTaxInput {
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    /// Engine capacity in cm³
    #[schemars(with = "f64")]
    pub capacity: Decimal,
    pub euro: EuroNorm,
    /// Local discount fraction (0.0 - 0.3), only used for hybrids ≤50g CO₂/km
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub local_hybrid_discount: Option<Decimal>,
}

impl VehicleTaxInput {
    pub fn new(vehicle_type: VehicleType, capacity: Decimal, euro: EuroNorm) -> Self {
        VehicleTaxInput {
            vehicle_type,
            capacity,
            euro,
            local_hybrid_discount: None,
        }
    }

    pub fn with_hybrid_discount(mut self, discount: Decimal) -> Self {
        self.local_hybrid_discount = Some(discount);
        self
    }
}

/// Select the rate row for a vehicle.
///
/// Motorcycles, buses and other vehicles go straight to their dedicated rows;
/// only cars are matched by capacity bracket.
pub fn select_rate_row(
    vehicle_type: VehicleType,
    capacity: Decimal,
) -> Result<&'static VehicleRate, TaxError> {
    let row = match vehicle_type {
        VehicleType::Motorcycle if capacity <= MOTORCYCLE_SMALL_MAX => {
            tables::vehicle_row(RowKind::CarOrSmallMotorcycle)
        }
        VehicleType::Motorcycle => tables::vehicle_row(RowKind::LargeMotorcycle),
        VehicleType::Bus => tables::vehicle_row(RowKind::Bus),
        VehicleType::Other => tables::vehicle_row(RowKind::Other),
        VehicleType::Car => tables::car_bracket(capacity),
    };
    row.ok_or_else(|| TaxError::InvalidRate {
        category: vehicle_type.to_string(),
        capacity,
    })
}

/// Calculate the yearly vehicle tax.
///
/// `tax = ceil(capacity / 200) × rate`, with electric vehicles paying a flat
/// amount and low-emission hybrids optionally discounted.
pub fn calculate_vehicle_tax(input: &VehicleTaxInput) -> Result<TaxResult, TaxError> {
    if input.euro == EuroNorm::Electric {
        log::debug!("Electric vehicle, flat {} lei", ELECTRIC_FLAT_TAX);
        return Ok(TaxResult::new(
            ELECTRIC_FLAT_TAX,
            "Vehicul electric: 40 lei/an",
        ));
    }

    let capacity = non_negative("capacity", input.capacity)?;
    let row = select_rate_row(input.vehicle_type, capacity)?;
    let rate = input
        .euro
        .rate_in(row)
        .ok_or_else(|| TaxError::InvalidNorm(input.euro.to_string()))?;

    let units = (capacity / CAPACITY_UNIT).ceil();
    let mut tax = checked_product("capacity", &[units, rate])?;
    log::debug!(
        "Vehicle {} {} cm³: row {}, {} units x {} lei",
        input.vehicle_type,
        capacity,
        row.name,
        units,
        rate
    );

    let mut breakdown = format!(
        "({} cm³ ÷ 200) × {} lei = {} × {} = {} lei",
        plain(capacity),
        plain(rate),
        plain(units),
        plain(rate),
        fixed(tax, 2)
    );

    if input.euro == EuroNorm::HybridLe50 {
        let discount = clamp_hybrid_discount(input.local_hybrid_discount.unwrap_or_default());
        if discount > Decimal::ZERO {
            tax *= Decimal::ONE - discount;
            log::debug!("Hybrid discount {} applied, tax {}", discount, tax);
            breakdown.push_str(&format!(
                " → aplicată reducere locală {}% = {} lei",
                fixed(discount * dec!(100), 0),
                fixed(tax, 2)
            ));
        } else {
            breakdown.push_str(" (se poate aplica o reducere locală de până la 30%)");
        }
    }

    Ok(TaxResult::new(tax, breakdown))
}

/// Local hybrid discount limited to `[0, 0.30]`
pub fn clamp_hybrid_discount(discount: Decimal) -> Decimal {
    discount.clamp(Decimal::ZERO, MAX_HYBRID_DISCOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(capacity: Decimal, euro: EuroNorm) -> VehicleTaxInput {
        VehicleTaxInput::new(VehicleType::Car, capacity, euro)
    }

    #[test]
    fn car_1800_hybrid_over_50() {
        let result = calculate_vehicle_tax(&car(dec!(1800), EuroNorm::HybridGt50)).unwrap();
        assert_eq!(result.tax, dec!(221.4));
        assert_eq!(
            result.breakdown,
            "(1800 cm³ ÷ 200) × 24.6 lei = 9 × 24.6 = 221.40 lei"
        );
    }

    #[test]
    fn partial_unit_rounds_up() {
        let one = calculate_vehicle_tax(&car(dec!(200), EuroNorm::Euro6)).unwrap();
        assert_eq!(one.tax, dec!(16.5));
        let two = calculate_vehicle_tax(&car(dec!(201), EuroNorm::Euro6)).unwrap();
        assert_eq!(two.tax, dec!(33.0));
        let tiny = calculate_vehicle_tax(&car(dec!(0.5), EuroNorm::Euro6)).unwrap();
        assert_eq!(tiny.tax, dec!(16.5));
    }

    #[test]
    fn bracket_boundary_changes_rate() {
        let at = calculate_vehicle_tax(&car(dec!(2000), EuroNorm::Euro4)).unwrap();
        assert_eq!(at.tax, dec!(10) * dec!(28.5));
        let above = calculate_vehicle_tax(&car(dec!(2001), EuroNorm::Euro4)).unwrap();
        assert_eq!(above.tax, dec!(11) * dec!(88.6));
    }

    #[test]
    fn electric_is_flat_regardless_of_capacity() {
        for vehicle_type in VehicleType::ALL {
            for capacity in [dec!(0), dec!(1500), dec!(5000000)] {
                let input = VehicleTaxInput::new(vehicle_type, capacity, EuroNorm::Electric)
                    .with_hybrid_discount(dec!(0.3));
                let result = calculate_vehicle_tax(&input).unwrap();
                assert_eq!(result.tax, dec!(40));
                assert_eq!(result.breakdown, "Vehicul electric: 40 lei/an");
            }
        }
    }

    #[test]
    fn motorcycle_split_at_1600() {
        let small = VehicleTaxInput::new(VehicleType::Motorcycle, dec!(1600), EuroNorm::Euro0To3);
        assert_eq!(calculate_vehicle_tax(&small).unwrap().tax, dec!(8) * dec!(19.5));
        let large = VehicleTaxInput::new(VehicleType::Motorcycle, dec!(1601), EuroNorm::Euro0To3);
        assert_eq!(calculate_vehicle_tax(&large).unwrap().tax, dec!(9) * dec!(22.1));
    }

    #[test]
    fn bus_and_other_ignore_capacity_brackets() {
        let bus = VehicleTaxInput::new(VehicleType::Bus, dec!(4000), EuroNorm::Euro5);
        assert_eq!(calculate_vehicle_tax(&bus).unwrap().tax, dec!(20) * dec!(28.1));
        let other = VehicleTaxInput::new(VehicleType::Other, dec!(400), EuroNorm::Euro6);
        assert_eq!(calculate_vehicle_tax(&other).unwrap().tax, dec!(66.0));
    }

    #[test]
    fn hybrids_share_rate_column() {
        let le = calculate_vehicle_tax(&car(dec!(1400), EuroNorm::HybridLe50)).unwrap();
        let gt = calculate_vehicle_tax(&car(dec!(1400), EuroNorm::HybridGt50)).unwrap();
        assert_eq!(le.tax, gt.tax);
        assert!(le
            .breakdown
            .ends_with("(se poate aplica o reducere locală de până la 30%)"));
    }

    #[test]
    fn hybrid_discount_is_clamped() {
        let half = car(dec!(1800), EuroNorm::HybridLe50).with_hybrid_discount(dec!(0.5));
        let max = car(dec!(1800), EuroNorm::HybridLe50).with_hybrid_discount(dec!(0.30));
        let half = calculate_vehicle_tax(&half).unwrap();
        let max = calculate_vehicle_tax(&max).unwrap();
        assert_eq!(half, max);
        assert_eq!(half.tax, dec!(154.98));
        assert_eq!(
            half.breakdown,
            "(1800 cm³ ÷ 200) × 24.6 lei = 9 × 24.6 = 221.40 lei → aplicată reducere locală 30% = 154.98 lei"
        );
    }

    #[test]
    fn negative_hybrid_discount_counts_as_none() {
        let input = car(dec!(1800), EuroNorm::HybridLe50).with_hybrid_discount(dec!(-0.2));
        assert_eq!(calculate_vehicle_tax(&input).unwrap().tax, dec!(221.4));
    }

    #[test]
    fn discount_ignored_for_other_norms() {
        let input = car(dec!(1800), EuroNorm::HybridGt50).with_hybrid_discount(dec!(0.2));
        assert_eq!(calculate_vehicle_tax(&input).unwrap().tax, dec!(221.4));
    }

    #[test]
    fn car_beyond_table_has_no_rate() {
        let err = calculate_vehicle_tax(&car(dec!(1000000), EuroNorm::Euro6)).unwrap_err();
        assert_eq!(
            err,
            TaxError::InvalidRate {
                category: "car".to_string(),
                capacity: dec!(1000000)
            }
        );
    }

    #[test]
    fn fractional_capacity_between_car_brackets_has_no_rate() {
        let err = calculate_vehicle_tax(&car(dec!(1600.5), EuroNorm::Euro6)).unwrap_err();
        assert_eq!(
            err,
            TaxError::InvalidRate {
                category: "car".to_string(),
                capacity: dec!(1600.5)
            }
        );
    }

    #[test]
    fn largest_capacity_assessed_without_overflow() {
        for vehicle_type in [VehicleType::Motorcycle, VehicleType::Bus, VehicleType::Other] {
            let input = VehicleTaxInput::new(vehicle_type, Decimal::MAX, EuroNorm::Euro0To3);
            let result = calculate_vehicle_tax(&input).unwrap();
            assert!(result.tax > Decimal::ZERO);
        }
    }

    #[test]
    fn negative_capacity_rejected() {
        let err = calculate_vehicle_tax(&car(dec!(-100), EuroNorm::Euro6)).unwrap_err();
        assert!(matches!(err, TaxError::NegativeAmount { field: "capacity", .. }));
    }

    #[test]
    fn unknown_norm_key() {
        assert_eq!(
            "euro7".parse::<EuroNorm>(),
            Err(TaxError::InvalidNorm("euro7".to_string()))
        );
        assert_eq!("HYBRID_LE_50".parse::<EuroNorm>(), Ok(EuroNorm::HybridLe50));
    }

    #[test]
    fn deserialize_input() {
        let input: VehicleTaxInput = serde_json::from_str(
            r#"{"type":"car","capacity":1800,"euro":"hybrid_le_50","localHybridDiscount":0.2}"#,
        )
        .unwrap();
        assert_eq!(input.vehicle_type, VehicleType::Car);
        assert_eq!(input.euro, EuroNorm::HybridLe50);
        assert_eq!(input.local_hybrid_discount, Some(dec!(0.2)));
    }
}
