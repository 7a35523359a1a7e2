//! Single-asset commands - assess one vehicle, building or land parcel

use clap::Args;
use impozit::core::format::fixed;
use impozit::{
    calculate_building_tax, calculate_land_tax, calculate_vehicle_tax, BuildingTaxInput,
    BuildingType, EuroNorm, LandScenario, LandTaxInput, Rank, SpecialUsage, TaxResult,
    VehicleTaxInput, VehicleType, Zone,
};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct VehicleCommand {
    /// Vehicle type: car, motorcycle, bus, other
    #[arg(short = 't', long = "type")]
    vehicle_type: VehicleType,

    /// Engine capacity in cm³
    #[arg(short, long)]
    capacity: Decimal,

    /// Pollution norm: euro0_3, euro4, euro5, euro6, hybrid_le_50, hybrid_gt_50, electric
    #[arg(short, long)]
    norm: EuroNorm,

    /// Local discount fraction for hybrids ≤50g CO₂/km (0.0 - 0.3)
    #[arg(long)]
    hybrid_discount: Option<Decimal>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl VehicleCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = VehicleTaxInput {
            vehicle_type: self.vehicle_type,
            capacity: self.capacity,
            euro: self.norm,
            local_hybrid_discount: self.hybrid_discount,
        };
        let result = calculate_vehicle_tax(&input)?;
        print_result("IMPOZIT VEHICUL", &result, self.json)
    }
}

#[derive(Args, Debug)]
pub struct BuildingCommand {
    /// Building type: A, B, C, D
    #[arg(short = 't', long = "type")]
    building_type: BuildingType,

    /// Built area in m²
    #[arg(short, long)]
    area: Decimal,

    /// City zone: A, B, C, D
    #[arg(short, long)]
    zone: Zone,

    /// City rank: 0, I, II, III, IV, V
    #[arg(short, long)]
    rank: Rank,

    /// Building has no utilities (water, sewage, electricity, heating)
    #[arg(long)]
    no_utilities: bool,

    /// Local rate in percent, clamped to 0.08 - 0.2
    #[arg(short, long, default_value = "0.1")]
    local_rate: Decimal,

    /// Basement/attic usage: none, locuinta, alte_scopuri
    #[arg(short, long, default_value = "none")]
    usage: SpecialUsage,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl BuildingCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = BuildingTaxInput {
            building_type: self.building_type,
            area: self.area,
            has_utilities: !self.no_utilities,
            city_rank: self.rank,
            city_zone: self.zone,
            local_rate_percent: self.local_rate,
            special_usage: self.usage,
        };
        let result = calculate_building_tax(&input)?;
        print_result("IMPOZIT CLĂDIRE", &result, self.json)
    }
}

#[derive(Args, Debug)]
pub struct LandCommand {
    /// Scenario: intravilan_construction, intravilan_other_large, extravilan
    #[arg(short, long)]
    scenario: LandScenario,

    /// Parcel area in m²
    #[arg(short, long)]
    area: Decimal,

    /// City zone: A, B, C, D
    #[arg(short, long)]
    zone: Option<Zone>,

    /// City rank: 0, I, II, III, IV, V
    #[arg(short, long)]
    rank: Option<Rank>,

    /// Land use category (e.g. arable, pasture, vine)
    #[arg(short = 'u', long)]
    land_use: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl LandCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = LandTaxInput {
            scenario: self.scenario,
            area_m2: self.area,
            city_zone: self.zone,
            city_rank: self.rank,
            land_use_category: self.land_use.clone(),
        };
        let result = calculate_land_tax(&input)?;
        print_result("IMPOZIT TEREN", &result, self.json)
    }
}

fn print_result(title: &str, result: &TaxResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!();
    println!("{}", title);
    println!();
    println!("  Impozit:  {} lei", fixed(result.tax, 2));
    println!("  Calcul:   {}", result.breakdown);
    println!();
    Ok(())
}
