//! A taxpayer's assets assessed together, with per-kind and grand totals.

use crate::core::format::plain;
use crate::core::{TaxError, TaxResult};
use crate::tax::building::{calculate_building_tax, BuildingTaxInput};
use crate::tax::discount::{apply_early_payment_discount, EarlyPaymentDiscount};
use crate::tax::land::{calculate_land_tax, LandTaxInput};
use crate::tax::vehicle::{calculate_vehicle_tax, VehicleTaxInput};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Vehicle,
    Building,
    Land,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Vehicle => "Vehicul",
            AssetKind::Building => "Clădire",
            AssetKind::Land => "Teren",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Any assessable asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetInput {
    Vehicle(VehicleTaxInput),
    Building(BuildingTaxInput),
    Land(LandTaxInput),
}

impl AssetInput {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetInput::Vehicle(_) => AssetKind::Vehicle,
            AssetInput::Building(_) => AssetKind::Building,
            AssetInput::Land(_) => AssetKind::Land,
        }
    }

    pub fn assess(&self) -> Result<TaxResult, TaxError> {
        match self {
            AssetInput::Vehicle(v) => calculate_vehicle_tax(v),
            AssetInput::Building(b) => calculate_building_tax(b),
            AssetInput::Land(l) => calculate_land_tax(l),
        }
    }

    /// Short human description used in listings
    pub fn describe(&self) -> String {
        match self {
            AssetInput::Vehicle(v) => format!(
                "{} {} cm³, {}",
                v.vehicle_type.label(),
                plain(v.capacity),
                v.euro.label()
            ),
            AssetInput::Building(b) => format!(
                "Tip {}, {} m², {}, Rang {}, Zonă {}",
                b.building_type,
                plain(b.area),
                if b.has_utilities {
                    "cu utilități"
                } else {
                    "fără utilități"
                },
                b.city_rank,
                b.city_zone
            ),
            AssetInput::Land(l) => {
                format!("{}, {} m²", l.scenario.label(), plain(l.area_m2))
            }
        }
    }
}

impl From<VehicleTaxInput> for AssetInput {
    fn from(input: VehicleTaxInput) -> Self {
        AssetInput::Vehicle(input)
    }
}

impl From<BuildingTaxInput> for AssetInput {
    fn from(input: BuildingTaxInput) -> Self {
        AssetInput::Building(input)
    }
}

impl From<LandTaxInput> for AssetInput {
    fn from(input: LandTaxInput) -> Self {
        AssetInput::Land(input)
    }
}

/// Input root for portfolio JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PortfolioInput {
    pub assets: Vec<AssetInput>,
}

/// Read a portfolio from JSON
pub fn read_portfolio_json<R: Read>(reader: R) -> anyhow::Result<PortfolioInput> {
    let input: PortfolioInput = serde_json::from_reader(reader)?;
    Ok(input)
}

/// An assessed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Sequential identifier, unique within the portfolio
    pub id: usize,
    pub kind: AssetKind,
    pub description: String,
    pub input: AssetInput,
    pub result: TaxResult,
}

impl Asset {
    pub fn tax(&self) -> Decimal {
        self.result.tax
    }
}

#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    assets: Vec<Asset>,
    next_id: usize,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assess every asset of the input, stopping at the first failure
    pub fn from_input(input: PortfolioInput) -> Result<Self, TaxError> {
        let mut portfolio = Portfolio::new();
        for asset in input.assets {
            portfolio.add(asset)?;
        }
        Ok(portfolio)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn get(&self, id: usize) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Assess and store an asset. Nothing is stored when assessment fails.
    pub fn add(&mut self, input: impl Into<AssetInput>) -> Result<usize, TaxError> {
        let input = input.into();
        let result = input.assess()?;
        fits_total(self.grand_total(), result.tax)?;
        self.next_id += 1;
        let id = self.next_id;
        log::debug!("Asset {} ({}) assessed at {}", id, input.kind(), result.tax);
        self.assets.push(Asset {
            id,
            kind: input.kind(),
            description: input.describe(),
            input,
            result,
        });
        Ok(id)
    }

    /// Re-assess an existing asset with new details, keeping its id and position
    pub fn replace(&mut self, id: usize, input: impl Into<AssetInput>) -> Result<(), TaxError> {
        let input = input.into();
        let position = self
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or(TaxError::UnknownAsset(id))?;
        let result = input.assess()?;
        fits_total(self.grand_total() - self.assets[position].tax(), result.tax)?;
        self.assets[position] = Asset {
            id,
            kind: input.kind(),
            description: input.describe(),
            input,
            result,
        };
        Ok(())
    }

    /// Returns whether an asset was removed
    pub fn remove(&mut self, id: usize) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != id);
        self.assets.len() != before
    }

    pub fn total(&self, kind: AssetKind) -> Decimal {
        self.assets
            .iter()
            .filter(|a| a.kind == kind)
            .map(Asset::tax)
            .sum()
    }

    pub fn grand_total(&self) -> Decimal {
        self.assets.iter().map(Asset::tax).sum()
    }

    /// Totals per kind and overall, each with the early-payment discount
    /// applied (or not) independently
    pub fn summary(&self, apply_discount: bool) -> PortfolioSummary {
        let summary = PortfolioSummary {
            asset_count: self.assets.len(),
            vehicles: apply_early_payment_discount(self.total(AssetKind::Vehicle), apply_discount),
            buildings: apply_early_payment_discount(
                self.total(AssetKind::Building),
                apply_discount,
            ),
            land: apply_early_payment_discount(self.total(AssetKind::Land), apply_discount),
            total: apply_early_payment_discount(self.grand_total(), apply_discount),
            discount_applied: apply_discount,
        };
        log::info!(
            "Portfolio of {} assets: total {}, payable {}",
            summary.asset_count,
            summary.total.original_tax,
            summary.total.final_tax
        );
        summary
    }
}

/// Every asset tax is non-negative, so once the grand total fits the
/// per-kind totals do too
fn fits_total(others: Decimal, tax: Decimal) -> Result<(), TaxError> {
    others
        .checked_add(tax)
        .map(|_| ())
        .ok_or(TaxError::AmountTooLarge { field: "total" })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub asset_count: usize,
    pub vehicles: EarlyPaymentDiscount,
    pub buildings: EarlyPaymentDiscount,
    pub land: EarlyPaymentDiscount,
    pub total: EarlyPaymentDiscount,
    pub discount_applied: bool,
}
