//! Schema command - print expected input formats

use clap::Args;
use impozit::{AssetInput, PortfolioInput, TaxResult};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which document to describe
    #[arg(value_enum, default_value = "portfolio")]
    target: SchemaTarget,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaTarget {
    /// Input for the portfolio command
    Portfolio,
    /// A single asset (vehicle, building or land)
    Asset,
    /// Result of a single assessment
    Result,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.target {
            SchemaTarget::Portfolio => schema_for!(PortfolioInput),
            SchemaTarget::Asset => schema_for!(AssetInput),
            SchemaTarget::Result => schema_for!(TaxResult),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
