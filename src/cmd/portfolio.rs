//! Portfolio command - assess every asset in a file and total them

use crate::utils::write_csv;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args, ValueEnum};
use impozit::core::format::fixed;
use impozit::{
    is_early_payment_eligible, read_portfolio_json, Clock, EarlyPaymentDiscount, FixedClock,
    Portfolio, PortfolioInput, PortfolioSummary, SystemClock,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct PortfolioCommand {
    /// Portfolio JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Whether to apply the 10% early-payment discount
    #[arg(short, long, value_enum, default_value_t = DiscountMode::Auto)]
    discount: DiscountMode,

    /// Evaluate discount eligibility at this instant (RFC 3339) instead of now
    #[arg(long)]
    now: Option<DateTime<FixedOffset>>,

    /// Output as JSON instead of formatted tables
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output assets as CSV
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DiscountMode {
    /// Apply while paying before the deadline
    #[default]
    Auto,
    Yes,
    No,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct AssetRow {
    #[tabled(rename = "#")]
    id: usize,
    #[tabled(rename = "Tip")]
    kind: String,
    #[tabled(rename = "Descriere")]
    description: String,
    #[tabled(rename = "Impozit (lei)")]
    tax: String,
    #[tabled(skip)]
    breakdown: String,
}

#[derive(Debug, Clone, Tabled)]
struct TotalRow {
    #[tabled(rename = "Categorie")]
    category: String,
    #[tabled(rename = "Impozit")]
    original: String,
    #[tabled(rename = "Reducere")]
    discount: String,
    #[tabled(rename = "De plată")]
    payable: String,
}

#[derive(Debug, Serialize)]
struct PortfolioOutput<'a> {
    assets: &'a [impozit::Asset],
    summary: &'a PortfolioSummary,
}

impl PortfolioCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_portfolio(&self.file)?;
        let portfolio = Portfolio::from_input(input)?;
        let apply_discount = match self.discount {
            DiscountMode::Yes => true,
            DiscountMode::No => false,
            DiscountMode::Auto => match self.now {
                Some(now) => eligible_at(&FixedClock(now.with_timezone(&Utc))),
                None => eligible_at(&SystemClock),
            },
        };
        let summary = portfolio.summary(apply_discount);

        if self.json {
            let output = PortfolioOutput {
                assets: portfolio.assets(),
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        } else if self.csv {
            write_csv(asset_rows(&portfolio), io::stdout())
        } else {
            self.print_tables(&portfolio, &summary);
            Ok(())
        }
    }

    fn print_tables(&self, portfolio: &Portfolio, summary: &PortfolioSummary) {
        if portfolio.is_empty() {
            println!("No assets found");
            return;
        }

        println!();
        println!("BUNURI");
        println!();
        let table = Table::new(asset_rows(portfolio))
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
            .to_string();
        println!("{}", table);

        println!();
        println!("TOTAL");
        println!();
        let rows = vec![
            total_row("Vehicule", &summary.vehicles),
            total_row("Clădiri", &summary.buildings),
            total_row("Terenuri", &summary.land),
            total_row("Total", &summary.total),
        ];
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        if summary.discount_applied {
            println!("Reducere de 10% pentru plata până la 31 martie aplicată.");
        }
        println!();
    }
}

fn eligible_at(clock: &impl Clock) -> bool {
    let eligible = is_early_payment_eligible(clock);
    log::debug!("Early payment eligible at {}: {}", clock.now(), eligible);
    eligible
}

fn asset_rows(portfolio: &Portfolio) -> Vec<AssetRow> {
    portfolio
        .assets()
        .iter()
        .map(|a| AssetRow {
            id: a.id,
            kind: a.kind.to_string(),
            description: a.description.clone(),
            tax: fixed(a.tax(), 2),
            breakdown: a.result.breakdown.clone(),
        })
        .collect()
}

fn total_row(category: &str, amounts: &EarlyPaymentDiscount) -> TotalRow {
    TotalRow {
        category: category.to_string(),
        original: format_lei(amounts.original_tax),
        discount: format_lei(amounts.discount),
        payable: format_lei(amounts.final_tax),
    }
}

fn format_lei(amount: rust_decimal::Decimal) -> String {
    format!("{} lei", fixed(amount, 2))
}

/// Read a portfolio from a file, or stdin with "-"
fn read_portfolio(path: &Path) -> anyhow::Result<PortfolioInput> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        read_portfolio_json(io::Cursor::new(buffer))
    } else {
        let file = File::open(path)?;
        read_portfolio_json(BufReader::new(file))
    }
}
