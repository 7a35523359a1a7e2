use clap::{Parser, Subcommand};

mod cmd;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "impozit", version, about = "Romanian local tax calculator (Law 239/2025)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tax for a single vehicle
    Vehicle(cmd::assess::VehicleCommand),
    /// Tax for a single building
    Building(cmd::assess::BuildingCommand),
    /// Tax for a single land parcel
    Land(cmd::assess::LandCommand),
    /// Assess every asset in a portfolio file and total them
    Portfolio(cmd::portfolio::PortfolioCommand),
    /// List accepted keys and labels
    Options(cmd::options::OptionsCommand),
    /// Print the JSON schema of inputs and results
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Vehicle(c) => c.exec(),
        Command::Building(c) => c.exec(),
        Command::Land(c) => c.exec(),
        Command::Portfolio(c) => c.exec(),
        Command::Options(c) => c.exec(),
        Command::Schema(c) => c.exec(),
    }
}
