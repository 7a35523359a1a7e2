//! Options command - list accepted keys and their labels

use clap::{Args, ValueEnum};
use impozit::options;
use impozit::SelectOption;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct OptionsCommand {
    /// Which list to show. Shows every list if not specified.
    #[arg(value_enum)]
    list: Option<OptionList>,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionList {
    VehicleTypes,
    EuroNorms,
    BuildingTypes,
    CityRanks,
    CityZones,
    LandScenarios,
    LandUse,
}

impl OptionList {
    const ALL: [OptionList; 7] = [
        OptionList::VehicleTypes,
        OptionList::EuroNorms,
        OptionList::BuildingTypes,
        OptionList::CityRanks,
        OptionList::CityZones,
        OptionList::LandScenarios,
        OptionList::LandUse,
    ];

    fn name(self) -> &'static str {
        match self {
            OptionList::VehicleTypes => "vehicle_types",
            OptionList::EuroNorms => "euro_norms",
            OptionList::BuildingTypes => "building_types",
            OptionList::CityRanks => "city_ranks",
            OptionList::CityZones => "city_zones",
            OptionList::LandScenarios => "land_scenarios",
            OptionList::LandUse => "land_use_categories",
        }
    }

    fn options(self) -> Vec<SelectOption> {
        match self {
            OptionList::VehicleTypes => options::vehicle_types(),
            OptionList::EuroNorms => options::euro_norms(),
            OptionList::BuildingTypes => options::building_types(),
            OptionList::CityRanks => options::city_ranks(),
            OptionList::CityZones => options::city_zones(),
            OptionList::LandScenarios => options::land_tax_scenarios(),
            OptionList::LandUse => options::land_use_categories(),
        }
    }
}

#[derive(Debug, Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct OptionListOutput {
    name: &'static str,
    options: Vec<SelectOption>,
}

impl OptionsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let lists: Vec<OptionList> = match self.list {
            Some(list) => vec![list],
            None => OptionList::ALL.to_vec(),
        };

        if self.json {
            let output: Vec<_> = lists
                .iter()
                .map(|l| OptionListOutput {
                    name: l.name(),
                    options: l.options(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        for list in lists {
            println!();
            println!("{}", list.name());
            let rows: Vec<OptionRow> = list
                .options()
                .into_iter()
                .map(|o| OptionRow {
                    value: o.value,
                    label: o.label,
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
        println!();
        Ok(())
    }
}
