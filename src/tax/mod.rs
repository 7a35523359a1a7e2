pub mod building;
pub mod discount;
pub mod land;
pub mod options;
pub mod portfolio;
pub mod tables;
pub mod vehicle;

pub use building::{
    building_type_details, calculate_building_tax, BuildingTaxInput, BuildingType, SpecialUsage,
};
pub use discount::{
    apply_early_payment_discount, early_payment_cutoff, early_payment_discount_rate,
    is_early_payment_eligible, Clock, EarlyPaymentDiscount, FixedClock, SystemClock,
};
pub use land::{calculate_land_tax, LandParcel, LandScenario, LandTaxInput, LandUse};
pub use portfolio::{
    read_portfolio_json, Asset, AssetInput, AssetKind, Portfolio, PortfolioInput,
    PortfolioSummary,
};
pub use vehicle::{calculate_vehicle_tax, EuroNorm, VehicleTaxInput, VehicleType};
