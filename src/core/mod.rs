pub mod assessment;
pub mod error;
pub mod format;
pub mod location;

// Flat public surface for domain types.
pub use assessment::{SelectOption, TaxResult};
pub use error::TaxError;
pub use location::{zone_rank_lookup, Rank, Zone, ZoneRankTable};
