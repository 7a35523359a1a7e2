//! Romanian local tax rules engine.
//!
//! Computes the yearly tax owed on vehicles, buildings and land parcels from
//! the published rate tables, together with a breakdown string showing every
//! step of the derivation.

pub mod core;
pub mod tax;

pub use crate::core::{Rank, SelectOption, TaxError, TaxResult, Zone};
pub use crate::tax::*;
