use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of a single assessment: the amount owed and how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxResult {
    /// Payable amount in lei, never negative, as a decimal string
    #[schemars(with = "String")]
    pub tax: Decimal,
    /// Every multiplicative step in the order it was applied
    pub breakdown: String,
}

impl TaxResult {
    pub fn new(tax: Decimal, breakdown: impl Into<String>) -> Self {
        TaxResult {
            tax,
            breakdown: breakdown.into(),
        }
    }
}

/// A `{value, label}` pair for populating selection controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        SelectOption { value, label }
    }
}
