use rust_decimal::Decimal;

/// Errors raised while assessing an asset.
///
/// Every variant carries enough context to be shown to the user as a
/// validation message; none of them is recovered inside the engine.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("no rate bracket for {category} with capacity {capacity} cm³")]
    InvalidRate { category: String, capacity: Decimal },
    #[error("unknown pollution norm: {0}")]
    InvalidNorm(String),
    #[error("unknown vehicle type: {0}")]
    UnknownVehicleType(String),
    #[error("unknown building type: {0}")]
    UnknownBuildingType(String),
    #[error("unknown special usage: {0}")]
    UnknownUsage(String),
    #[error("unknown land use category: {0}")]
    InvalidLandUse(String),
    #[error("unknown city zone: {0}")]
    UnknownZone(String),
    #[error("unknown city rank: {0}")]
    UnknownRank(String),
    #[error("unknown land tax scenario: {0}")]
    UnknownScenario(String),
    #[error("no coefficient for zone {zone} and rank {rank}")]
    InvalidZoneRank { zone: String, rank: String },
    #[error("scenario {scenario} requires: {}", .fields.join(", "))]
    MissingField {
        scenario: String,
        fields: Vec<&'static str>,
    },
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("{field} is too large to assess")]
    AmountTooLarge { field: &'static str },
    #[error("no asset with id {0}")]
    UnknownAsset(usize),
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, TaxError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(TaxError::NegativeAmount { field, value });
    }
    Ok(value)
}

/// Product of `factors`, failing with `AmountTooLarge` for `field` when it
/// does not fit in a `Decimal`
pub(crate) fn checked_product(
    field: &'static str,
    factors: &[Decimal],
) -> Result<Decimal, TaxError> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or(TaxError::AmountTooLarge { field })
}
