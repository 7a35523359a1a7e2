//! Early-payment discount (10 % when the yearly tax is paid in full by the
//! end of March).

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EARLY_PAYMENT_RATE: Decimal = dec!(0.10);

/// Romanian summer time, in force on the cutoff day
const CUTOFF_OFFSET_SECS: i32 = 3 * 3600;

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// First instant at which the discount no longer applies:
/// 1 April 2026 00:00 at UTC+03:00, i.e. the end of 31 March 2026.
pub fn early_payment_cutoff() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(CUTOFF_OFFSET_SECS).expect("offset within a day");
    offset
        .with_ymd_and_hms(2026, 4, 1, 0, 0, 0)
        .single()
        .expect("fixed offsets have no gaps")
}

/// True strictly before the cutoff
pub fn is_early_payment_eligible(clock: &impl Clock) -> bool {
    clock.now() < early_payment_cutoff()
}

/// Discount rate in force at the clock's current instant
pub fn early_payment_discount_rate(clock: &impl Clock) -> Decimal {
    if is_early_payment_eligible(clock) {
        EARLY_PAYMENT_RATE
    } else {
        Decimal::ZERO
    }
}

/// Amounts before and after the early-payment discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPaymentDiscount {
    #[schemars(with = "String")]
    pub original_tax: Decimal,
    #[schemars(with = "String")]
    pub discount: Decimal,
    #[schemars(with = "String")]
    pub final_tax: Decimal,
}

pub fn apply_early_payment_discount(tax: Decimal, apply: bool) -> EarlyPaymentDiscount {
    let discount = if apply {
        tax * EARLY_PAYMENT_RATE
    } else {
        Decimal::ZERO
    };
    EarlyPaymentDiscount {
        original_tax: tax,
        discount,
        final_tax: tax - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(rfc3339: &str) -> FixedClock {
        FixedClock(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn discount_applied() {
        let d = apply_early_payment_discount(dec!(1000), true);
        assert_eq!(d.original_tax, dec!(1000));
        assert_eq!(d.discount, dec!(100));
        assert_eq!(d.final_tax, dec!(900));
    }

    #[test]
    fn discount_not_applied() {
        let d = apply_early_payment_discount(dec!(1000), false);
        assert_eq!(
            d,
            EarlyPaymentDiscount {
                original_tax: dec!(1000),
                discount: dec!(0),
                final_tax: dec!(1000),
            }
        );
    }

    #[test]
    fn amounts_serialized_as_strings_matching_schema() {
        let json = serde_json::to_value(apply_early_payment_discount(dec!(1000), true)).unwrap();
        assert_eq!(json["originalTax"], "1000");
        assert_eq!(json["finalTax"], "900.00");

        let schema = serde_json::to_value(schemars::schema_for!(EarlyPaymentDiscount)).unwrap();
        for field in ["originalTax", "discount", "finalTax"] {
            assert_eq!(schema["properties"][field]["type"], "string");
        }
    }

    #[test]
    fn cutoff_is_end_of_march_in_bucharest_summer_time() {
        let cutoff = early_payment_cutoff().with_timezone(&Utc);
        assert_eq!(cutoff.to_rfc3339(), "2026-03-31T21:00:00+00:00");
    }

    #[test]
    fn eligible_strictly_before_cutoff() {
        let cutoff = early_payment_cutoff().with_timezone(&Utc);
        assert!(is_early_payment_eligible(&FixedClock(
            cutoff - Duration::nanoseconds(1)
        )));
        assert!(!is_early_payment_eligible(&FixedClock(cutoff)));
        assert!(!is_early_payment_eligible(&FixedClock(
            cutoff + Duration::seconds(1)
        )));
    }

    #[test]
    fn late_evening_of_march_31_local_time() {
        assert!(is_early_payment_eligible(&at("2026-03-31T23:59:59+03:00")));
        assert!(!is_early_payment_eligible(&at("2026-04-01T00:00:00+03:00")));
        assert!(is_early_payment_eligible(&at("2026-01-15T10:00:00+02:00")));
    }

    #[test]
    fn rate_follows_eligibility() {
        assert_eq!(
            early_payment_discount_rate(&at("2026-02-01T00:00:00Z")),
            dec!(0.10)
        );
        assert_eq!(
            early_payment_discount_rate(&at("2026-10-15T00:00:00Z")),
            dec!(0)
        );
    }
}
