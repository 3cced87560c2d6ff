//! Lenient numeric decoding for service-produced JSON.
//!
//! The reasoning service types every number as a JSON "number", so integral
//! fields may arrive as `3` or `3.0`. Both are accepted; fractional or
//! negative round numbers are not.

use serde::{Deserialize, Deserializer, de::Error};

pub(crate) fn round_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    integral_round(value).ok_or_else(|| {
        D::Error::custom(format!("expected a non-negative whole round number, got {value}"))
    })
}

pub(crate) fn integral_round(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_reals_are_rounds() {
        assert_eq!(integral_round(3.0), Some(3));
        assert_eq!(integral_round(0.0), Some(0));
    }

    #[test]
    fn fractional_negative_and_non_finite_are_rejected() {
        assert_eq!(integral_round(2.5), None);
        assert_eq!(integral_round(-1.0), None);
        assert_eq!(integral_round(f64::NAN), None);
        assert_eq!(integral_round(f64::INFINITY), None);
    }
}
