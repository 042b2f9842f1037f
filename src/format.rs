use serde::{Deserialize, Serialize};

use crate::map::enrich::EnrichedRecord;
use crate::map::render::BubbleFeature;

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Formats metric values to a fixed number of significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub significant_digits: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat { significant_digits: 3 }
    }
}

/// Largest digit count an `f64` can meaningfully show.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Decimal exponents laid out positionally; anything outside uses `e` notation.
const POSITIONAL_EXPONENTS: std::ops::RangeInclusive<i32> = -7..=20;

impl NumberFormat {
    pub fn new(significant_digits: u32) -> Self {
        NumberFormat {
            significant_digits: significant_digits.clamp(1, MAX_SIGNIFICANT_DIGITS),
        }
    }

    /// Digit count actually used; deserialized values may be out of range.
    pub fn digits(&self) -> usize {
        self.significant_digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as usize
    }

    /// `1234.5` → `"1230"`, `0.012345` → `"0.0123"`, `42` → `"42.0"`,
    /// `1e-310` → `"1.00e-310"`.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        if value == 0.0 {
            return "0".to_string();
        }
        let digits = self.digits();

        // Let the formatter round; it also carries into a new leading digit
        // (999.6 → 1.00e3).
        let scientific = format!("{:.*e}", digits - 1, value);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return scientific;
        };
        let Ok(exponent) = exponent.parse::<i32>() else {
            return scientific;
        };
        if !POSITIONAL_EXPONENTS.contains(&exponent) {
            return scientific;
        }

        let (sign, mantissa) = match mantissa.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", mantissa),
        };
        let significand: String = mantissa.chars().filter(|c| *c != '.').collect();

        let body = if exponent < 0 {
            format!("0.{}{significand}", "0".repeat((-exponent - 1) as usize))
        } else {
            let int_len = exponent as usize + 1;
            if int_len >= significand.len() {
                format!("{significand}{}", "0".repeat(int_len - significand.len()))
            } else {
                format!("{}.{}", &significand[..int_len], &significand[int_len..])
            }
        };
        format!("{sign}{body}")
    }
}

// ---------------------------------------------------------------------------
// Hover labels
// ---------------------------------------------------------------------------

/// Builds the hover text renderers show for countries and bubbles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TooltipFormatter {
    pub number: NumberFormat,
}

impl TooltipFormatter {
    pub fn new(number: NumberFormat) -> Self {
        TooltipFormatter { number }
    }

    /// Country name and its primary metric.
    pub fn country_label(&self, record: &EnrichedRecord) -> String {
        format!("{}\n{}", record.record.name, self.number.format(record.record.m1))
    }

    /// Bubble name and its secondary metric.
    pub fn bubble_label(&self, bubble: &BubbleFeature) -> String {
        format!("{}\n{}", bubble.name, self.number.format(bubble.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_significant_digits() {
        let f = NumberFormat::default();
        assert_eq!(f.format(1234.5), "1230");
        assert_eq!(f.format(0.012345), "0.0123");
        assert_eq!(f.format(42.0), "42.0");
        assert_eq!(f.format(-7.256), "-7.26");
        assert_eq!(f.format(100.0), "100");
        assert_eq!(f.format(0.0), "0");
    }

    #[test]
    fn carry_into_next_magnitude() {
        let f = NumberFormat::default();
        assert_eq!(f.format(999.6), "1000");
        assert_eq!(f.format(9.996), "10.0");
    }

    #[test]
    fn precision_is_configurable() {
        assert_eq!(NumberFormat::new(1).format(1234.5), "1000");
        assert_eq!(NumberFormat::new(5).format(3.14159265), "3.1416");
        assert_eq!(NumberFormat::new(0).format(56.0), "60");
        assert_eq!(NumberFormat::new(3).format(0.00012345), "0.000123");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_notation() {
        let f = NumberFormat::default();
        assert_eq!(f.format(1e-310), "1.00e-310");
        assert_eq!(f.format(-2.5e-9), "-2.50e-9");
        assert_eq!(f.format(6.02e23), "6.02e23");
        assert_eq!(f.format(f64::MAX), "1.80e308");
    }

    #[test]
    fn deserialized_digit_count_is_clamped() {
        let f: NumberFormat = serde_json::from_str(r#"{"significant_digits": 400}"#).unwrap();
        assert_eq!(f.digits(), MAX_SIGNIFICANT_DIGITS as usize);
        assert_eq!(f.format(1.5), "1.5000000000000000");

        let f: NumberFormat = serde_json::from_str(r#"{"significant_digits": 0}"#).unwrap();
        assert_eq!(f.format(56.0), "60");
    }
}
