//! # Decimal Rounding
//!
//! Reported emissions are rounded to a fixed number of decimal places:
//! kilograms to [`KG_DECIMALS`], tonnes to [`TONNE_DECIMALS`]. Compliance
//! totals are sums of these rounded figures, so the rule has to be exact
//! and identical everywhere.
//!
//! Rounding is performed on the shortest decimal string that round-trips to
//! the `f64` (Rust's `Display` form), not on the binary value. `500 × 0.20707`
//! is stored as `103.534999…` but displays as `103.535`; it rounds to
//! `103.54`, which is what a reader checking the arithmetic by hand expects.
//! The rounded digit string is parsed back into the nearest `f64`.

use serde::{Deserialize, Serialize};

/// Decimal places for emissions in kilograms CO2e.
pub const KG_DECIMALS: u32 = 2;

/// Decimal places for emissions in tonnes CO2e.
pub const TONNE_DECIMALS: u32 = 4;

/// Tie-breaking rule for a value exactly halfway between two candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero: `42.385 → 42.39`, `-2.5 → -3`.
    #[default]
    HalfAwayFromZero,
    /// Ties round to the even neighbour: `42.385 → 42.38`, `2.5 → 2`.
    HalfEven,
}

impl RoundingMode {
    /// The snake_case identifier; matches the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HalfAwayFromZero => "half_away_from_zero",
            Self::HalfEven => "half_even",
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round `value` to `places` decimal places under `mode`.
///
/// Non-finite values are returned unchanged.
pub fn round_decimal(value: f64, places: u32, mode: RoundingMode) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let repr = value.to_string();
    let (negative, magnitude) = split_sign(&repr);
    let (int_part, frac_part) = magnitude.split_once('.').unwrap_or((magnitude, ""));

    if frac_part.len() <= places as usize {
        return value;
    }

    round_digits(negative, int_part, frac_part, places, mode)
        .parse::<f64>()
        .unwrap_or(value)
}

/// Round `value / 10^shift` to `places` decimal places under `mode`.
///
/// The division happens on the decimal digits, so `2.05` shifted by 3 is
/// exactly `0.00205` and never the binary neighbour `0.0020499…`. Used for
/// kilogram to tonne conversion.
pub fn round_decimal_scaled(value: f64, shift: u32, places: u32, mode: RoundingMode) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let repr = value.to_string();
    let (negative, magnitude) = split_sign(&repr);
    let (int_part, frac_part) = magnitude.split_once('.').unwrap_or((magnitude, ""));

    let shift = shift as usize;
    let padded = format!("{int_part:0>width$}", width = shift + 1);
    let (int_part, moved) = padded.split_at(padded.len() - shift);
    let frac_part = format!("{moved}{frac_part}");

    round_digits(negative, int_part, &frac_part, places, mode)
        .parse::<f64>()
        .unwrap_or(value / 10f64.powi(shift as i32))
}

fn split_sign(repr: &str) -> (bool, &str) {
    match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr),
    }
}

/// Round an unsigned decimal `int_part.frac_part` and render it back,
/// sign included.
fn round_digits(
    negative: bool,
    int_part: &str,
    frac_part: &str,
    places: u32,
    mode: RoundingMode,
) -> String {
    let places = (places as usize).min(frac_part.len());
    let (kept, dropped) = frac_part.split_at(places);
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(kept.bytes())
        .map(|b| b - b'0')
        .collect();

    if rounds_up(&digits, dropped.as_bytes(), mode) {
        increment(&mut digits);
    }

    let split = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    if places > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

/// Decide whether the kept digits must be bumped by one unit in the last place.
fn rounds_up(kept: &[u8], dropped: &[u8], mode: RoundingMode) -> bool {
    let Some((&first, rest)) = dropped.split_first() else {
        return false;
    };
    match first.cmp(&b'5') {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => match mode {
            RoundingMode::HalfAwayFromZero => true,
            RoundingMode::HalfEven => {
                rest.iter().any(|&b| b != b'0') || kept.last().is_some_and(|d| d % 2 == 1)
            }
        },
    }
}

/// Add one to a big-endian decimal digit vector, growing it on overflow.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    const AWAY: RoundingMode = RoundingMode::HalfAwayFromZero;
    const EVEN: RoundingMode = RoundingMode::HalfEven;

    #[test]
    fn rounds_the_displayed_decimal_not_the_binary_value() {
        // 500 * 0.20707 is 103.534999... in binary.
        assert_eq!(round_decimal(500.0 * 0.20707, 2, AWAY), 103.54);
        // 100 * 0.42385 is 42.384999... in binary.
        assert_eq!(round_decimal(100.0 * 0.42385, 2, AWAY), 42.39);
    }

    #[test]
    fn half_even_breaks_ties_to_even_digit() {
        assert_eq!(round_decimal(42.385, 2, EVEN), 42.38);
        assert_eq!(round_decimal(103.535, 2, EVEN), 103.54);
        assert_eq!(round_decimal(2.5, 0, EVEN), 2.0);
        assert_eq!(round_decimal(3.5, 0, EVEN), 4.0);
        assert_eq!(round_decimal(-2.5, 0, EVEN), -2.0);
    }

    #[test]
    fn half_even_rounds_up_past_the_tie() {
        assert_eq!(round_decimal(42.3851, 2, EVEN), 42.39);
    }

    #[test]
    fn half_away_from_zero_is_symmetric() {
        assert_eq!(round_decimal(2.5, 0, AWAY), 3.0);
        assert_eq!(round_decimal(-2.5, 0, AWAY), -3.0);
        assert_eq!(round_decimal(-103.535, 2, AWAY), -103.54);
    }

    #[test]
    fn carry_propagates_into_integer_part() {
        assert_eq!(round_decimal(9.995, 2, AWAY), 10.0);
        assert_eq!(round_decimal(0.99995, 4, AWAY), 1.0);
        assert_eq!(round_decimal(999.999, 2, AWAY), 1000.0);
    }

    #[test]
    fn short_values_are_untouched() {
        assert_eq!(round_decimal(129.6, 2, AWAY), 129.6);
        assert_eq!(round_decimal(0.0, 2, AWAY), 0.0);
        assert_eq!(round_decimal(1080.0, 2, AWAY), 1080.0);
    }

    #[test]
    fn tonne_precision() {
        assert_eq!(round_decimal(0.103535, TONNE_DECIMALS, AWAY), 0.1035);
        assert_eq!(round_decimal(0.042385, TONNE_DECIMALS, AWAY), 0.0424);
        assert_eq!(round_decimal(0.1296, TONNE_DECIMALS, AWAY), 0.1296);
    }

    #[test]
    fn scaled_rounding_shifts_the_decimal_digits() {
        // 2.05 / 1000.0 is 0.0020499... in binary, 1.05 / 1000.0 is 0.00105000...2.
        assert_eq!(round_decimal_scaled(2.05, 3, TONNE_DECIMALS, AWAY), 0.0021);
        assert_eq!(round_decimal_scaled(1.05, 3, TONNE_DECIMALS, AWAY), 0.0011);
        assert_eq!(round_decimal_scaled(2.55, 3, TONNE_DECIMALS, AWAY), 0.0026);
        assert_eq!(round_decimal_scaled(2.55, 3, TONNE_DECIMALS, EVEN), 0.0026);
        assert_eq!(round_decimal_scaled(2.45, 3, TONNE_DECIMALS, EVEN), 0.0024);
    }

    #[test]
    fn scaled_rounding_handles_wide_and_signed_values() {
        assert_eq!(round_decimal_scaled(270.56, 3, TONNE_DECIMALS, AWAY), 0.2706);
        assert_eq!(round_decimal_scaled(12345.0, 3, TONNE_DECIMALS, AWAY), 12.345);
        assert_eq!(round_decimal_scaled(-2.05, 3, TONNE_DECIMALS, AWAY), -0.0021);
        assert_eq!(round_decimal_scaled(999.95, 3, TONNE_DECIMALS, AWAY), 1.0);
        assert_eq!(round_decimal_scaled(0.0, 3, TONNE_DECIMALS, AWAY), 0.0);
        assert!(round_decimal_scaled(f64::NAN, 3, TONNE_DECIMALS, AWAY).is_nan());
    }

    #[test]
    fn small_magnitudes_round_to_zero() {
        assert_eq!(round_decimal(0.004, 2, AWAY), 0.0);
        assert_eq!(round_decimal(0.005, 2, AWAY), 0.01);
        assert_eq!(round_decimal(1e-9, 4, AWAY), 0.0);
    }

    #[test]
    fn non_finite_passthrough() {
        assert!(round_decimal(f64::NAN, 2, AWAY).is_nan());
        assert_eq!(round_decimal(f64::INFINITY, 2, AWAY), f64::INFINITY);
    }

    #[test]
    fn mode_serde_form() {
        assert_eq!(
            serde_json::to_string(&RoundingMode::HalfEven).unwrap(),
            "\"half_even\""
        );
        assert_eq!(RoundingMode::default(), RoundingMode::HalfAwayFromZero);
    }
}
