/// Builds the value of a decimal literal digit by digit.
///
/// The integer part is accumulated as `n = n * 10 + digit` and the fractional
/// part as `n += digit * weight`, with `weight` starting at `0.1` and divided
/// by ten after every digit. No string-to-float conversion is involved, so the
/// result only depends on IEEE arithmetic and is identical on every platform.
///
/// The lexeme must match `[0-9]*(\.[0-9]*)?`; a bare `.` yields `0`.
/// Characters other than ASCII digits and a single `.` are ignored.
///
/// ## Parameters
/// - `lexeme`: The raw literal text as it appeared in the source.
///
/// ## Returns
/// The accumulated `f64` value.
///
/// ## Example
/// ```
/// use exprcalc::util::num::accumulate_decimal;
///
/// assert_eq!(accumulate_decimal("42"), 42.0);
/// assert_eq!(accumulate_decimal("3.25"), 3.25);
/// assert_eq!(accumulate_decimal(".5"), 0.5);
/// assert_eq!(accumulate_decimal("."), 0.0);
/// ```
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn accumulate_decimal(lexeme: &str) -> f64 {
    let (integer, fraction) = lexeme.split_once('.').unwrap_or((lexeme, ""));

    let mut value = integer.chars()
                           .filter_map(|c| c.to_digit(10))
                           .fold(0.0, |n, digit| n * 10.0 + f64::from(digit));

    let mut weight = 0.1;
    for digit in fraction.chars().filter_map(|c| c.to_digit(10)) {
        value += weight * f64::from(digit);
        weight /= 10.0;
    }

    value
}

/// Number of significant digits kept by [`format_number`].
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Formats a number with the fixed, locale-independent representation used by
/// every diagnostic output (token dumps, postfix programs, tree labels) and by
/// the printed results.
///
/// The value is rounded to [`SIGNIFICANT_DIGITS`] significant digits and then
/// printed in plain decimal notation without trailing zeros. Rounding hides
/// the representation error of digit-by-digit accumulation, so a scanned
/// literal such as `0.3` prints back as `0.3`. Infinities and `NaN` print as
/// `inf`, `-inf` and `NaN`.
///
/// ## Example
/// ```
/// use exprcalc::util::num::format_number;
///
/// assert_eq!(format_number(3.25), "3.25");
/// assert_eq!(format_number(-1.0), "-1");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }

    let rounded = format!("{value:.prec$e}", prec = SIGNIFICANT_DIGITS - 1);
    let rounded = rounded.parse::<f64>().unwrap_or(value);
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_part_is_accumulated_left_to_right() {
        assert_eq!(accumulate_decimal("0"), 0.0);
        assert_eq!(accumulate_decimal("7"), 7.0);
        assert_eq!(accumulate_decimal("1234567"), 1_234_567.0);
    }

    #[test]
    fn fractional_part_uses_decreasing_weights() {
        assert_eq!(accumulate_decimal("0.5"), 0.5);
        assert_eq!(accumulate_decimal("2.5"), 2.5);
        assert_eq!(accumulate_decimal("10.75"), 10.75);
    }

    #[test]
    fn trailing_or_leading_dot_is_accepted() {
        assert_eq!(accumulate_decimal("8."), 8.0);
        assert_eq!(accumulate_decimal(".25"), 0.25);
        assert_eq!(accumulate_decimal("."), 0.0);
    }

    #[test]
    fn format_is_plain_decimal() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn format_keeps_fifteen_significant_digits() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.333333333333333");
        assert_eq!(format_number(2.0_f64.sqrt()), "1.4142135623731");
        assert_eq!(format_number(123_456_789_012_345_678.0), "123456789012346000");
        assert_eq!(format_number(-0.000_012_5), "-0.0000125");
    }

    #[test]
    fn scanned_literal_round_trips_through_format() {
        for literal in ["3.25", "0.5", "42", "1.5", "12.5", "0.1", "1.1", "0.3", "0.7", "0.123",
                        "100.125", "2.675", "99.99"]
        {
            assert_eq!(format_number(accumulate_decimal(literal)), literal);
        }
    }
}
