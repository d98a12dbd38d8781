/// Formats `amount` as US currency: a leading `$`, thousands separators and two decimals.
///
/// Negative amounts are written as `-$1,234.50`. Non-finite amounts have no currency form and
/// are written as they are.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Rounding may turn a tiny negative amount into zero.
    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_keeps_two_decimals() {
        assert_eq!(format_usd(185_432.1), "$185,432.10");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(999.0), "$999.00");
        assert_eq!(format_usd(1000.0), "$1,000.00");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn rounding_carries_into_thousands() {
        assert_eq!(format_usd(999.999), "$1,000.00");
    }

    #[test]
    fn negative_amounts() {
        assert_eq!(format_usd(-12_345.678), "-$12,345.68");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn non_finite_amounts() {
        assert_eq!(format_usd(f64::NAN), "NaN");
        assert_eq!(format_usd(f64::INFINITY), "inf");
    }
}
