//! Number formatting used by the report operations.

/// Formats `value` with `precision` significant digits, following the rules of C's `%g`.
///
/// Trailing zeros are dropped. Scientific notation is used when the decimal exponent is
/// below -4 or at least `precision`.
pub fn format_significant(value: f64, precision: usize) -> String {
    let precision = precision.max(1);

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the requested digits may bump the exponent (9.99 -> 1.0e1), so take the
    // exponent from the rounded scientific rendering.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Formats `value` in fixed-point notation with `decimals` digits, right-aligned in `width`.
pub fn format_fixed(value: f64, width: usize, decimals: usize) -> String {
    format!("{:>width$.decimals$}", value, width = width, decimals = decimals)
}

/// Strips trailing zeros of a fractional part, and the point itself if nothing remains.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
