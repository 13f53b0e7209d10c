//! Lenient numeric parsing for operator input and stored metadata.
//!
//! Stored values and typed input are free text, so parsing takes the longest
//! leading decimal number (`"12 hp"` parses as 12) and reports anything else
//! as absent rather than failing.

/// Parse the longest leading decimal float in `input`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, and an optional exponent. Returns `None` when no
/// number is present or the result is not finite.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse the operator's shared delta.
///
/// Unparseable input counts as 0, and the value is truncated toward zero
/// (`"-7.9"` → -7) before it reaches the scaler.
pub fn parse_delta(input: &str) -> i64 {
    parse_float_prefix(input).map_or(0, |value| value.trunc() as i64)
}
