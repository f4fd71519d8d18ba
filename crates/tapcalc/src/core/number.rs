//! Entry text parsing, result normalization and display grouping
//!
//! Entry text is kept as typed so trailing zeros and a dangling `.` survive
//! until the next evaluation. Only computed values go through
//! [`normalize`].

/// Entry shown after an invalid evaluation
pub const NAN: &str = "NaN";
/// Entry shown for a positive overflow
pub const INFINITY: &str = "∞";
/// Entry shown for a negative overflow
pub const NEG_INFINITY: &str = "-∞";

/// Returns true for the three non-numeric entry values
#[must_use]
pub fn is_sentinel(entry: &str) -> bool {
    matches!(entry, NAN | INFINITY | NEG_INFINITY)
}

/// Parses entry text into a finite number.
///
/// Sentinels and anything `f64` would read as non-finite give `None`.
#[must_use]
pub fn parse_entry(entry: &str) -> Option<f64> {
    if is_sentinel(entry) {
        return None;
    }
    entry.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Counts the digits of an entry, ignoring sign and decimal point
#[must_use]
pub fn digit_count(entry: &str) -> usize {
    entry.chars().filter(char::is_ascii_digit).count()
}

/// Rounds a finite value to `precision` decimal places.
///
/// Goes through decimal text so that `0.1 + 0.2` comes back as `0.3`
/// instead of drifting on a scaled multiply.
#[must_use]
pub fn round_to(value: f64, precision: usize) -> f64 {
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Converts a computed value into entry text.
///
/// Non-finite values become sentinels. Finite values are rounded to
/// `precision` decimals, then to `significant` significant digits, and
/// printed without exponent. Negative zero prints as `0`.
#[must_use]
pub fn normalize(value: f64, precision: usize, significant: usize) -> String {
    if value.is_nan() {
        return NAN.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { INFINITY } else { NEG_INFINITY }.to_string();
    }

    let rounded = round_to(value, precision);
    let digits = significant.saturating_sub(1);
    let clamped: f64 = format!("{rounded:.digits$e}").parse().unwrap_or(rounded);

    if clamped == 0.0 {
        "0".to_string()
    } else {
        format!("{clamped}")
    }
}

/// Groups the integer portion of entry text with `separator`.
///
/// The fractional portion, including a trailing `.`, is appended untouched.
/// Sentinels pass through.
#[must_use]
pub fn format_display(entry: &str, separator: &str) -> String {
    if is_sentinel(entry) {
        return entry.to_string();
    }

    let (sign, unsigned) = match entry.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", entry),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(entry.len() + integer.len() / 3 * separator.len());
    out.push_str(sign);
    out.push_str(&group_digits(integer, separator));
    if let Some(frac) = fraction {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
