//! Fixed-point rendering of aggregate values.
//!
//! Floats are rounded on their shortest decimal representation (the digits
//! `Display` prints), not on the binary value, so `2.005` renders as `"2.01"`.
//! Ties round away from zero.

use crate::error::{Error, Result};

/// Number of fractional digits in every rendered result.
pub const SCALE: usize = 2;

/// Render an integer aggregate with `SCALE` zero fractional digits.
pub fn format_integer(value: u128) -> String {
    format!("{}.{}", value, "0".repeat(SCALE))
}

/// Render a float aggregate rounded half-up to `SCALE` fractional digits.
pub fn format_float(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(Error::Arithmetic(format!(
            "cannot render non-finite value {}",
            value
        )));
    }
    // f64 Display never switches to exponent notation.
    round_half_up(&value.to_string(), SCALE)
}

/// Round a plain decimal string (`[-+]digits[.digits]`) half-up to `scale`
/// fractional digits.
pub fn round_half_up(repr: &str, scale: usize) -> Result<String> {
    let invalid = || Error::Arithmetic(format!("not a plain decimal: '{}'", repr));

    let (negative, unsigned) = match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr.strip_prefix('+').unwrap_or(repr)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    // Integer digits followed by exactly `scale` fractional digits.
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(scale))
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(scale)
        .is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - scale;
    let (int_digits, frac_digits) = kept.split_at(split);
    let mut out = String::with_capacity(kept.len() + 2);
    if negative && kept.iter().any(|d| *d != b'0') {
        out.push('-');
    }
    out.extend(int_digits.iter().map(|d| *d as char));
    if scale > 0 {
        out.push('.');
        out.extend(frac_digits.iter().map(|d| *d as char));
    }
    Ok(out)
}
