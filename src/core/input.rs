//! Coercion of raw form text into typed values.
//!
//! Form fields are permissive: a leading numeric prefix is used and any
//! trailing junk is ignored ("12.5kg" reads as 12.5). Text without a numeric
//! prefix reads as zero, so the calculators never see a parse failure.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a decimal number from the start of `text`, or zero.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction (`"3"`, `"3."`, `".5"`) and an optional exponent (`"1e3"`).
/// Values outside the range of [`Decimal`] also read as zero.
pub fn parse_number(text: &str) -> Decimal {
    let Some(prefix) = numeric_prefix(text) else {
        return Decimal::ZERO;
    };

    let mut normalized = String::with_capacity(prefix.int.len() + prefix.frac.len() + 2);
    if prefix.negative {
        normalized.push('-');
    }
    normalized.push_str(if prefix.int.is_empty() { "0" } else { prefix.int });
    if !prefix.frac.is_empty() {
        normalized.push('.');
        normalized.push_str(prefix.frac);
    }

    let parsed = match prefix.exponent {
        Some(exp) => Decimal::from_scientific(&format!("{normalized}e{exp}")),
        None => Decimal::from_str(&normalized),
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Parse a whole number from the start of `text`, or zero.
///
/// A fractional part is ignored (`"30.9"` reads as 30). Values beyond the
/// range of `i64` saturate.
pub fn parse_integer(text: &str) -> i64 {
    let Some((negative, digits)) = integer_prefix(text) else {
        return 0;
    };
    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Parse a stored sequence counter value.
///
/// Returns `None` for text without a leading digit run or with a negative
/// sign, so a corrupted counter restarts at 1 instead of producing a
/// malformed id.
pub fn parse_sequence(text: &str) -> Option<u64> {
    match integer_prefix(text)? {
        (true, _) => None,
        (false, digits) => Some(digits.parse::<u64>().unwrap_or(u64::MAX)),
    }
}

struct NumericPrefix<'a> {
    negative: bool,
    int: &'a str,
    frac: &'a str,
    exponent: Option<&'a str>,
}

fn numeric_prefix(text: &str) -> Option<NumericPrefix<'_>> {
    let s = text.trim_start();
    let (negative, rest) = split_sign(s);

    let int_len = digit_run(rest);
    let int = &rest[..int_len];
    let mut rest = &rest[int_len..];

    let mut frac = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_len = digit_run(after_dot);
        frac = &after_dot[..frac_len];
        if !int.is_empty() || !frac.is_empty() {
            rest = &after_dot[frac_len..];
        }
    }

    if int.is_empty() && frac.is_empty() {
        return None;
    }

    let mut exponent = None;
    if let Some(after_e) = rest.strip_prefix(['e', 'E']) {
        let sign_len = usize::from(after_e.starts_with(['+', '-']));
        let exp_digits = digit_run(&after_e[sign_len..]);
        if exp_digits > 0 {
            exponent = Some(&after_e[..sign_len + exp_digits]);
        }
    }

    Some(NumericPrefix {
        negative,
        int,
        frac,
        exponent,
    })
}

fn integer_prefix(text: &str) -> Option<(bool, &str)> {
    let s = text.trim_start();
    let (negative, rest) = split_sign(s);
    let len = digit_run(rest);
    (len > 0).then(|| (negative, &rest[..len]))
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
