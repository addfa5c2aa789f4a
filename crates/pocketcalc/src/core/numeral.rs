//! Conversions between display numerals and `f64`
//!
//! Numbers are rendered with the shortest digit string that round-trips,
//! switching to exponent form below `1e-6` and from `1e21` upwards. This is
//! the same text a browser prints for a number, so results typed on one
//! calculator read identically on another.

/// Largest decimal exponent still written out positionally
const MAX_POSITIONAL_EXPONENT: i32 = 21;
/// Smallest decimal exponent still written out positionally
const MIN_POSITIONAL_EXPONENT: i32 = -6;

/// Parses display text into a finite number
///
/// Returns `None` for anything that is not a finite numeral, including the
/// error marker.
#[must_use]
pub fn parse(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Renders a number as display text
#[must_use]
pub fn to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Negative zero prints as plain zero
        return "0".to_string();
    }

    let (digits, exponent) = decompose(value.abs());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", layout(&digits, exponent))
}

/// Renders a number in exponent form with a fixed count of fraction digits
///
/// Matches `Number.prototype.toExponential`, including ties rounding away
/// from zero: `1.2346e+9`, `5.00e-7`.
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return to_text(value);
    }
    let (digits, exponent) = if value == 0.0 {
        (vec![0], 0)
    } else {
        exact_digits(value.abs())
    };
    let (digits, exponent) = round_digits(&digits, exponent, fraction_digits + 1, Tie::Up);

    let text = digit_string(&digits);
    let (lead, rest) = text.split_at(1);
    let point = if rest.is_empty() { "" } else { "." };
    let sign = if value < 0.0 { "-" } else { "" };
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{lead}{point}{rest}e{exp_sign}{}", exponent.abs())
}

/// How a digit string exactly halfway between two candidates is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tie {
    /// Towards the larger magnitude
    Up,
    /// Towards an even last digit
    Even,
}

/// Splits a positive finite number into its significant digits and the
/// position of the decimal point relative to them.
///
/// `value == 0.d1d2…dk × 10^exponent`
///
/// The digits are the fewest that read back as `value`. When two such digit
/// strings exist, the one nearer the exact binary value wins, and an exact
/// tie goes to the even last digit.
fn decompose(value: f64) -> (String, i32) {
    // `{:e}` yields a shortest round-trip mantissa, e.g. `1.2345e-7`
    let (shortest, shortest_exp) = split_scientific(&format!("{value:e}"));
    let (exact, exact_exp) = exact_digits(value);
    let (mut nearest, nearest_exp) = round_digits(&exact, exact_exp, shortest.len(), Tie::Even);
    trim_zeros(&mut nearest);

    let (digits, exponent) = if reads_back(&nearest, nearest_exp, value) {
        (nearest, nearest_exp)
    } else {
        (shortest, shortest_exp)
    };
    (digit_string(&digits), exponent + 1)
}

/// Every significant digit of a positive finite number, with the decimal
/// exponent of the leading one
fn exact_digits(value: f64) -> (Vec<u8>, i32) {
    // No f64 has more than 767 significant digits
    split_scientific(&format!("{value:.800e}"))
}

/// Reads `d.ddd…e±x` into digit values (trailing zeros dropped) and `x`
fn split_scientific(text: &str) -> (Vec<u8>, i32) {
    let (mantissa, exp) = text.split_once('e').unwrap_or((text, "0"));
    let mut digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    trim_zeros(&mut digits);
    (digits, exp.parse().unwrap_or(0))
}

/// Rounds `d.ddd… × 10^exponent` to `keep` significant digits
///
/// A carry out of the leading digit bumps the exponent.
fn round_digits(digits: &[u8], exponent: i32, keep: usize, tie: Tie) -> (Vec<u8>, i32) {
    let mut head: Vec<u8> = digits.iter().copied().take(keep).collect();
    head.resize(keep.max(1), 0);
    let tail = digits.get(keep..).unwrap_or_default();

    let round_up = match tail.split_first() {
        None => false,
        Some((&5, rest)) if rest.iter().all(|&d| d == 0) => match tie {
            Tie::Up => true,
            Tie::Even => head.last().is_some_and(|d| d % 2 == 1),
        },
        Some((&first, _)) => first > 5,
    };
    if !round_up {
        return (head, exponent);
    }

    for digit in head.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return (head, exponent);
        }
    }
    // All nines: 9.99 becomes 10.0
    head.insert(0, 1);
    head.pop();
    (head, exponent + 1)
}

/// Whether `d.ddd… × 10^exponent` parses back to exactly `value`
fn reads_back(digits: &[u8], exponent: i32, value: f64) -> bool {
    let scale = exponent - (digits.len() as i32 - 1);
    format!("{}e{scale}", digit_string(digits))
        .parse::<f64>()
        .is_ok_and(|parsed| parsed == value)
}

fn trim_zeros(digits: &mut Vec<u8>) {
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
}

fn digit_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn layout(digits: &str, exponent: i32) -> String {
    let k = digits.len() as i32;

    if k <= exponent && exponent <= MAX_POSITIONAL_EXPONENT {
        return format!("{digits}{}", "0".repeat((exponent - k) as usize));
    }
    if 0 < exponent && exponent <= MAX_POSITIONAL_EXPONENT {
        let (int_part, frac_part) = digits.split_at(exponent as usize);
        return format!("{int_part}.{frac_part}");
    }
    if MIN_POSITIONAL_EXPONENT < exponent && exponent <= 0 {
        return format!("0.{}{digits}", "0".repeat((-exponent) as usize));
    }

    let e = exponent - 1;
    let exp_sign = if e < 0 { '-' } else { '+' };
    let (lead, rest) = digits.split_at(1);
    if rest.is_empty() {
        format!("{lead}e{exp_sign}{}", e.abs())
    } else {
        format!("{lead}.{rest}e{exp_sign}{}", e.abs())
    }
}
