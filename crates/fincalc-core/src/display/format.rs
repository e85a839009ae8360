use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CalcError;
use crate::input::RawInput;

const DEFAULT_MAX_FRACTION_DIGITS: u32 = 3;

// ---------------------------------------------------------------------------
// Grouping strategies
// ---------------------------------------------------------------------------

/// Strategy for splitting the integer digits of a number into groups.
pub trait DigitGrouping {
    /// Insert `separator` into a run of ASCII digits (no sign, no fraction).
    fn group(&self, digits: &str, separator: char) -> String;
}

/// Built-in grouping conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// Groups of three: 10,000,000
    #[default]
    Western,
    /// Three, then twos (lakh/crore): 1,00,00,000
    Indian,
    /// No separators
    None,
}

impl GroupingStyle {
    /// (first group size from the right, size of every later group)
    fn sizes(self) -> Option<(usize, usize)> {
        match self {
            GroupingStyle::Western => Some((3, 3)),
            GroupingStyle::Indian => Some((3, 2)),
            GroupingStyle::None => None,
        }
    }
}

impl DigitGrouping for GroupingStyle {
    fn group(&self, digits: &str, separator: char) -> String {
        match self.sizes() {
            Some((primary, secondary)) => group_digits(digits, primary, secondary, separator),
            None => digits.to_string(),
        }
    }
}

impl FromStr for GroupingStyle {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "western" | "en-us" | "en-gb" => Ok(GroupingStyle::Western),
            "indian" | "en-in" | "hi-in" => Ok(GroupingStyle::Indian),
            "none" | "plain" => Ok(GroupingStyle::None),
            _ => Err(CalcError::InvalidInput {
                field: "locale".into(),
                reason: format!("unknown grouping style '{s}'"),
            }),
        }
    }
}

fn group_digits(digits: &str, primary: usize, secondary: usize, separator: char) -> String {
    if digits.len() <= primary || secondary == 0 {
        return digits.to_string();
    }

    let (mut rest, last) = digits.split_at(digits.len() - primary);
    let mut groups = vec![last];
    while rest.len() > secondary {
        let (head, tail) = rest.split_at(rest.len() - secondary);
        groups.push(tail);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();

    groups.join(&separator.to_string())
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Locale policy for rendering numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat<G = GroupingStyle> {
    pub grouping: G,
    pub group_separator: char,
    pub decimal_separator: char,
    /// Fractional digits are rounded to at most this many; trailing zeros
    /// are dropped.
    pub max_fraction_digits: u32,
}

impl NumberFormat<GroupingStyle> {
    pub fn western() -> Self {
        Self::new(GroupingStyle::Western)
    }

    pub fn indian() -> Self {
        Self::new(GroupingStyle::Indian)
    }
}

impl Default for NumberFormat<GroupingStyle> {
    fn default() -> Self {
        Self::western()
    }
}

impl<G: DigitGrouping> NumberFormat<G> {
    pub fn new(grouping: G) -> Self {
        NumberFormat {
            grouping,
            group_separator: ',',
            decimal_separator: '.',
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
        }
    }

    /// Render a number, or numeric text, for display.
    ///
    /// Text is read the way a lenient float parser would: leading
    /// whitespace is skipped and the longest numeric prefix is used, so
    /// `"1322.68"` and `"1322.68 /mo"` both work and `"abc"` renders as
    /// `NaN`. Never panics.
    pub fn format(&self, value: impl Into<RawInput>) -> String {
        let number = match value.into() {
            RawInput::Number(n) => n,
            RawInput::Text(s) => parse_float_prefix(&s),
        };
        self.format_f64(number)
    }

    pub fn format_f64(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let plain = self.round_plain(value);
        let (negative, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, plain.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&self.grouping.group(int_part, self.group_separator));
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// Rounded, ungrouped decimal text with trailing zeros removed.
    fn round_plain(&self, value: f64) -> String {
        match Decimal::from_f64(value) {
            Some(d) => {
                let rounded = d
                    .round_dp_with_strategy(
                        self.max_fraction_digits,
                        RoundingStrategy::MidpointAwayFromZero,
                    )
                    .normalize();
                if rounded.is_zero() {
                    "0".to_string()
                } else {
                    rounded.to_string()
                }
            }
            // Beyond Decimal's range; f64 formatting is exact enough here.
            None => {
                let s = format!("{:.*}", self.max_fraction_digits as usize, value);
                if s.contains('.') {
                    s.trim_end_matches('0').trim_end_matches('.').to_string()
                } else {
                    s
                }
            }
        }
    }
}

/// Format with the default (Western) locale.
pub fn format_number(value: impl Into<RawInput>) -> String {
    NumberFormat::<GroupingStyle>::default().format(value)
}

/// Longest numeric prefix of `text` as a float, or NaN when there is none.
fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            end = j + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
