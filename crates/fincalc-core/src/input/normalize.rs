use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CalcError;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A field edit as it arrives from a text box or a slider.
///
/// Deserializes untagged, so both `100000` and `"1,00,000"` are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Number(f64),
    Text(String),
}

impl From<f64> for RawInput {
    fn from(n: f64) -> Self {
        RawInput::Number(n)
    }
}

impl From<u32> for RawInput {
    fn from(n: u32) -> Self {
        RawInput::Number(f64::from(n))
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        RawInput::Text(s.to_string())
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        RawInput::Text(s)
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInput::Number(n) => write!(f, "{n}"),
            RawInput::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Turn a raw field edit into a number.
///
/// Numbers pass through untouched. Text keeps only ASCII digits and `.`;
/// while more than one `.` survives, the last character of the cleaned text
/// is dropped (so `"12.3.4"` becomes `"12.3"`, not `"12.34"`). Whatever is
/// left is parsed as a decimal number.
///
/// Text with nothing parseable left (`""`, `"abc"`, `"."`) is rejected with
/// [`CalcError::NotANumber`]; callers keep their previous value. Bounds are
/// not checked here.
pub fn normalize(raw: impl Into<RawInput>) -> CalcResult<f64> {
    match raw.into() {
        RawInput::Number(n) => Ok(n),
        RawInput::Text(text) => {
            let cleaned = clean(&text);
            log::trace!("normalize {text:?} -> {cleaned:?}");
            cleaned
                .parse::<f64>()
                .map_err(|_| CalcError::NotANumber { input: text })
        }
    }
}

fn clean(text: &str) -> String {
    let mut cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    while cleaned.matches('.').count() > 1 {
        cleaned.pop();
    }

    cleaned
}
