use napi::Result as NapiResult;
use napi_derive::napi;

use fincalc_core::investment::{self, SipInput, SIP_FIELDS};
use fincalc_core::loan::{self, LoanInput, LOAN_FIELDS};
use fincalc_core::{normalize, GroupingStyle, NumberFormat, RawInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_emi(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    let input: SipInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = investment::calculate_sip(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Normalize a text-box value. Returns `null` when the text is not a number,
/// so the caller can keep its previous value.
#[napi]
pub fn normalize_input(raw: String) -> Option<f64> {
    normalize(raw.as_str()).ok()
}

/// Format a number or numeric string (given as JSON) for display.
/// `locale` is "western" (default), "indian" or "none".
#[napi]
pub fn format_number(value_json: String, locale: Option<String>) -> NapiResult<String> {
    let value: RawInput = serde_json::from_str(&value_json).map_err(to_napi_error)?;
    let grouping = match locale {
        Some(name) => name.parse::<GroupingStyle>().map_err(to_napi_error)?,
        None => GroupingStyle::default(),
    };
    Ok(NumberFormat::new(grouping).format(value))
}

#[napi]
pub fn field_specs(calculator: String) -> NapiResult<String> {
    let specs = match calculator.as_str() {
        "emi" => &LOAN_FIELDS,
        "sip" => &SIP_FIELDS,
        other => return Err(napi::Error::from_reason(format!("unknown calculator '{other}'"))),
    };
    serde_json::to_string(specs).map_err(to_napi_error)
}
