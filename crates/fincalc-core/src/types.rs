use serde::{Deserialize, Serialize};

/// All monetary values. Rounded to cents where the engines say so, but kept
/// as `f64` so that out-of-range inputs can still yield infinities.
pub type Money = f64;

/// Rates expressed as percentages per annum (10.0 = 10% p.a.), as entered by
/// the user. Engines convert to a monthly decimal rate internally.
pub type RatePercent = f64;

/// Whole years of tenure
pub type Years = u32;

/// One slice of a result pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub id: u32,
    pub label: String,
    pub value: Money,
    /// Fraction of the whole chart (0.0–1.0)
    pub share: f64,
}

/// Build chart slices from `(label, value)` pairs, numbering them in order.
///
/// Shares are zero when the total is not a positive finite number.
pub fn chart_slices(parts: &[(&str, Money)]) -> Vec<ChartSlice> {
    let total: f64 = parts.iter().map(|(_, v)| *v).sum();
    let usable = total.is_finite() && total > 0.0;

    parts
        .iter()
        .enumerate()
        .map(|(i, (label, value))| ChartSlice {
            id: i as u32,
            label: (*label).to_string(),
            value: *value,
            share: if usable { value / total } else { 0.0 },
        })
        .collect()
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64_rounded_to_cents".to_string(),
        },
    }
}
