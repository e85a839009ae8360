use clap::Args;
use serde_json::{json, Value};

use fincalc_core::{normalize, GroupingStyle, NumberFormat, RawInput};

/// Arguments for normalizing a typed amount
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NormalizeArgs {
    /// Text as typed, e.g. "₹ 1,00,000"
    pub raw: String,
}

/// Arguments for formatting a number
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Number or numeric text, e.g. 258581.20
    pub value: String,

    /// Maximum fractional digits to keep
    #[arg(long, default_value = "3")]
    pub max_fraction_digits: u32,
}

pub fn run_normalize(args: NormalizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let value = normalize(args.raw.as_str())?;
    Ok(json!({
        "result": {
            "input": args.raw,
            "value": value,
        }
    }))
}

pub fn run_format(
    args: FormatArgs,
    fmt: &NumberFormat<GroupingStyle>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let fmt = NumberFormat {
        max_fraction_digits: args.max_fraction_digits,
        ..fmt.clone()
    };
    let formatted = fmt.format(RawInput::Text(args.value.clone()));
    Ok(json!({
        "result": {
            "input": args.value,
            "formatted": formatted,
        }
    }))
}
