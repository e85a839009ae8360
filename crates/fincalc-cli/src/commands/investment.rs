use clap::Args;
use serde_json::Value;

use fincalc_core::investment::{self, SipField, SipInput};

use crate::commands::apply_flags;
use crate::input;

/// Arguments for a SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Monthly investment, e.g. 5000 or "₹5,000" (default 1000)
    #[arg(long, alias = "contribution")]
    pub amount: Option<String>,

    /// Expected annual return in percent, e.g. 12.5 (default 10)
    #[arg(long)]
    pub rate: Option<String>,

    /// Time period in whole years (default 10)
    #[arg(long)]
    pub tenure: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let has_flags = args.amount.is_some() || args.rate.is_some() || args.tenure.is_some();

    let sip_input: SipInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if has_flags {
        apply_flags(
            SipInput::default(),
            &[
                (SipField::Amount, args.amount.as_deref()),
                (SipField::Rate, args.rate.as_deref()),
                (SipField::Tenure, args.tenure.as_deref()),
            ],
        )?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SipInput::default()
    };

    log::info!("SIP for {sip_input:?}");
    let result = investment::calculate_sip(&sip_input);
    Ok(serde_json::to_value(result)?)
}
