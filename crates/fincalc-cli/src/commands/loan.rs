use clap::Args;
use serde_json::Value;

use fincalc_core::loan::{self, LoanField, LoanInput};

use crate::commands::apply_flags;
use crate::input;

/// Arguments for an EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount, e.g. 500000 or "5,00,000" (default 100000)
    #[arg(long, alias = "principal")]
    pub amount: Option<String>,

    /// Annual interest rate in percent, e.g. 8.5 (default 10)
    #[arg(long)]
    pub rate: Option<String>,

    /// Tenure in whole years (default 10)
    #[arg(long)]
    pub tenure: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl EmiArgs {
    fn has_flags(&self) -> bool {
        self.amount.is_some() || self.rate.is_some() || self.tenure.is_some()
    }
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.has_flags() {
        apply_flags(
            LoanInput::default(),
            &[
                (LoanField::Amount, args.amount.as_deref()),
                (LoanField::Rate, args.rate.as_deref()),
                (LoanField::Tenure, args.tenure.as_deref()),
            ],
        )?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput::default()
    };

    log::info!("EMI for {loan_input:?}");
    let result = loan::calculate_emi(&loan_input);
    Ok(serde_json::to_value(result)?)
}
