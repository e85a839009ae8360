use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CalcError;
use crate::input::FieldSpec;
use crate::session::Calculator;
use crate::time_value::{annuity_due_fv, monthly_rate, months, round_cents};
use crate::types::{chart_slices, with_metadata, ChartSlice, ComputationOutput, Money, RatePercent, Years};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly investment plan. Missing fields deserialize to the calculator
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipInput {
    #[serde(alias = "amount")]
    pub monthly_contribution: Money,
    #[serde(alias = "rate")]
    pub annual_return_rate_percent: RatePercent,
    #[serde(alias = "tenure")]
    pub tenure_years: Years,
}

impl Default for SipInput {
    fn default() -> Self {
        SipInput {
            monthly_contribution: 1000.0,
            annual_return_rate_percent: 10.0,
            tenure_years: 10,
        }
    }
}

/// Projected plan value, all figures rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub invested_amount: Money,
    pub estimated_return: Money,
    pub total_value: Money,
}

/// Result of `calculate_sip`: the figures plus the pie-chart split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipOutput {
    #[serde(flatten)]
    pub figures: SipResult,
    pub breakdown: Vec<ChartSlice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SipField {
    Amount,
    Rate,
    Tenure,
}

pub const SIP_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "amount",
        label: "Monthly Investment",
        min: 500.0,
        max: 100_000.0,
        step: 1.0,
        unit: "₹",
    },
    FieldSpec {
        key: "rate",
        label: "Expected Return Rate (% P.A.)",
        min: 1.0,
        max: 30.0,
        step: 0.1,
        unit: "%",
    },
    FieldSpec {
        key: "tenure",
        label: "Time Period (Years)",
        min: 1.0,
        max: 40.0,
        step: 1.0,
        unit: "Yr",
    },
];

impl SipField {
    pub const ALL: [SipField; 3] = [SipField::Amount, SipField::Rate, SipField::Tenure];

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            SipField::Amount => &SIP_FIELDS[0],
            SipField::Rate => &SIP_FIELDS[1],
            SipField::Tenure => &SIP_FIELDS[2],
        }
    }
}

impl fmt::Display for SipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().key)
    }
}

impl FromStr for SipField {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount" | "monthly_contribution" => Ok(SipField::Amount),
            "rate" | "annual_return_rate_percent" => Ok(SipField::Rate),
            "tenure" | "tenure_years" => Ok(SipField::Tenure),
            _ => Err(CalcError::UnknownField { field: s.to_string() }),
        }
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Future value of a monthly plan with contributions at the start of each
/// month (annuity due).
///
/// A zero rate uses the undiscounted limit `contribution * months`.
pub fn compute_sip(
    monthly_contribution: Money,
    annual_return_rate_percent: RatePercent,
    tenure_years: Years,
) -> SipResult {
    let n = months(tenure_years);
    let future_value = annuity_due_fv(monthly_contribution, monthly_rate(annual_return_rate_percent), n);

    let total_value = round_cents(future_value);
    let invested_amount = round_cents(monthly_contribution * f64::from(n));
    let estimated_return = round_cents(total_value - invested_amount);

    SipResult {
        invested_amount,
        estimated_return,
        total_value,
    }
}

impl SipResult {
    /// Invested vs. returns slices for the result chart.
    pub fn breakdown(&self) -> Vec<ChartSlice> {
        chart_slices(&[
            ("Invested Amount", self.invested_amount),
            ("Est. Returns", self.estimated_return),
        ])
    }
}

pub fn calculate_sip(input: &SipInput) -> ComputationOutput<SipOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for field in SipField::ALL {
        if let Some(w) = field.spec().out_of_range_warning(input.field_value(field)) {
            warnings.push(w);
        }
    }
    if input.annual_return_rate_percent == 0.0 {
        warnings.push("Zero return rate: total value equals amount invested".into());
    }

    let figures = input.compute();
    if !figures.total_value.is_finite() {
        warnings.push("Result is not a finite number; check tenure and rate".into());
    }

    let output = SipOutput {
        figures,
        breakdown: figures.breakdown(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Annuity-due future value: FV = C·((1+r)^n − 1)/r·(1+r), r = annual% / 1200, n = years × 12",
        input,
        warnings,
        elapsed,
        output,
    )
}

impl Calculator for SipInput {
    type Field = SipField;
    type Output = SipResult;

    fn with_field(&self, field: SipField, value: f64) -> Self {
        match field {
            SipField::Amount => SipInput {
                monthly_contribution: value,
                ..*self
            },
            SipField::Rate => SipInput {
                annual_return_rate_percent: value,
                ..*self
            },
            SipField::Tenure => SipInput {
                tenure_years: value.trunc() as u32,
                ..*self
            },
        }
    }

    fn field_value(&self, field: SipField) -> f64 {
        match field {
            SipField::Amount => self.monthly_contribution,
            SipField::Rate => self.annual_return_rate_percent,
            SipField::Tenure => f64::from(self.tenure_years),
        }
    }

    fn compute(&self) -> SipResult {
        compute_sip(
            self.monthly_contribution,
            self.annual_return_rate_percent,
            self.tenure_years,
        )
    }
}
