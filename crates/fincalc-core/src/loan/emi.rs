use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CalcError;
use crate::input::FieldSpec;
use crate::session::Calculator;
use crate::time_value::{amortizing_payment, monthly_rate, months, round_cents};
use crate::types::{chart_slices, with_metadata, ChartSlice, ComputationOutput, Money, RatePercent, Years};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan terms. Missing fields deserialize to the calculator defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanInput {
    #[serde(alias = "amount")]
    pub principal: Money,
    #[serde(alias = "rate")]
    pub annual_rate_percent: RatePercent,
    #[serde(alias = "tenure")]
    pub tenure_years: Years,
}

impl Default for LoanInput {
    fn default() -> Self {
        LoanInput {
            principal: 100_000.0,
            annual_rate_percent: 10.0,
            tenure_years: 10,
        }
    }
}

/// Derived repayment figures, all rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_installment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// Result of `calculate_emi`: the figures plus the pie-chart split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutput {
    #[serde(flatten)]
    pub figures: LoanResult,
    pub principal: Money,
    pub breakdown: Vec<ChartSlice>,
}

/// Editable loan fields, keyed as the UI names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanField {
    Amount,
    Rate,
    Tenure,
}

pub const LOAN_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "amount",
        label: "Loan Amount",
        min: 100_000.0,
        max: 100_000_000.0,
        step: 1.0,
        unit: "₹",
    },
    FieldSpec {
        key: "rate",
        label: "Interest Rate (% P.A.)",
        min: 1.0,
        max: 100.0,
        step: 1.0,
        unit: "%",
    },
    FieldSpec {
        key: "tenure",
        label: "Loan Tenure (Years)",
        min: 1.0,
        max: 50.0,
        step: 1.0,
        unit: "Yr",
    },
];

impl LoanField {
    pub const ALL: [LoanField; 3] = [LoanField::Amount, LoanField::Rate, LoanField::Tenure];

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            LoanField::Amount => &LOAN_FIELDS[0],
            LoanField::Rate => &LOAN_FIELDS[1],
            LoanField::Tenure => &LOAN_FIELDS[2],
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().key)
    }
}

impl FromStr for LoanField {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount" | "principal" => Ok(LoanField::Amount),
            "rate" | "annual_rate_percent" => Ok(LoanField::Rate),
            "tenure" | "tenure_years" => Ok(LoanField::Tenure),
            _ => Err(CalcError::UnknownField { field: s.to_string() }),
        }
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Monthly installment and totals for a level-payment loan.
///
/// The installment is rounded to cents first and the totals are derived from
/// the rounded figure, so they agree with what is displayed. A zero rate uses
/// the straight-line limit `principal / months`. Inputs are not validated; a
/// zero tenure yields non-finite figures rather than a panic.
pub fn compute_emi(principal: Money, annual_rate_percent: RatePercent, tenure_years: Years) -> LoanResult {
    let n = months(tenure_years);
    let emi = round_cents(amortizing_payment(principal, monthly_rate(annual_rate_percent), n));
    let total_payment = round_cents(emi * f64::from(n) + principal);
    let total_interest = round_cents(total_payment - principal);

    LoanResult {
        monthly_installment: emi,
        total_interest,
        total_payment,
    }
}

impl LoanResult {
    /// Interest vs. principal slices for the result chart.
    pub fn breakdown(&self, principal: Money) -> Vec<ChartSlice> {
        chart_slices(&[
            ("Loan Interest", self.total_interest),
            ("Principal Loan Amount", principal),
        ])
    }
}

/// `compute_emi` wrapped in the standard output envelope, with warnings for
/// out-of-range inputs, the zero-rate fallback, and non-finite results.
pub fn calculate_emi(input: &LoanInput) -> ComputationOutput<LoanOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for field in LoanField::ALL {
        if let Some(w) = field.spec().out_of_range_warning(input.field_value(field)) {
            warnings.push(w);
        }
    }
    if input.annual_rate_percent == 0.0 {
        warnings.push("Zero interest rate: installment is principal divided by months".into());
    }

    let figures = input.compute();
    if !(figures.monthly_installment.is_finite() && figures.total_payment.is_finite()) {
        warnings.push("Result is not a finite number; check tenure and rate".into());
    }

    let output = LoanOutput {
        figures,
        principal: input.principal,
        breakdown: figures.breakdown(input.principal),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Level-payment amortization: EMI = P·r·(1+r)^n / ((1+r)^n − 1), r = annual% / 1200, n = years × 12",
        input,
        warnings,
        elapsed,
        output,
    )
}

impl Calculator for LoanInput {
    type Field = LoanField;
    type Output = LoanResult;

    fn with_field(&self, field: LoanField, value: f64) -> Self {
        match field {
            LoanField::Amount => LoanInput { principal: value, ..*self },
            LoanField::Rate => LoanInput {
                annual_rate_percent: value,
                ..*self
            },
            // Whole years only; fractions, negatives and NaN truncate toward 0.
            LoanField::Tenure => LoanInput {
                tenure_years: value.trunc() as u32,
                ..*self
            },
        }
    }

    fn field_value(&self, field: LoanField) -> f64 {
        match field {
            LoanField::Amount => self.principal,
            LoanField::Rate => self.annual_rate_percent,
            LoanField::Tenure => f64::from(self.tenure_years),
        }
    }

    fn compute(&self) -> LoanResult {
        compute_emi(self.principal, self.annual_rate_percent, self.tenure_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_loan() {
        let r = LoanInput::default().compute();
        assert_eq!(
            r,
            LoanResult {
                monthly_installment: 1321.51,
                total_interest: 158_581.2,
                total_payment: 258_581.2,
            }
        );
    }

    #[test]
    fn test_totals_follow_rounded_installment() {
        let r = compute_emi(500_000.0, 12.0, 5);
        assert_eq!(r.monthly_installment, 11_122.22);
        assert_eq!(r.total_payment, round_cents(11_122.22 * 60.0 + 500_000.0));
        assert_eq!(r.total_interest, round_cents(r.total_payment - 500_000.0));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let r = compute_emi(120_000.0, 0.0, 10);
        assert_eq!(r.monthly_installment, 1000.0);
        assert_eq!(r.total_payment, 240_000.0);
        assert_eq!(r.total_interest, 120_000.0);
    }

    #[test]
    fn test_zero_tenure_does_not_panic() {
        let r = compute_emi(100_000.0, 10.0, 0);
        assert!(!r.monthly_installment.is_finite());

        let r = compute_emi(100_000.0, 0.0, 0);
        assert!(r.monthly_installment.is_infinite());
    }

    #[test]
    fn test_with_field_returns_new_input() {
        let base = LoanInput::default();
        let edited = base.with_field(LoanField::Amount, 250_000.0);
        assert_eq!(base.principal, 100_000.0);
        assert_eq!(edited.principal, 250_000.0);
        assert_eq!(edited.annual_rate_percent, base.annual_rate_percent);
    }

    #[test]
    fn test_tenure_truncates() {
        let base = LoanInput::default();
        assert_eq!(base.with_field(LoanField::Tenure, 7.9).tenure_years, 7);
        assert_eq!(base.with_field(LoanField::Tenure, -3.0).tenure_years, 0);
        assert_eq!(base.with_field(LoanField::Tenure, f64::NAN).tenure_years, 0);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("amount".parse::<LoanField>().unwrap(), LoanField::Amount);
        assert_eq!("tenure_years".parse::<LoanField>().unwrap(), LoanField::Tenure);
        assert_eq!(
            "emi".parse::<LoanField>(),
            Err(CalcError::UnknownField { field: "emi".into() })
        );
    }

    #[test]
    fn test_breakdown_slices() {
        let r = LoanInput::default().compute();
        let slices = r.breakdown(100_000.0);
        assert_eq!(slices[0].label, "Loan Interest");
        assert_eq!(slices[0].value, r.total_interest);
        assert_eq!(slices[1].label, "Principal Loan Amount");
        assert_eq!(slices[1].value, 100_000.0);
    }

    #[test]
    fn test_calculate_emi_warnings() {
        let out = calculate_emi(&LoanInput::default());
        assert!(out.warnings.is_empty());

        let out = calculate_emi(&LoanInput {
            principal: 50_000.0,
            annual_rate_percent: 0.0,
            tenure_years: 0,
        });
        assert!(out.warnings.iter().any(|w| w.contains("Loan Amount")));
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest rate")));
        assert!(out.warnings.iter().any(|w| w.contains("not a finite number")));
    }

    #[test]
    fn test_input_deserializes_with_ui_keys_and_defaults() {
        let input: LoanInput = serde_json::from_str(r#"{"amount": 250000}"#).unwrap();
        assert_eq!(
            input,
            LoanInput {
                principal: 250_000.0,
                ..LoanInput::default()
            }
        );
    }
}
