use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, RatePercent, Years};

const MONTHS_PER_YEAR: u32 = 12;

/// Monthly decimal rate from an annual percentage (10.0 → 0.008333…)
pub fn monthly_rate(annual_rate_percent: RatePercent) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Number of monthly periods in a tenure
pub fn months(tenure_years: Years) -> u32 {
    tenure_years.saturating_mul(MONTHS_PER_YEAR)
}

/// Compound growth factor (1 + r)^n
pub fn growth_factor(rate: f64, nper: u32) -> f64 {
    (1.0 + rate).powf(f64::from(nper))
}

/// Level payment that amortizes `principal` over `nper` periods.
///
/// At a zero rate this is the straight-line limit `principal / nper`.
/// Nothing is validated: a zero `nper` yields an infinite payment.
pub fn amortizing_payment(principal: Money, rate: f64, nper: u32) -> Money {
    if rate == 0.0 {
        return principal / f64::from(nper);
    }

    let factor = growth_factor(rate, nper);
    principal * rate * factor / (factor - 1.0)
}

/// Future value of `nper` equal payments made at the start of each period
/// (annuity due).
///
/// At a zero rate this is the undiscounted sum `payment * nper`.
pub fn annuity_due_fv(payment: Money, rate: f64, nper: u32) -> Money {
    if rate == 0.0 {
        return payment * f64::from(nper);
    }

    let factor = growth_factor(rate, nper);
    payment * ((factor - 1.0) / rate) * (1.0 + rate)
}

/// Round to 2 decimal places, half away from zero.
///
/// Rounding goes through `Decimal`. Values `Decimal` cannot hold
/// (non-finite or beyond ~7.9e28) are returned unchanged.
pub fn round_cents(value: Money) -> Money {
    round_dp(value, 2)
}

pub(crate) fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-15);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn test_months_saturates() {
        assert_eq!(months(10), 120);
        assert_eq!(months(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_amortizing_payment_basic() {
        // 500,000 at 12% p.a. over 5 years ≈ 11,122.22 per month
        let pmt = amortizing_payment(500_000.0, monthly_rate(12.0), 60);
        assert!((pmt - 11_122.22).abs() < 0.01);
    }

    #[test]
    fn test_amortizing_payment_zero_rate() {
        assert_eq!(amortizing_payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn test_amortizing_payment_zero_periods_is_infinite() {
        let pmt = amortizing_payment(1000.0, 0.01, 0);
        assert!(pmt.is_infinite());
        let pmt = amortizing_payment(1000.0, 0.0, 0);
        assert!(pmt.is_infinite());
    }

    #[test]
    fn test_annuity_due_fv_basic() {
        // 5,000 a month at 12% p.a. for 10 years ≈ 1,161,695.38
        let fv = annuity_due_fv(5000.0, monthly_rate(12.0), 120);
        assert!((fv - 1_161_695.38).abs() < 0.01);
    }

    #[test]
    fn test_annuity_due_fv_long_tenure_rounds_like_pow() {
        // 99,999 a month at 21.3% for 40 years: repeated multiplication
        // drifts below the .935 midpoint, a true pow stays above it
        let fv = annuity_due_fv(99_999.0, monthly_rate(21.3), 480);
        assert_eq!(round_cents(fv), 26_673_399_457.94);
    }

    #[test]
    fn test_growth_factor_huge_nper() {
        assert_eq!(growth_factor(0.0, u32::MAX), 1.0);
        assert!(growth_factor(0.01, u32::MAX).is_infinite());
    }

    #[test]
    fn test_annuity_due_fv_zero_rate() {
        assert_eq!(annuity_due_fv(1000.0, 0.0, 120), 120_000.0);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1321.507_368_8), 1321.51);
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.236), 1.24);
        assert_eq!(round_cents(-1.236), -1.24);
        assert_eq!(round_cents(100.0), 100.0);
    }

    #[test]
    fn test_round_cents_passes_non_finite_through() {
        assert!(round_cents(f64::NAN).is_nan());
        assert_eq!(round_cents(f64::INFINITY), f64::INFINITY);
        assert_eq!(round_cents(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }
}
