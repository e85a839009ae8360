use fincalc_core::investment::{calculate_sip, compute_sip, SipInput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cents(x: f64) -> Decimal {
    Decimal::from_f64(x).unwrap().round_dp(2)
}

// ===========================================================================
// SIP known answers
// ===========================================================================

#[test]
fn test_sip_default_plan_known_answer() {
    // 1,000 a month at 10% for 10 years, paid at the start of each month
    // FV = 1000 · ((1+r)^120 − 1)/r · (1+r) ≈ 206,552.02
    let r = compute_sip(1000.0, 10.0, 10);
    assert_eq!(r.invested_amount, 120_000.0);
    assert_eq!(cents(r.total_value), dec!(206552.02));
    assert_eq!(cents(r.estimated_return), dec!(86552.02));
}

#[test]
fn test_sip_large_plan_known_answer() {
    // 5,000 a month at 12% for 10 years ≈ 11.6 lakh
    let r = compute_sip(5000.0, 12.0, 10);
    assert_eq!(cents(r.total_value), dec!(1161695.38));
    assert_eq!(r.invested_amount, 600_000.0);
}

#[test]
fn test_sip_fractional_rate() {
    let low = compute_sip(2500.0, 7.5, 20);
    let high = compute_sip(2500.0, 7.6, 20);
    assert!(high.total_value > low.total_value);
    assert_eq!(low.invested_amount, high.invested_amount);
}

// ===========================================================================
// Zero-rate and degenerate inputs
// ===========================================================================

#[test]
fn test_sip_zero_rate_is_sum_of_contributions() {
    let r = compute_sip(1500.0, 0.0, 3);
    assert_eq!(r.total_value, 1500.0 * 36.0);
    assert_eq!(r.estimated_return, 0.0);
}

#[test]
fn test_sip_out_of_range_inputs_do_not_panic() {
    let _ = compute_sip(-1000.0, 10.0, 10);
    let _ = compute_sip(1000.0, -50.0, 10);
    let _ = compute_sip(f64::INFINITY, 10.0, 10);
    let r = compute_sip(1000.0, 10.0, u32::MAX);
    assert!(!r.total_value.is_finite());
}

// ===========================================================================
// Purity and invariants
// ===========================================================================

#[test]
fn test_sip_is_bit_identical_across_calls() {
    let a = compute_sip(3333.33, 13.7, 23);
    let b = compute_sip(3333.33, 13.7, 23);
    assert_eq!(a.invested_amount.to_bits(), b.invested_amount.to_bits());
    assert_eq!(a.estimated_return.to_bits(), b.estimated_return.to_bits());
    assert_eq!(a.total_value.to_bits(), b.total_value.to_bits());
}

#[test]
fn test_sip_randomized_invariant() {
    let mut rng = StdRng::seed_from_u64(0x534950);
    for _ in 0..1000 {
        let contribution: f64 = rng.gen_range(500.0..100_000.0);
        let rate: f64 = rng.gen_range(0.1..30.0);
        let tenure: u32 = rng.gen_range(1..=40);

        let r = compute_sip(contribution, rate, tenure);
        assert!(r.total_value >= r.invested_amount);
        assert!(
            (r.total_value - r.estimated_return - r.invested_amount).abs() <= 0.01,
            "C={contribution} rate={rate} tenure={tenure}: {r:?}"
        );
        assert!(
            (r.invested_amount - contribution * f64::from(tenure) * 12.0).abs() <= 0.005 + 1e-6,
            "invested amount drifted for C={contribution} tenure={tenure}"
        );
    }
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_calculate_sip_envelope() {
    let out = calculate_sip(&SipInput::default());
    assert_eq!(out.result.figures, compute_sip(1000.0, 10.0, 10));
    assert!(out.warnings.is_empty());
    assert_eq!(out.result.breakdown[0].value, 120_000.0);

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["total_value"], 206_552.02);
    assert_eq!(json["result"]["breakdown"][1]["label"], "Est. Returns");
    assert_eq!(json["assumptions"]["tenure_years"], 10);
}
