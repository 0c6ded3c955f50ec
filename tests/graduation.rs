use approx::assert_abs_diff_eq;
use launchcalc::graduation::{
    creator_incentive, evaluate_graduation, should_graduate, usd_value, GraduationParams,
    CREATOR_INCENTIVE_RATE, CREATOR_REWARD, GRADUATION_THRESHOLD,
};
use launchcalc::verifier::verify_distribution;
use launchcalc::CalcError;

#[test]
fn threshold_is_inclusive() {
    assert!(!evaluate_graduation(1_640_985.83).graduated);
    assert!(evaluate_graduation(1_640_985.84).graduated);
    assert!(evaluate_graduation(1_640_985.85).graduated);

    assert!(should_graduate(GRADUATION_THRESHOLD));
    assert!(!should_graduate(GRADUATION_THRESHOLD - 0.000001));
    assert!(should_graduate(GRADUATION_THRESHOLD + 0.000001));
}

#[test]
fn split_at_two_million() {
    let r = evaluate_graduation(2_000_000.0);
    assert!(r.graduated);
    assert_eq!(r.reason, None);
    assert_eq!(r.creator_reward, 17_777.0);
    assert_abs_diff_eq!(r.platform_fee, 100_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.dex_pool_amount, 1_882_223.0, epsilon = 1e-6);
}

#[test]
fn creator_reward_is_fixed_at_any_scale() {
    for mc in [GRADUATION_THRESHOLD, 5_000_000.0, 10_000_000.0, 100_000_000.0] {
        let r = evaluate_graduation(mc);
        assert_eq!(r.creator_reward, CREATOR_REWARD);
        assert_abs_diff_eq!(r.total(), mc, epsilon = 1e-6);
    }
}

#[test]
fn below_threshold_carries_reason_and_no_amounts() {
    let r = evaluate_graduation(1_000_000.0);
    assert!(!r.graduated);
    assert_eq!(r.reason.as_deref(), Some("below threshold"));
    assert_eq!((r.creator_reward, r.platform_fee, r.dex_pool_amount), (0.0, 0.0, 0.0));
}

#[test]
fn invalid_market_caps_are_rejected_not_panicked() {
    for mc in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
        let r = evaluate_graduation(mc);
        assert!(!r.graduated, "{mc} graduated");
        assert_eq!(r.reason.as_deref(), Some("invalid market cap"));
    }
}

#[test]
fn unfunded_pool_does_not_graduate_with_custom_params() {
    // validate() refuses these params; evaluate still guards the split
    let p = GraduationParams { threshold: 0.0, creator_reward: 100.0, platform_fee_rate: 0.05 };
    assert!(p.validate().is_err());
    let r = p.evaluate(50.0);
    assert!(!r.graduated);
    assert_eq!(r.reason.as_deref(), Some("insufficient funds in graduation pool"));
}

#[test]
fn params_validation() {
    assert!(GraduationParams::default().validate().is_ok());

    let bad_rate = GraduationParams { platform_fee_rate: 1.0, ..Default::default() };
    assert!(matches!(bad_rate.validate(), Err(CalcError::InvalidParams(_))));

    let nan = GraduationParams { threshold: f64::NAN, ..Default::default() };
    assert!(matches!(nan.validate(), Err(CalcError::InvalidParams(_))));

    let unfunded = GraduationParams { threshold: 10_000.0, ..Default::default() };
    assert!(matches!(unfunded.validate(), Err(CalcError::InvalidParams(_))));
}

#[test]
fn params_load_from_partial_json() {
    let p: GraduationParams = serde_json::from_str(r#"{"threshold": 2000000.0}"#).unwrap();
    assert_eq!(p.threshold, 2_000_000.0);
    assert_eq!(p.creator_reward, CREATOR_REWARD);
    assert!(!p.evaluate(1_900_000.0).graduated);
}

#[test]
fn distribution_report_at_threshold_is_healthy() {
    let rep = GraduationParams::default().distribution_report(GRADUATION_THRESHOLD);
    assert!(rep.is_valid);
    assert_abs_diff_eq!(rep.platform_percent, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rep.dex_percent, 93.916_687_788, epsilon = 1e-6);
    assert_abs_diff_eq!(rep.creator_percent + rep.platform_percent + rep.dex_percent, 100.0, epsilon = 1e-9);
    assert!(rep.distribution_error < 1e-6);
}

#[test]
fn distribution_report_flags_thin_dex_share() {
    // 17777 is ~9% of 200k, leaving the DEX under 90%
    let rep = GraduationParams::default().distribution_report(200_000.0);
    assert!(!rep.is_valid);
    assert!(rep.dex_percent < 90.0);
}

#[test]
fn incentive_and_usd_helpers() {
    assert_abs_diff_eq!(creator_incentive(1_000_000.0, CREATOR_INCENTIVE_RATE), 20_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(usd_value(CREATOR_REWARD, 0.015), 266.655, epsilon = 1e-9);
}

#[test]
fn verifier_accepts_a_sweep_of_graduated_caps() {
    let p = GraduationParams::default();
    let caps: Vec<f64> = (0..500).map(|i| 1_600_000.0 + i as f64 * 1_000.0).collect();
    let check = verify_distribution(&p, &caps).unwrap();
    assert_eq!(check.graduated + check.skipped, caps.len());
    assert_eq!(check.skipped, 41); // 1.600M..=1.640M sit below the threshold
    assert!(check.max_split_err <= 1e-6);
    assert_abs_diff_eq!(check.market_cap_sum, check.allocated_sum, epsilon = 1e-3);
}
