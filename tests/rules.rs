use approx::assert_abs_diff_eq;
use launchcalc::diamond::{holder_distribution, sell_fee, DiamondHandFee, Holder};
use launchcalc::dump::{intervention_strength, is_dump_event, InterventionLevel};
use launchcalc::form::{validate, validate_wallet_address, AddressFormat, FieldKind};
use launchcalc::CalcError;

fn error_of(kind: FieldKind, value: &str) -> Option<String> {
    let v = validate(kind, value);
    assert_eq!(v.valid, v.error.is_none());
    v.error
}

#[test]
fn symbol_length_and_charset() {
    assert!(validate(FieldKind::TokenSymbol, "ABCDEFGH").valid);
    assert_eq!(
        error_of(FieldKind::TokenSymbol, "ABCDEFGHI").as_deref(),
        Some("Symbol must be no more than 8 characters")
    );
    assert_eq!(error_of(FieldKind::TokenSymbol, "ABC123").as_deref(), Some("Symbol must be alphabets only"));
    assert_eq!(error_of(FieldKind::TokenSymbol, "").as_deref(), Some("Symbol must be at least 1 character"));
    assert!(validate(FieldKind::TokenSymbol, "t").valid);
}

#[test]
fn first_violated_rule_wins() {
    // too long and contains digits: only the length error is reported
    assert_eq!(
        error_of(FieldKind::TokenSymbol, "ABC123456").as_deref(),
        Some("Symbol must be no more than 8 characters")
    );
}

#[test]
fn name_rules() {
    assert!(validate(FieldKind::TokenName, "TestToken").valid);
    assert!(validate(FieldKind::TokenName, "Token2024").valid);
    assert_eq!(error_of(FieldKind::TokenName, "A").as_deref(), Some("Name must be at least 2 characters"));
    assert!(validate(FieldKind::TokenName, &"a".repeat(25)).valid);
    assert_eq!(
        error_of(FieldKind::TokenName, &"a".repeat(26)).as_deref(),
        Some("Name must be no more than 25 characters")
    );
    for bad in ["Test Token", "Test-Token", "Tést"] {
        assert_eq!(error_of(FieldKind::TokenName, bad).as_deref(), Some("Name must be alphanumeric only"), "{bad}");
    }
}

#[test]
fn description_rules() {
    assert_eq!(
        error_of(FieldKind::TokenDescription, "X").as_deref(),
        Some("Description must be at least 2 characters")
    );
    assert!(validate(FieldKind::TokenDescription, "Hi! ünïcode & spaces are fine.").valid);
    assert!(validate(FieldKind::TokenDescription, &"é".repeat(250)).valid);
    assert!(!validate(FieldKind::TokenDescription, &"x".repeat(251)).valid);
    assert_eq!(FieldKind::TokenDescription.length_bounds(), (2, 250));
}

#[test]
fn wallet_addresses() {
    let gala = validate_wallet_address("client|618ae395c1c653111d3315be");
    assert!(gala.valid);
    assert_eq!(gala.format, AddressFormat::GalaClient);

    let eth = validate_wallet_address("0x742d35Cc6634C0532925a3b8D5c4Ae7C8E8c8E8C");
    assert!(eth.valid);
    assert_eq!(eth.format, AddressFormat::Ethereum);

    let bad_client = validate_wallet_address("client|618ae395c1c653111d3315bz");
    assert!(!bad_client.valid);
    assert_eq!(bad_client.format, AddressFormat::GalaClient);
    assert_eq!(bad_client.reason.as_deref(), Some("Invalid Gala client ID format"));

    let bad_eth = validate_wallet_address("0x742d35Cc6634C0532925a3b8D5c4Ae7C8E8c8E8G");
    assert_eq!(bad_eth.format, AddressFormat::Ethereum);
    assert!(!bad_eth.valid);

    // wrong length falls through to unknown
    let short_eth = validate_wallet_address("0x8ba1f109551bD432803012645Hac136c");
    assert_eq!(short_eth.format, AddressFormat::Unknown);

    assert_eq!(validate_wallet_address("0x1").reason.as_deref(), Some("Address too short"));
}

#[test]
fn diamond_fee_values() {
    assert_abs_diff_eq!(sell_fee(0.0, 0.01), 0.01, epsilon = 1e-15);
    assert_abs_diff_eq!(sell_fee(50.0, 0.01), 0.035, epsilon = 1e-15);
    assert_abs_diff_eq!(sell_fee(100.0, 0.01), 0.11, epsilon = 1e-15);
    // out-of-range progress clamps
    assert_eq!(sell_fee(150.0, 0.01), sell_fee(100.0, 0.01));
    assert_eq!(sell_fee(-10.0, 0.01), sell_fee(0.0, 0.01));
    assert_abs_diff_eq!(DiamondHandFee::default().max_fee(), 0.11, epsilon = 1e-15);
}

#[test]
fn holder_bonus_is_pro_rata() {
    let holders = vec![
        Holder { address: "0x1".into(), balance: 8000.0 },
        Holder { address: "0x2".into(), balance: 1000.0 },
        Holder { address: "0x3".into(), balance: 1000.0 },
    ];
    let out = holder_distribution(&holders, 1000.0).unwrap();
    let shares: Vec<f64> = out.iter().map(|a| a.distribution).collect();
    assert_abs_diff_eq!(shares[0], 800.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shares[1], 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shares[2], 100.0, epsilon = 1e-9);
    assert_eq!(out[0].address, "0x1");

    let empty = vec![Holder { address: "0x1".into(), balance: 0.0 }];
    assert_eq!(holder_distribution(&empty, 10.0), Err(CalcError::EmptyDistribution));
    assert_eq!(holder_distribution(&[], 10.0), Err(CalcError::EmptyDistribution));
}

#[test]
fn dump_sign_asymmetry() {
    assert!(is_dump_event(-8.0, 5.0));
    assert!(!is_dump_event(5.0, 5.0));
    assert!(is_dump_event(-5.0, 5.0));
    assert!(!is_dump_event(-4.99, 5.0));

    for (change, threshold, expected) in [(-5.0, 10.0, false), (-12.0, 10.0, true), (-25.0, 20.0, true), (-50.0, 30.0, true)] {
        assert_eq!(is_dump_event(change, threshold), expected, "{change} vs {threshold}");
    }
}

#[test]
fn intervention_levels_scale_with_severity() {
    let i = intervention_strength(-35.0, 10_000.0, 10.0).unwrap();
    assert_eq!(i.level, InterventionLevel::Emergency);
    assert_abs_diff_eq!(i.fees_to_use, 9_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(i.expected_recovery, 9.0, epsilon = 1e-9);

    let i = intervention_strength(-20.0, 4_000.0, 10.0).unwrap();
    assert_eq!(i.level, InterventionLevel::Strong);
    assert_abs_diff_eq!(i.expected_recovery, 3.0, epsilon = 1e-9);

    assert_eq!(intervention_strength(-15.0, 0.0, 10.0).unwrap().level, InterventionLevel::Standard);

    let i = intervention_strength(-12.0, 1_000.0, 10.0).unwrap();
    assert_eq!(i.level, InterventionLevel::Minimal);
    assert_abs_diff_eq!(i.expected_recovery, 0.25, epsilon = 1e-9);

    // recovery is capped by the size of the drop
    let i = intervention_strength(-1.0, 1e9, 0.2).unwrap();
    assert_abs_diff_eq!(i.expected_recovery, 0.8, epsilon = 1e-12);

    assert!(matches!(intervention_strength(-10.0, 100.0, 0.0), Err(CalcError::InvalidInput(_))));
}

#[test]
fn lengths_count_utf16_units() {
    // each emoji is a surrogate pair: two units
    assert!(validate(FieldKind::TokenDescription, &"😀".repeat(125)).valid);
    assert_eq!(
        error_of(FieldKind::TokenDescription, &"😀".repeat(126)).as_deref(),
        Some("Description must be no more than 250 characters")
    );
    assert_eq!(
        error_of(FieldKind::TokenSymbol, &"😀".repeat(5)).as_deref(),
        Some("Symbol must be no more than 8 characters")
    );
    // one emoji meets the 2-unit minimum, then fails the charset
    assert_eq!(error_of(FieldKind::TokenName, "😀").as_deref(), Some("Name must be alphanumeric only"));

    // five BMP accents are ten bytes but five units
    assert_eq!(validate_wallet_address("ééééé").reason.as_deref(), Some("Address too short"));
}
