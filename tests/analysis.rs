use approx::{assert_abs_diff_eq, assert_relative_eq};
use payback_analysis::analysis::DiscountCurve;
use payback_analysis::{analyze, AnalysisError, AnalysisParameters, CashFlowPeriod, ExponentBasis};

fn reference() -> (AnalysisParameters, Vec<CashFlowPeriod>) {
    (
        AnalysisParameters::new(100_000.0, 10.0),
        CashFlowPeriod::series(&[25_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0]),
    )
}

#[test]
fn reference_case() {
    let (params, flows) = reference();
    let result = analyze(&params, &flows).expect("reference analysis");

    let payback = result.simple_payback_period.expect("recovered");
    assert!(payback > 3.0 && payback < 4.0);
    assert_relative_eq!(payback, 3.25, epsilon = 1e-12);

    assert!(result.npv.is_finite());
    let irr = result.irr.expect("irr converges");
    assert!(irr > 10.0 && irr < 20.0, "irr = {}", irr);
}

#[test]
fn exact_payback_at_period_boundary() {
    let params = AnalysisParameters::new(100_000.0, 10.0);
    let result = analyze(&params, &CashFlowPeriod::series(&[100_000.0])).unwrap();
    assert_eq!(result.simple_payback_period, Some(1.0));
    // Discounting pushes recovery past the only period
    assert_eq!(result.discounted_payback_period, None);
}

#[test]
fn no_recovery_is_not_applicable() {
    let params = AnalysisParameters::new(100_000.0, 10.0);
    let result = analyze(&params, &CashFlowPeriod::series(&[1000.0, 1000.0, 1000.0])).unwrap();
    assert_eq!(result.simple_payback_period, None);
    assert_eq!(result.discounted_payback_period, None);
    assert!(result.npv < 0.0);
    assert!(result.report().contains("Simple payback period:     N/A"));
}

#[test]
fn irr_zeroes_npv() {
    let flow_sets: [&[f64]; 4] = [
        &[25_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0],
        &[60_000.0, 60_000.0],
        &[10_000.0, 10_000.0, 10_000.0, 10_000.0],
        &[0.0, 0.0, 250_000.0],
    ];

    for values in flow_sets {
        let flows = CashFlowPeriod::series(values);
        let result = analyze(&AnalysisParameters::new(100_000.0, 10.0), &flows).unwrap();
        let irr = result.irr.expect("single sign change converges");

        let pairs: Vec<(i32, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as i32 + 1, v))
            .collect();
        let npv = DiscountCurve::from_percent(irr).npv(100_000.0, &pairs);
        assert_abs_diff_eq!(npv, 0.0, epsilon = 1e-4);
    }
}

#[test]
fn npv_sign_follows_present_value_of_inflows() {
    let cases: [(f64, &[f64]); 3] = [
        (100_000.0, &[25_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0]),
        (100_000.0, &[20_000.0, 20_000.0, 20_000.0]),
        (50_000.0, &[0.0, 70_000.0]),
    ];

    for (investment, values) in cases {
        let result = analyze(&AnalysisParameters::new(investment, 10.0), &CashFlowPeriod::series(values)).unwrap();
        let pv: f64 = values
            .iter()
            .enumerate()
            .map(|(i, v)| v / 1.1_f64.powi(i as i32 + 1))
            .sum();
        assert_eq!(result.npv > 0.0, pv > investment, "investment {} values {:?}", investment, values);
    }
}

#[test]
fn discounting_never_accelerates_payback() {
    let (_, flows) = reference();
    for rate in [0.5, 5.0, 10.0, 15.0, 19.0] {
        let result = analyze(&AnalysisParameters::new(100_000.0, rate), &flows).unwrap();
        let simple = result.simple_payback_period.unwrap();
        if let Some(discounted) = result.discounted_payback_period {
            assert!(discounted >= simple, "rate {}: {} < {}", rate, discounted, simple);
        }
    }
}

#[test]
fn zero_discount_rate_matches_simple_payback() {
    let (_, flows) = reference();
    let result = analyze(&AnalysisParameters::new(100_000.0, 0.0), &flows).unwrap();
    assert_eq!(result.discounted_payback_period, result.simple_payback_period);
    assert_eq!(result.cumulative_cash_flows, result.discounted_cumulative_cash_flows);
}

#[test]
fn repeated_calls_are_identical() {
    let (params, flows) = reference();
    let params = params.with_operating_costs(1500.0).with_inflation(2.5).with_tax(21.0);
    let first = analyze(&params, &flows).unwrap();
    let second = analyze(&params, &flows).unwrap();
    assert_eq!(first, second);
}

#[test]
fn adjustments_apply_cost_then_inflation_then_tax() {
    let flows = CashFlowPeriod::series(&[50_000.0, 50_000.0]);
    let params = AnalysisParameters::new(60_000.0, 8.0)
        .with_operating_costs(10_000.0)
        .with_inflation(4.0)
        .with_tax(30.0);
    let result = analyze(&params, &flows).unwrap();

    let expected: Vec<f64> = (1..=2)
        .map(|n| (50_000.0 - 10_000.0) / 1.04_f64.powi(n) * 0.7)
        .collect();
    let expected_npv = -60_000.0 + expected[0] / 1.08 + expected[1] / 1.08_f64.powi(2);
    assert_relative_eq!(result.npv, expected_npv, epsilon = 1e-6);

    // Costs taken out after inflation and tax give a different NPV
    let reordered: Vec<f64> = (1..=2)
        .map(|n| 50_000.0 / 1.04_f64.powi(n) * 0.7 - 10_000.0)
        .collect();
    let reordered_npv = -60_000.0 + reordered[0] / 1.08 + reordered[1] / 1.08_f64.powi(2);
    assert!((result.npv - reordered_npv).abs() > 100.0);

    for (row, value) in result.periods.iter().zip(&expected) {
        assert_relative_eq!(row.adjusted, *value, epsilon = 1e-9);
    }
}

#[test]
fn skipped_periods_still_appear_in_series() {
    let flows = CashFlowPeriod::series(&[500.0, 3000.0, 3000.0]);
    let params = AnalysisParameters::new(4000.0, 0.0).with_operating_costs(1000.0);
    let result = analyze(&params, &flows).unwrap();

    assert_eq!(result.cumulative_cash_flows, vec![-4000.0, -4500.0, -2500.0, -500.0]);
    assert_eq!(result.simple_payback_period, None);
    assert_eq!(result.periods[0].adjusted, -500.0);
}

#[test]
fn multiple_sign_changes_are_flagged() {
    let flows = CashFlowPeriod::series(&[230_000.0, 0.0, 0.0]);
    let params = AnalysisParameters::new(100_000.0, 10.0).with_operating_costs(100_000.0);
    let result = analyze(&params, &flows).unwrap();

    // -100000, +130000, -100000, -100000 stays below zero at every rate
    assert_eq!(result.sign_changes, 2);
    assert_eq!(result.irr, None);
    assert_eq!(result.irr_method, None);
    assert!(result.report().contains("IRR may not be unique"));
}

#[test]
fn invalid_input_fails_fast() {
    let (params, flows) = reference();

    let bad = AnalysisParameters::new(0.0, 10.0);
    assert!(matches!(analyze(&bad, &flows), Err(AnalysisError::InvalidArgument { .. })));

    let bad = AnalysisParameters { discount_rate_percent: -5.0, ..params.clone() };
    assert!(analyze(&bad, &flows).is_err());

    let bad_flows = CashFlowPeriod::series(&[25_000.0, f64::NAN]);
    assert!(analyze(&params, &bad_flows).is_err());

    assert!(matches!(analyze(&params, &[]), Err(AnalysisError::EmptyCashFlows)));
}

#[test]
fn far_year_is_rejected_under_year_basis() {
    let params = AnalysisParameters::new(100.0, 10.0)
        .with_inflation(5.0)
        .with_exponent_basis(ExponentBasis::Year);

    for year in [1001, 1u32 << 31, u32::MAX] {
        let flows = vec![CashFlowPeriod::new(year, 100.0)];
        assert!(matches!(
            analyze(&params, &flows),
            Err(AnalysisError::InvalidArgument { .. })
        ));
    }

    // The same label is harmless when list position drives discounting
    let positional = AnalysisParameters::new(100.0, 10.0).with_inflation(5.0);
    let result = analyze(&positional, &[CashFlowPeriod::new(u32::MAX, 121.0)]).expect("positional analysis");
    let payback = result.simple_payback_period.expect("recovered in the first period");
    assert!(payback > 0.0 && payback < 1.0);
    assert_relative_eq!(result.npv, 121.0 / 1.05 / 1.1 - 100.0, epsilon = 1e-9);
}
