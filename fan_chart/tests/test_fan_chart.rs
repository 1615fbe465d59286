use approx::assert_relative_eq;
use fan_chart::{
    generate_fan_chart_with_seed, AuxiliaryReading, FanChartConfig, FanChartEngine,
    FanChartResult, IntervalEstimator, DEFAULT_PERCENTILES,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

// Helper: a forecast shaped like a day of solar output
fn daylight(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (2.5 + 2.0 * (i as f64 * std::f64::consts::PI / n as f64).sin()).max(0.0))
        .collect()
}

fn history(count: usize) -> Vec<AuxiliaryReading> {
    (0..count)
        .map(|i| AuxiliaryReading::new(Some(3.0 + i as f64 * 0.25), None, Some(4.0)))
        .collect()
}

fn without_timing(mut result: FanChartResult) -> FanChartResult {
    result.elapsed_ms = 0.0;
    result
}

#[rstest]
#[case(2, 0)]
#[case(3, 1)]
#[case(12, 5)]
#[case(24, 24)]
#[case(8, 30)]
fn test_length_invariant(#[case] n: usize, #[case] records: usize) {
    let result = generate_fan_chart_with_seed(&daylight(n), &history(records), None, 17);

    assert!(result.success, "{}", result.message);
    assert_eq!(result.point_count, n);
    assert_eq!(result.predicted_line.len(), n);
    assert_eq!(result.actual_line.len(), n);
    assert_eq!(result.historical_records_used, records.min(n));
    for band in &result.bands {
        assert_eq!(band.lower.len(), n);
        assert_eq!(band.upper.len(), n);
    }
}

#[rstest]
#[case(1)]
#[case(99)]
#[case(12345)]
fn test_actual_values_never_negative(#[case] seed: u64) {
    let mut config = FanChartConfig::new();
    config.relative_noise = 3.0;
    config.reading_noise_std = 10.0;
    let engine = FanChartEngine::new(config).unwrap();
    let predicted: Vec<f64> = (0..50).map(|i| (i % 5) as f64 * 0.2).collect();
    let mut rng = StdRng::seed_from_u64(seed);

    let result = engine.generate_values(&predicted, &history(20), &mut rng);

    assert!(result.success);
    assert!(result.actual_line.iter().all(|&v| v >= 0.0));
}

#[rstest]
#[case(5)]
#[case(21)]
#[case(777)]
fn test_bands_nest_by_percentile(#[case] seed: u64) {
    let result = generate_fan_chart_with_seed(&daylight(24), &history(6), None, seed);
    assert!(result.success);

    let ordered: Vec<u8> = result.bands.iter().map(|b| b.percentile).collect();
    let mut expected = DEFAULT_PERCENTILES.to_vec();
    expected.reverse();
    assert_eq!(ordered, expected);

    // bands are widest first, so each one must sit inside its predecessor
    for pair in result.bands.windows(2) {
        let (outer, inner) = (&pair[0], &pair[1]);
        for i in 0..result.point_count {
            assert!(outer.lower[i] <= inner.lower[i]);
            assert!(inner.lower[i] <= inner.upper[i]);
            assert!(inner.upper[i] <= outer.upper[i]);
        }
    }
}

#[test]
fn test_forecast_inside_bands_for_balanced_residuals() {
    let estimator = IntervalEstimator::new(&FanChartConfig::new());
    let predicted = daylight(10);
    let residual = vec![-0.4, 0.4, -0.2, 0.2, -0.1, 0.1, -0.3, 0.3, 0.0, 0.0];

    let bands = estimator.estimate(&predicted, &residual).unwrap();

    for band in &bands {
        for (i, p) in predicted.iter().enumerate() {
            assert!(band.lower[i] <= *p && *p <= band.upper[i]);
        }
    }
}

#[test]
fn test_zero_residuals_collapse_bands() {
    let engine = FanChartEngine::new(FanChartConfig::new().without_noise()).unwrap();
    let predicted = daylight(6);
    let mut rng = StdRng::seed_from_u64(0);

    let result = engine.generate_values(&predicted, &[], &mut rng);

    assert_eq!(result.actual_line, predicted);
    for band in &result.bands {
        assert_eq!(band.lower, predicted);
        assert_eq!(band.upper, predicted);
    }
    let summary = result.residual_summary.unwrap();
    assert_eq!(summary.mae, 0.0);
    assert_eq!(summary.std_dev, 0.0);
}

#[rstest]
#[case(0)]
#[case(4)]
fn test_same_seed_same_chart(#[case] records: usize) {
    let predicted = daylight(16);
    let first = generate_fan_chart_with_seed(&predicted, &history(records), None, 2024);
    let second = generate_fan_chart_with_seed(&predicted, &history(records), None, 2024);

    assert_eq!(without_timing(first), without_timing(second));
}

#[test]
fn test_different_seeds_differ() {
    let predicted = daylight(16);
    let first = generate_fan_chart_with_seed(&predicted, &[], None, 1);
    let second = generate_fan_chart_with_seed(&predicted, &[], None, 2);

    assert_ne!(first.actual_line, second.actual_line);
}

#[test]
fn test_no_history_uses_forecast_noise_path() {
    let engine = FanChartEngine::new(FanChartConfig::new().without_noise()).unwrap();
    let mut rng = StdRng::seed_from_u64(8);

    let result = engine.generate_values(&[1.0, 2.0, 3.0], &[], &mut rng);

    assert!(result.success);
    assert_eq!(result.historical_records_used, 0);
    assert_eq!(result.data_source, "Predictions only");
    assert_eq!(result.actual_line, vec![1.0, 2.0, 3.0]);

    // with the default noise model values scatter around the forecast
    let noisy = generate_fan_chart_with_seed(&[1.0, 2.0, 3.0], &[], None, 8);
    assert_eq!(noisy.historical_records_used, 0);
    assert!(noisy.actual_line.iter().all(|&v| v >= 0.0));
}

#[test]
fn test_partial_history() {
    let history = vec![AuxiliaryReading::from_readings(&[Some(4.0), None, Some(6.0)])];

    let engine = FanChartEngine::new(FanChartConfig::new().without_noise()).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let quiet = engine.generate_values(&[1.0, 2.0, 3.0], &history, &mut rng);

    // avg 5.0 scaled by 0.8, then the forecast itself for the remainder
    assert_relative_eq!(quiet.actual_line[0], 4.0);
    assert_eq!(&quiet.actual_line[1..], &[2.0, 3.0]);
    assert_eq!(quiet.historical_records_used, 1);
    assert_eq!(quiet.data_source, "Historical + Predictions");

    let noisy = generate_fan_chart_with_seed(&[1.0, 2.0, 3.0], &history, None, 8);
    assert!((noisy.actual_line[0] - 4.0).abs() < 1.5);
    assert_eq!(noisy.historical_records_used, 1);
}

#[test]
fn test_custom_percentiles() {
    let result = generate_fan_chart_with_seed(&daylight(8), &[], Some(&[25, 95, 50, 25][..]), 3);

    assert!(result.success);
    let ordered: Vec<u8> = result.bands.iter().map(|b| b.percentile).collect();
    assert_eq!(ordered, vec![95, 50, 25]);
    assert_eq!(result.intervals_calculated, 3);
    assert!(result.band(50).is_some());
    assert!(result.band(90).is_none());
}

#[test]
fn test_band_width_constant_over_horizon() {
    let result = generate_fan_chart_with_seed(&daylight(20), &history(3), None, 42);
    for band in &result.bands {
        let width = band.width();
        for (l, u) in band.lower.iter().zip(band.upper.iter()) {
            assert_relative_eq!(u - l, width, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_huge_forecasts_never_succeed_with_non_finite_bands() {
    let engine = FanChartEngine::new(FanChartConfig::new()).unwrap();
    let mut failures = 0;

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = engine.generate_values(&[1.7e308, 1.7e308, 0.0], &[], &mut rng);
        if result.success {
            assert!(result.actual_line.iter().all(|v| v.is_finite()));
            for band in &result.bands {
                for (l, u) in band.lower.iter().zip(band.upper.iter()) {
                    assert!(l.is_finite() && u.is_finite() && l <= u);
                }
            }
        } else {
            assert!(result.message.contains("not finite"));
            failures += 1;
        }
    }

    assert!(failures > 0);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_engine_shared_across_threads() {
    assert_send_sync::<FanChartEngine>();
    assert_send_sync::<FanChartResult>();

    let engine = FanChartEngine::new(FanChartConfig::new()).unwrap();
    let predicted = daylight(24);
    let records = history(5);

    let (first, second) = std::thread::scope(|scope| {
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            without_timing(engine.generate_values(&predicted, &records, &mut rng))
        };
        let a = scope.spawn(run);
        let b = scope.spawn(run);
        (a.join().unwrap(), b.join().unwrap())
    });

    assert!(first.success);
    assert_eq!(first, second);
}
