use fan_chart::{FanChartConfig, FanChartError};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "percentiles": [20, 80], "relative_noise": 0.05, "fallback_reading": 4.5 }}"#
    )
    .unwrap();

    let config = FanChartConfig::from_json_file(file.path()).unwrap();

    assert_eq!(config.percentiles, vec![20, 80]);
    assert_eq!(config.relative_noise, 0.05);
    assert_eq!(config.fallback_reading, 4.5);
    assert_eq!(config.reading_scale, 0.8);
}

#[test]
fn test_config_round_trip_through_file() {
    let config = FanChartConfig::new().with_percentiles(&[33, 66]).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&config).unwrap()).unwrap();

    assert_eq!(FanChartConfig::from_json_file(file.path()).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let result = FanChartConfig::from_json_file("/nonexistent/fan_chart.json");
    assert!(matches!(result, Err(FanChartError::Io(_))));
}

#[test]
fn test_invalid_percentile_in_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "percentiles": [0, 50] }}"#).unwrap();

    let result = FanChartConfig::from_json_file(file.path());
    assert!(matches!(result, Err(FanChartError::InvalidParameter(_))));
}
