use chrono::{Duration, TimeZone, Utc};
use fan_chart::sample::sample_request;
use fan_chart::{
    AuxiliaryReading, Coordinates, FanChartConfig, FanChartEngine, FanChartError,
    FanChartService, HistoricalRecord, InMemoryHistory,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Six hours of readings near the Depok test site
fn demo_history() -> InMemoryHistory {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
    let site = Coordinates::new(-6.40, 106.79);

    let mut history = InMemoryHistory::default();
    for hour in 0..6 {
        let ghi = 1.5 + hour as f64 * 0.6;
        let bmkg = if hour % 2 == 0 { Some(ghi * 1.05) } else { None };
        history.push(HistoricalRecord::new(
            site,
            start + Duration::hours(hour),
            AuxiliaryReading::new(Some(ghi), Some(ghi * 0.95), bmkg),
        ));
    }
    history
}

fn main() -> Result<(), FanChartError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FanChartConfig::from_json_file(path)?,
        None => FanChartConfig::new(),
    };

    let mut rng = StdRng::seed_from_u64(2024);
    let now = Utc::now();
    let request = sample_request(now, &mut rng)?;

    let service = FanChartService::new(FanChartEngine::new(config)?, demo_history());
    let result = service.handle(&request, &mut rng)?;

    info!(
        file = %request.chart_file_name(now),
        source = %result.data_source,
        "Chart ready for rendering"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
