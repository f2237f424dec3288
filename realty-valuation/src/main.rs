//! realty-valuation service entry point.

use anyhow::Result;
use realty_common::prelude::*;
use realty_valuation::ValuationService;

#[tokio::main]
async fn main() -> Result<()> {
    let startup_start = std::time::Instant::now();

    let config = Config::load_and_validate()?;
    init_from_config(&config.observability);

    tracing::info!("Realty Valuation v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        currency = %config.valuation.currency,
        estimator = ?config.valuation.estimator_path(),
        dataset = ?config.valuation.dataset_path(),
        "Valuation settings loaded"
    );

    let service = ValuationService::new(config);

    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    service.start().await
}
