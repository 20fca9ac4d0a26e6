//! Unemployment EDA - cleaning, statistics and charts for the India unemployment dataset
//!
//! Loads the survey table, cleans it, prints summary statistics and shows
//! one chart per aggregation.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::Context;
use charts::{Chart, ChartPresenter};
use config::AnalysisConfig;
use data::{DataCleaner, DataLoader, ObservationTable};
use stats::StatsCalculator;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::load_or_default(Path::new(AnalysisConfig::FILE_NAME))
        .context("Failed to load settings")?;
    run(&config)
}

/// Run the whole pipeline; console text and charts come out in this order.
fn run(config: &AnalysisConfig) -> anyhow::Result<()> {
    let df = DataLoader::load_csv(&config.input_path)
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;

    let (df, cleaning) = DataCleaner::clean(df).context("Failed to clean data")?;
    let table = ObservationTable::from_frame(&df).context("Failed to read observations")?;
    let records = table.records();
    if table.is_empty() {
        log::warn!("No rows left after cleaning");
    }
    log::info!(
        "{} observations ready, {} rows dropped",
        table.len(),
        cleaning.rows_before - cleaning.rows_after
    );

    let mut presenter = ChartPresenter::new(config);

    let trend = StatsCalculator::overall_trend(records);
    presenter.show(&Chart::overall_trend(&trend))?;

    let area_trends = StatsCalculator::area_trends(records);
    presenter.show(&Chart::area_trends(&area_trends))?;

    report::print_covid_impact(&StatsCalculator::covid_impact(records));

    let top = StatsCalculator::top_regions(records, config.top_n);
    presenter.show(&Chart::top_regions(&top, config.top_n))?;

    let seasonality = StatsCalculator::monthly_seasonality(records);
    presenter.show(&Chart::seasonality(&seasonality))?;

    let pivot = StatsCalculator::region_month_pivot(records);
    presenter.show(&Chart::heatmap(&pivot))?;

    report::print_region_summary(&StatsCalculator::region_summary(records));

    log::info!("Presented {} charts", presenter.shown());
    Ok(())
}
