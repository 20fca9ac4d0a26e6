//! Chart Presenter
//! Sends each finished chart to the configured display and PNG output.

use super::model::Chart;
use super::renderer::{ChartError, StaticChartRenderer};
use crate::config::{AnalysisConfig, DisplayMode};
use crate::gui::ChartWindow;
use std::path::{Path, PathBuf};

pub struct ChartPresenter {
    display: DisplayMode,
    chart_dir: Option<PathBuf>,
    width: u32,
    height: u32,
    shown: usize,
}

impl ChartPresenter {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            display: config.display,
            chart_dir: config.chart_dir.clone(),
            width: config.chart_width,
            height: config.chart_height,
            shown: 0,
        }
    }

    /// Number of charts presented so far.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// PNG path for the n-th chart, numbered in pipeline order.
    pub fn png_path(dir: &Path, index: usize, chart: &Chart) -> PathBuf {
        dir.join(format!("{:02}_{}.png", index, chart.slug()))
    }

    /// Present one chart. Blocks while an interactive window is open.
    pub fn show(&mut self, chart: &Chart) -> Result<(), ChartError> {
        self.shown += 1;

        if self.display == DisplayMode::Headless || self.chart_dir.is_some() {
            let buffer = StaticChartRenderer::render_rgb(chart, self.width, self.height)?;
            log::info!("Rendered chart {}: {}", self.shown, chart.title);

            if let Some(dir) = &self.chart_dir {
                let path = Self::png_path(dir, self.shown, chart);
                StaticChartRenderer::save_png(buffer, self.width, self.height, &path)?;
                println!("Saved chart: {}", path.display());
            }
        }

        if self.display == DisplayMode::Interactive {
            ChartWindow::show_blocking(chart, self.width as f32, self.height as f32)
                .map_err(|e| ChartError::Window(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_names_follow_pipeline_order() {
        let chart = Chart::seasonality(&[(1, 2.0)]);

        let path = ChartPresenter::png_path(Path::new("out"), 4, &chart);

        assert_eq!(
            path,
            Path::new("out").join("04_average_unemployment_rate_by_month_seasonality_check.png")
        );
    }

    #[test]
    fn presenter_takes_sizes_from_config() {
        let config = AnalysisConfig {
            display: DisplayMode::Headless,
            chart_width: 640,
            chart_height: 320,
            ..AnalysisConfig::default()
        };

        let presenter = ChartPresenter::new(&config);

        assert_eq!((presenter.width, presenter.height), (640, 320));
        assert_eq!(presenter.display, DisplayMode::Headless);
        assert_eq!(presenter.shown(), 0);
    }
}
