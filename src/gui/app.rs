//! Chart Window
//! Native window holding one chart until the user moves on.

use crate::charts::Chart;
use crate::gui::chart_viewer::{ChartViewer, ViewerAction};
use eframe::egui;

const MIN_WIDTH: f32 = 640.0;
const MIN_HEIGHT: f32 = 400.0;

pub struct ChartWindow {
    viewer: ChartViewer,
}

impl ChartWindow {
    pub fn new(_cc: &eframe::CreationContext<'_>, chart: Chart) -> Self {
        Self {
            viewer: ChartViewer::new(chart),
        }
    }

    /// Open a window for `chart` and return once it is closed.
    pub fn show_blocking(chart: &Chart, width: f32, height: f32) -> eframe::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([width.max(MIN_WIDTH), height.max(MIN_HEIGHT) + 90.0])
                .with_min_inner_size([MIN_WIDTH, MIN_HEIGHT])
                .with_title(chart.title.as_str()),
            ..Default::default()
        };

        log::debug!("Opening chart window: {}", chart.title);
        let chart = chart.clone();
        eframe::run_native(
            "Unemployment EDA",
            options,
            Box::new(move |cc| Ok(Box::new(ChartWindow::new(cc, chart)))),
        )
    }
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.viewer.show(ui) == ViewerAction::Next {
                log::debug!("Leaving chart: {}", self.viewer.chart().title);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}
