//! Chart Viewer Widget
//! Chart card with title, optional color scale and the interactive plot.

use crate::charts::{color32, heat_color, Chart, ChartPlotter};
use egui::{RichText, Sense};

const CARD_MARGIN: f32 = 12.0;
const FOOTER_HEIGHT: f32 = 40.0;
const COLORBAR_STEPS: usize = 48;

/// What the user asked for on the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    None,
    Next,
}

/// Draws a single chart filling the available space.
pub struct ChartViewer {
    chart: Chart,
}

impl ChartViewer {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> ViewerAction {
        let mut action = ViewerAction::None;

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(CARD_MARGIN)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&self.chart.title).size(18.0).strong());
                    ui.add_space(6.0);

                    if let Some((min, max)) = self.chart.value_range() {
                        Self::draw_color_scale(ui, min, max);
                        ui.add_space(6.0);
                    }

                    let plot_height = (ui.available_height() - FOOTER_HEIGHT).max(200.0);
                    ChartPlotter::draw_chart(ui, &self.chart, plot_height);

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button(RichText::new("Next ▶").size(14.0)).clicked() {
                            action = ViewerAction::Next;
                        }
                        ui.label(RichText::new("or close the window to continue").weak());
                    });
                });
            });

        action
    }

    /// Horizontal gradient strip with min and max labels.
    fn draw_color_scale(ui: &mut egui::Ui, min: f64, max: f64) {
        ui.horizontal(|ui| {
            ui.label(format!("{:.1}", min));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 14.0), Sense::hover());
            let step = rect.width() / COLORBAR_STEPS as f32;
            for i in 0..COLORBAR_STEPS {
                let t = i as f64 / (COLORBAR_STEPS - 1) as f64;
                let x = rect.left() + step * i as f32;
                let cell = egui::Rect::from_min_max(
                    egui::pos2(x, rect.top()),
                    egui::pos2(x + step + 0.5, rect.bottom()),
                );
                ui.painter().rect_filled(cell, 0.0, color32(heat_color(t)));
            }
            ui.label(format!("{:.1}", max));
        });
    }
}
