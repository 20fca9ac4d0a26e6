//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use super::model::{month_marks, Chart, ChartKind, PlotSeries, XScale};
use super::palette::{self, Rgb};
use egui::{Color32, Stroke};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridInput, GridMark, Legend, Line, MarkerShape, Plot,
    PlotPoints, PlotUi, Points, Polygon,
};

const LINE_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 4.0;
const BAR_WIDTH: f64 = 0.6;

pub fn color32((r, g, b): Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws a [`Chart`] into an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the chart at the given height, axes labelled through the chart's tick formatters.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &Chart, height: f32) {
        let x_chart = chart.clone();
        let mut plot = Plot::new(chart.slug())
            .height(height)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.as_str())
            .y_axis_label(chart.y_label.as_str())
            .x_axis_formatter(move |mark, _range| x_chart.x_tick_label(mark.value));

        if chart.legend {
            plot = plot.legend(Legend::default());
        }

        match &chart.kind {
            ChartKind::Line {
                x_scale: XScale::Months,
                ..
            } => {
                let (lo, hi) = chart.x_range();
                plot = plot
                    .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 3.0, 12.0]))
                    .include_x(lo)
                    .include_x(hi);
            }
            ChartKind::Line { .. } => {
                plot = plot.x_grid_spacer(Self::month_spacer);
            }
            ChartKind::Bar { .. } => {
                plot = plot
                    .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
                    .include_y(0.0);
            }
            ChartKind::Heatmap { .. } => {
                let y_chart = chart.clone();
                plot = plot
                    .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
                    .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
                    .y_axis_formatter(move |mark, _range| y_chart.y_tick_label(mark.value))
                    .show_grid(false);
            }
        }

        plot.show(ui, |plot_ui| match &chart.kind {
            ChartKind::Line { series, .. } => Self::draw_lines(plot_ui, series),
            ChartKind::Bar { categories, values } => {
                Self::draw_bars(plot_ui, categories, values)
            }
            ChartKind::Heatmap { .. } => Self::draw_heatmap(plot_ui, chart),
        });
    }

    /// Month-aligned marks; egui_plot drops labels that would overlap.
    fn month_spacer(input: GridInput) -> Vec<GridMark> {
        let (lo, hi) = input.bounds;
        month_marks(lo, hi)
            .into_iter()
            .map(|(value, step_size)| GridMark { value, step_size })
            .collect()
    }

    fn draw_lines(plot_ui: &mut PlotUi, series: &[PlotSeries]) {
        for s in series {
            let color = color32(s.color);
            let points = || PlotPoints::from_iter(s.points.iter().map(|&(x, y)| [x, y]));

            plot_ui.line(
                Line::new(points())
                    .name(&s.name)
                    .color(color)
                    .width(LINE_WIDTH),
            );
            if s.markers {
                plot_ui.points(
                    Points::new(points())
                        .name(&s.name)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(MARKER_RADIUS),
                );
            }
        }
    }

    fn draw_bars(plot_ui: &mut PlotUi, categories: &[String], values: &[f64]) {
        let bars: Vec<Bar> = categories
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (name, value))| {
                Bar::new(i as f64, *value)
                    .width(BAR_WIDTH)
                    .name(name)
                    .fill(color32(palette::series_color(i)))
            })
            .collect();
        plot_ui.bar_chart(BarChart::new(bars));
    }

    /// One filled square per cell; missing cells stay blank.
    fn draw_heatmap(plot_ui: &mut PlotUi, chart: &Chart) {
        let ChartKind::Heatmap { rows, cells, .. } = &chart.kind else {
            return;
        };
        let Some((min, max)) = chart.value_range() else {
            return;
        };

        for (row, row_cells) in cells.iter().enumerate() {
            let y = (rows.len() - 1 - row) as f64;
            for (col, cell) in row_cells.iter().enumerate() {
                let Some(value) = cell else {
                    continue;
                };
                let x = col as f64;
                let color = color32(palette::heat_color(palette::normalize(*value, min, max)));
                let square = PlotPoints::new(vec![
                    [x - 0.5, y - 0.5],
                    [x + 0.5, y - 0.5],
                    [x + 0.5, y + 0.5],
                    [x - 0.5, y + 0.5],
                ]);
                plot_ui.polygon(
                    Polygon::new(square)
                        .fill_color(color)
                        .stroke(Stroke::new(0.5, Color32::WHITE))
                        .allow_hover(false),
                );
            }
        }
    }
}
