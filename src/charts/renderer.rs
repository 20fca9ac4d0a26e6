//! Static Chart Renderer
//! Draws charts off-screen with plotters into an RGB buffer, optionally saved as PNG.

use super::model::{Chart, ChartKind, PlotSeries, XScale};
use super::palette::{self, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const COLORBAR_WIDTH: u32 = 110;
const DATE_TICKS: usize = 12;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chart window error: {0}")]
    Window(String),
}

fn render_err<E: Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn rgb((r, g, b): Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart into a fresh `width * height * 3` RGB buffer.
    pub fn render_rgb(chart: &Chart, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            match &chart.kind {
                ChartKind::Line { series, x_scale } => {
                    Self::draw_lines(&root, chart, series, *x_scale)?
                }
                ChartKind::Bar { categories, values } => {
                    Self::draw_bars(&root, chart, categories, values)?
                }
                ChartKind::Heatmap { rows, columns, cells } => {
                    Self::draw_heatmap(&root, chart, rows, columns, cells, width)?
                }
            }

            root.present().map_err(render_err)?;
        }
        Ok(buffer)
    }

    /// Write an RGB buffer as PNG.
    pub fn save_png(
        buffer: Vec<u8>,
        width: u32,
        height: u32,
        path: &Path,
    ) -> Result<(), ChartError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let image = image::RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            ChartError::Render(format!("buffer does not match {}x{}", width, height))
        })?;
        image.save(path)?;
        Ok(())
    }

    fn x_label_area(chart: &Chart) -> u32 {
        if chart.rotate_x_labels {
            110
        } else {
            50
        }
    }

    fn draw_lines(
        root: &Canvas,
        chart: &Chart,
        series: &[PlotSeries],
        x_scale: XScale,
    ) -> Result<(), ChartError> {
        let (x0, x1) = chart.x_range();
        let (y0, y1) = chart.y_range();

        let mut cc = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(Self::x_label_area(chart))
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let x_fmt = |x: &f64| chart.x_tick_label(*x);
        let rotated = (FONT, 13).into_font().transform(FontTransform::Rotate90);
        let mut mesh = cc.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&x_fmt)
            .x_labels(match x_scale {
                XScale::Dates => DATE_TICKS,
                XScale::Months => 12,
            });
        if chart.rotate_x_labels {
            mesh.x_label_style(rotated);
        }
        mesh.draw().map_err(render_err)?;

        for s in series {
            let color = rgb(s.color);
            cc.draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))
                .map_err(render_err)?
                .label(s.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            if s.markers {
                cc.draw_series(
                    s.points
                        .iter()
                        .map(|&point| Circle::new(point, 4, color.filled())),
                )
                .map_err(render_err)?;
            }
        }

        if chart.legend {
            cc.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_err)?;
        }
        Ok(())
    }

    fn draw_bars(
        root: &Canvas,
        chart: &Chart,
        categories: &[String],
        values: &[f64],
    ) -> Result<(), ChartError> {
        let (x0, x1) = chart.x_range();
        let (y0, y1) = chart.y_range();

        let mut cc = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(Self::x_label_area(chart))
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let x_fmt = |x: &f64| chart.x_tick_label(*x);
        let rotated = (FONT, 13).into_font().transform(FontTransform::Rotate90);
        let mut mesh = cc.configure_mesh();
        mesh.disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&x_fmt)
            .x_labels(categories.len().max(1));
        if chart.rotate_x_labels {
            mesh.x_label_style(rotated);
        }
        mesh.draw().map_err(render_err)?;

        cc.draw_series(values.iter().enumerate().map(|(i, value)| {
            let x = i as f64;
            let color = rgb(palette::series_color(i));
            Rectangle::new([(x - 0.3, 0.0), (x + 0.3, *value)], color.filled())
        }))
        .map_err(render_err)?;
        Ok(())
    }

    fn draw_heatmap(
        root: &Canvas,
        chart: &Chart,
        rows: &[String],
        columns: &[String],
        cells: &[Vec<Option<f64>>],
        width: u32,
    ) -> Result<(), ChartError> {
        let (main, colorbar) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));
        let (x0, x1) = chart.x_range();
        let (y0, y1) = chart.y_range();

        let mut cc = ChartBuilder::on(&main)
            .caption(&chart.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(Self::x_label_area(chart))
            .y_label_area_size(160)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let x_fmt = |x: &f64| chart.x_tick_label(*x);
        let y_fmt = |y: &f64| chart.y_tick_label(*y);
        let rotated = (FONT, 12).into_font().transform(FontTransform::Rotate90);
        let mut mesh = cc.configure_mesh();
        mesh.disable_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_labels(columns.len().max(1))
            .y_labels(rows.len().max(1));
        if chart.rotate_x_labels {
            mesh.x_label_style(rotated);
        }
        mesh.draw().map_err(render_err)?;

        let Some((min, max)) = chart.value_range() else {
            return Ok(());
        };

        let n_rows = rows.len();
        cc.draw_series(cells.iter().enumerate().flat_map(|(row, row_cells)| {
            let y = (n_rows - 1 - row) as f64;
            row_cells.iter().enumerate().filter_map(move |(col, cell)| {
                let value = (*cell)?;
                let x = col as f64;
                let color = rgb(palette::heat_color(palette::normalize(value, min, max)));
                Some(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    color.filled(),
                ))
            })
        }))
        .map_err(render_err)?;

        Self::draw_colorbar(&colorbar, min, max)
    }

    fn draw_colorbar(area: &Canvas, min: f64, max: f64) -> Result<(), ChartError> {
        const STEPS: usize = 64;
        let span = if max > min { max - min } else { 1.0 };

        let mut cc = ChartBuilder::on(area)
            .margin_top(70)
            .margin_bottom(120)
            .margin_right(10)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..1.0, min..min + span)
            .map_err(render_err)?;

        cc.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&|v: &f64| format!("{:.0}", v))
            .draw()
            .map_err(render_err)?;

        cc.draw_series((0..STEPS).map(|i| {
            let lo = min + span * i as f64 / STEPS as f64;
            let hi = min + span * (i + 1) as f64 / STEPS as f64;
            let color = rgb(palette::heat_color(i as f64 / (STEPS - 1) as f64));
            Rectangle::new([(0.0, lo), (1.0, hi)], color.filled())
        }))
        .map_err(render_err)?;
        Ok(())
    }
}
