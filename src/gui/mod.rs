//! GUI module - Native chart windows

mod app;
mod chart_viewer;

pub use app::ChartWindow;
