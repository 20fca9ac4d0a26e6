//! Charts module - Chart model, interactive plotting and static rendering

mod model;
mod palette;
mod plotter;
mod presenter;
mod renderer;

pub use model::Chart;
pub use palette::heat_color;
pub use plotter::{color32, ChartPlotter};
pub use presenter::ChartPresenter;
