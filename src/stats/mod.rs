//! Stats module - aggregations over cleaned observations

mod calculator;

pub use calculator::{AreaTrends, CovidImpact, PivotTable, RegionSummary, StatsCalculator, Trend};
