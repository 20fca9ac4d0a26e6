//! Chart Model
//! Backend-neutral description of every chart the analysis draws.

use super::palette::{self, Rgb};
use crate::data::UNIX_EPOCH_DAYS_FROM_CE;
use crate::stats::{AreaTrends, PivotTable, Trend};
use chrono::{Datelike, NaiveDate};

/// How x values of a line chart turn into tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XScale {
    /// Days since 1970-01-01, labelled `YYYY-MM`.
    Dates,
    /// Month numbers, one tick per month 1..=12.
    Months,
}

/// One named polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
    pub markers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line {
        series: Vec<PlotSeries>,
        x_scale: XScale,
    },
    /// Categories sit at x = 0, 1, 2, ...
    Bar {
        categories: Vec<String>,
        values: Vec<f64>,
    },
    /// `cells[row][column]`; the first row is drawn on top.
    Heatmap {
        rows: Vec<String>,
        columns: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub rotate_x_labels: bool,
    pub legend: bool,
    pub kind: ChartKind,
}

pub fn date_to_x(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 / 2.0 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32 + UNIX_EPOCH_DAYS_FROM_CE)
}

/// Widest date span, in days, that still gets month marks.
const MAX_MARK_SPAN_DAYS: f64 = 365.0 * 200.0;

/// Grid marks on the first day of every month within `[lo, hi]`, as `(x, step_days)`.
///
/// January carries a yearly step and quarter starts a quarterly one, so a
/// crowded axis keeps only those labels.
pub fn month_marks(lo: f64, hi: f64) -> Vec<(f64, f64)> {
    if hi - lo > MAX_MARK_SPAN_DAYS || x_to_date(hi).is_none() {
        return Vec::new();
    }
    let Some(start) = x_to_date(lo) else {
        return Vec::new();
    };

    let mut marks = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        let x = date_to_x(first);
        if x > hi {
            break;
        }
        if x >= lo {
            let step = match month {
                1 => 365.0,
                4 | 7 | 10 => 91.0,
                _ => 30.0,
            };
            marks.push((x, step));
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    marks
}

fn trend_points(trend: &Trend) -> Vec<(f64, f64)> {
    trend.iter().map(|(d, v)| (date_to_x(*d), *v)).collect()
}

/// Category label when `value` lands on an integer position.
fn category_at(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

impl Chart {
    pub fn overall_trend(trend: &Trend) -> Self {
        Self {
            title: "Average Unemployment Rate (%) in India Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Unemployment Rate (%)".to_string(),
            rotate_x_labels: true,
            legend: false,
            kind: ChartKind::Line {
                series: vec![PlotSeries {
                    name: "Average".to_string(),
                    color: palette::series_color(0),
                    points: trend_points(trend),
                    markers: false,
                }],
                x_scale: XScale::Dates,
            },
        }
    }

    pub fn area_trends(trends: &AreaTrends) -> Self {
        Self {
            title: "Unemployment Rate: Urban vs Rural".to_string(),
            x_label: "Date".to_string(),
            y_label: "Unemployment Rate (%)".to_string(),
            rotate_x_labels: true,
            legend: true,
            kind: ChartKind::Line {
                series: vec![
                    PlotSeries {
                        name: "Urban".to_string(),
                        color: palette::URBAN_COLOR,
                        points: trend_points(&trends.urban),
                        markers: false,
                    },
                    PlotSeries {
                        name: "Rural".to_string(),
                        color: palette::RURAL_COLOR,
                        points: trend_points(&trends.rural),
                        markers: false,
                    },
                ],
                x_scale: XScale::Dates,
            },
        }
    }

    pub fn top_regions(top: &[(String, f64)], n: usize) -> Self {
        Self {
            title: format!("Top {} States by Average Unemployment Rate (%)", n),
            x_label: "State".to_string(),
            y_label: "Average Unemployment Rate (%)".to_string(),
            rotate_x_labels: true,
            legend: false,
            kind: ChartKind::Bar {
                categories: top.iter().map(|(region, _)| region.clone()).collect(),
                values: top.iter().map(|(_, mean)| *mean).collect(),
            },
        }
    }

    pub fn seasonality(monthly: &[(u32, f64)]) -> Self {
        Self {
            title: "Average Unemployment Rate (%) by Month (Seasonality Check)".to_string(),
            x_label: "Month".to_string(),
            y_label: "Average Unemployment Rate (%)".to_string(),
            rotate_x_labels: false,
            legend: false,
            kind: ChartKind::Line {
                series: vec![PlotSeries {
                    name: "Monthly average".to_string(),
                    color: palette::series_color(0),
                    points: monthly.iter().map(|(m, v)| (*m as f64, *v)).collect(),
                    markers: true,
                }],
                x_scale: XScale::Months,
            },
        }
    }

    pub fn heatmap(pivot: &PivotTable) -> Self {
        Self {
            title: "Unemployment Rate (%) by State and Month".to_string(),
            x_label: "Year-Month".to_string(),
            y_label: "State".to_string(),
            rotate_x_labels: true,
            legend: false,
            kind: ChartKind::Heatmap {
                rows: pivot.rows.clone(),
                columns: pivot.columns.iter().map(|c| c.to_string()).collect(),
                cells: pivot.cells.clone(),
            },
        }
    }

    /// File-name friendly form of the title.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        slug.trim_end_matches('_').to_string()
    }

    /// Tick label for an x position.
    pub fn x_tick_label(&self, x: f64) -> String {
        match &self.kind {
            ChartKind::Line {
                x_scale: XScale::Dates,
                ..
            } => x_to_date(x)
                .map(|d| format!("{:04}-{:02}", d.year(), d.month()))
                .unwrap_or_default(),
            ChartKind::Line {
                x_scale: XScale::Months,
                ..
            } => {
                let rounded = x.round();
                if (x - rounded).abs() < 1e-6 && (1.0..=12.0).contains(&rounded) {
                    format!("{}", rounded as u32)
                } else {
                    String::new()
                }
            }
            ChartKind::Bar { categories, .. } => category_at(categories, x),
            ChartKind::Heatmap { columns, .. } => category_at(columns, x),
        }
    }

    /// Tick label for a y position. Only heatmaps have categorical rows.
    pub fn y_tick_label(&self, y: f64) -> String {
        match &self.kind {
            ChartKind::Heatmap { rows, .. } => {
                let rounded = y.round();
                if (y - rounded).abs() > 1e-6 || rounded < 0.0 || rounded as usize >= rows.len() {
                    return String::new();
                }
                let flipped = (rows.len() - 1 - rounded as usize) as f64;
                category_at(rows, flipped)
            }
            _ => format!("{:.1}", y),
        }
    }

    /// Data extent along x, with a small margin.
    pub fn x_range(&self) -> (f64, f64) {
        match &self.kind {
            ChartKind::Line {
                series,
                x_scale: XScale::Months,
            } => {
                let (lo, hi) = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
                (lo.min(1.0) - 0.5, hi.max(12.0) + 0.5)
            }
            ChartKind::Line { series, .. } => {
                let (lo, hi) = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
                pad(lo, hi, 0.02)
            }
            ChartKind::Bar { categories, .. } => (-0.5, categories.len().max(1) as f64 - 0.5),
            ChartKind::Heatmap { columns, .. } => (-0.5, columns.len().max(1) as f64 - 0.5),
        }
    }

    /// Data extent along y, with a small margin. Bars always start at zero.
    pub fn y_range(&self) -> (f64, f64) {
        match &self.kind {
            ChartKind::Line { series, .. } => {
                let (lo, hi) = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));
                pad(lo, hi, 0.05)
            }
            ChartKind::Bar { values, .. } => {
                let (_, hi) = extent(values.iter().copied());
                let top = if hi.is_finite() && hi > 0.0 { hi * 1.1 } else { 1.0 };
                (0.0, top)
            }
            ChartKind::Heatmap { rows, .. } => (-0.5, rows.len().max(1) as f64 - 0.5),
        }
    }

    /// Smallest and largest heatmap cell, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let ChartKind::Heatmap { cells, .. } = &self.kind else {
            return None;
        };
        let values = cells.iter().flatten().filter_map(|v| *v);
        let (lo, hi) = extent(values);
        (lo <= hi).then_some((lo, hi))
    }
}

/// Min and max of the finite values. `(INF, -INF)` when there are none.
fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn pad(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
    if lo > hi {
        return (0.0, 1.0);
    }
    let span = (hi - lo).max(1.0);
    (lo - span * fraction, hi + span * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::YearMonth;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_map_to_epoch_days() {
        assert_eq!(date_to_x(date(1970, 1, 1)), 0.0);
        assert_eq!(date_to_x(date(1970, 1, 11)), 10.0);
        assert_eq!(x_to_date(date_to_x(date(2020, 3, 1))), Some(date(2020, 3, 1)));
    }

    #[test]
    fn month_marks_fall_on_first_days() {
        let marks = month_marks(date_to_x(date(2019, 11, 15)), date_to_x(date(2020, 4, 1)));

        let dates: Vec<NaiveDate> = marks.iter().filter_map(|(x, _)| x_to_date(*x)).collect();
        assert_eq!(
            dates,
            vec![
                date(2019, 12, 1),
                date(2020, 1, 1),
                date(2020, 2, 1),
                date(2020, 3, 1),
                date(2020, 4, 1),
            ]
        );
        let steps: Vec<f64> = marks.iter().map(|(_, step)| *step).collect();
        assert_eq!(steps, vec![30.0, 365.0, 30.0, 30.0, 91.0]);
        assert!(month_marks(0.0, MAX_MARK_SPAN_DAYS * 2.0).is_empty());
    }

    #[test]
    fn overall_trend_chart() {
        let trend = vec![(date(2019, 5, 31), 8.0), (date(2019, 6, 30), 9.5)];

        let chart = Chart::overall_trend(&trend);

        assert_eq!(chart.title, "Average Unemployment Rate (%) in India Over Time");
        assert_eq!(chart.x_label, "Date");
        assert_eq!(chart.y_label, "Unemployment Rate (%)");
        assert!(chart.rotate_x_labels);
        let ChartKind::Line { series, x_scale } = &chart.kind else {
            panic!("expected a line chart");
        };
        assert_eq!(*x_scale, XScale::Dates);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points[1], (date_to_x(date(2019, 6, 30)), 9.5));
        assert_eq!(chart.x_tick_label(date_to_x(date(2019, 6, 30))), "2019-06");
    }

    #[test]
    fn area_chart_has_two_named_series() {
        let trends = AreaTrends {
            urban: vec![(date(2020, 1, 31), 10.0)],
            rural: vec![(date(2020, 1, 31), 6.0), (date(2020, 2, 29), 7.0)],
        };

        let chart = Chart::area_trends(&trends);

        assert_eq!(chart.title, "Unemployment Rate: Urban vs Rural");
        assert!(chart.legend);
        let ChartKind::Line { series, .. } = &chart.kind else {
            panic!("expected a line chart");
        };
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Urban", "Rural"]);
        assert_eq!(series[1].points.len(), 2);
    }

    #[test]
    fn top_regions_bar_chart() {
        let top = vec![("Tripura".to_string(), 28.0), ("Haryana".to_string(), 26.0)];

        let chart = Chart::top_regions(&top, 5);

        assert_eq!(chart.title, "Top 5 States by Average Unemployment Rate (%)");
        assert_eq!(chart.x_label, "State");
        assert_eq!(chart.y_label, "Average Unemployment Rate (%)");
        assert_eq!(chart.x_tick_label(1.0), "Haryana");
        assert_eq!(chart.x_tick_label(0.5), "");
        assert_eq!(chart.x_tick_label(2.0), "");
        assert_eq!(chart.y_range().0, 0.0);
    }

    #[test]
    fn seasonality_ticks_are_month_numbers() {
        let chart = Chart::seasonality(&[(1, 5.0), (6, 7.5)]);

        assert_eq!(
            chart.title,
            "Average Unemployment Rate (%) by Month (Seasonality Check)"
        );
        assert_eq!(chart.x_label, "Month");
        assert_eq!(chart.y_label, "Average Unemployment Rate (%)");
        assert_eq!(chart.x_tick_label(6.0), "6");
        assert_eq!(chart.x_tick_label(13.0), "");
        assert_eq!(chart.x_range(), (0.5, 12.5));
        let ChartKind::Line { series, .. } = &chart.kind else {
            panic!("expected a line chart");
        };
        assert!(series[0].markers);
    }

    #[test]
    fn heatmap_rows_top_down() {
        let pivot = PivotTable {
            rows: vec!["Assam".into(), "Bihar".into(), "Goa".into()],
            columns: vec![
                YearMonth { year: 2020, month: 1 },
                YearMonth { year: 2020, month: 2 },
            ],
            cells: vec![
                vec![Some(1.0), None],
                vec![Some(2.0), Some(3.0)],
                vec![None, Some(9.0)],
            ],
        };

        let chart = Chart::heatmap(&pivot);

        assert_eq!(chart.title, "Unemployment Rate (%) by State and Month");
        assert_eq!(chart.x_label, "Year-Month");
        assert_eq!(chart.y_label, "State");
        assert_eq!(chart.x_tick_label(1.0), "2020-02");
        assert_eq!(chart.y_tick_label(2.0), "Assam");
        assert_eq!(chart.y_tick_label(0.0), "Goa");
        assert_eq!(chart.value_range(), Some((1.0, 9.0)));
    }

    #[test]
    fn slug_from_title() {
        let chart = Chart::top_regions(&[], 5);
        assert_eq!(chart.slug(), "top_5_states_by_average_unemployment_rate");
    }
}
