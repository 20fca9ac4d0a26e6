//! Statistics Calculator Module
//! Grouped means, event-window comparison, rankings and pivots over observations.

use crate::data::{Area, Observation, YearMonth};
use chrono::NaiveDate;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// First day of the Covid window; everything earlier counts as "before".
pub const COVID_START: NaiveDate = match NaiveDate::from_ymd_opt(2020, 3, 1) {
    Some(date) => date,
    None => panic!("invalid Covid start date"),
};

/// Last day of the Covid window, inclusive.
pub const COVID_END: NaiveDate = match NaiveDate::from_ymd_opt(2020, 6, 30) {
    Some(date) => date,
    None => panic!("invalid Covid end date"),
};

/// Mean rate per date, ordered by date.
pub type Trend = Vec<(NaiveDate, f64)>;

/// Urban and rural trends side by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaTrends {
    pub urban: Trend,
    pub rural: Trend,
}

/// Mean rate before and during the Covid window. `NaN` when a window is empty.
#[derive(Debug, Clone, Copy)]
pub struct CovidImpact {
    pub before: f64,
    pub during: f64,
}

/// Min, mean and max rate of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub region: String,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Mean rate with regions as rows and year-month periods as columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    /// Region names, sorted.
    pub rows: Vec<String>,
    /// Periods, sorted.
    pub columns: Vec<YearMonth>,
    /// `cells[row][column]`, `None` where no observation exists.
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Handles the read-only aggregations over the observation table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean of the rate column. `NaN` for an empty selection.
    pub fn mean_rate<'a>(records: impl IntoIterator<Item = &'a Observation>) -> f64 {
        records.into_iter().map(|r| r.rate).mean()
    }

    /// Group rates by `key` and average each group, ordered by key.
    fn grouped_means<K: Ord>(
        records: &[Observation],
        key: impl Fn(&Observation) -> K,
    ) -> BTreeMap<K, f64> {
        let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        for record in records {
            groups.entry(key(record)).or_default().push(record.rate);
        }
        groups
            .into_iter()
            .map(|(k, values)| (k, values.mean()))
            .collect()
    }

    /// Mean rate per distinct date.
    pub fn overall_trend(records: &[Observation]) -> Trend {
        Self::grouped_means(records, |r| r.date).into_iter().collect()
    }

    /// Mean rate per date for one area category.
    pub fn area_trend(records: &[Observation], area: &Area) -> Trend {
        let selected: Vec<Observation> = records
            .iter()
            .filter(|r| &r.area == area)
            .cloned()
            .collect();
        Self::overall_trend(&selected)
    }

    pub fn area_trends(records: &[Observation]) -> AreaTrends {
        AreaTrends {
            urban: Self::area_trend(records, &Area::Urban),
            rural: Self::area_trend(records, &Area::Rural),
        }
    }

    /// Mean before [`COVID_START`] vs mean within [`COVID_START`]..=[`COVID_END`].
    pub fn covid_impact(records: &[Observation]) -> CovidImpact {
        let before = Self::mean_rate(records.iter().filter(|r| r.date < COVID_START));
        let during = Self::mean_rate(
            records
                .iter()
                .filter(|r| r.date >= COVID_START && r.date <= COVID_END),
        );
        CovidImpact { before, during }
    }

    /// Regions with the highest mean rate, descending. Equal means keep name order.
    pub fn top_regions(records: &[Observation], n: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = Self::grouped_means(records, |r| r.region.clone())
            .into_iter()
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Mean rate per calendar month across all years and regions.
    pub fn monthly_seasonality(records: &[Observation]) -> Vec<(u32, f64)> {
        Self::grouped_means(records, |r| r.month())
            .into_iter()
            .collect()
    }

    /// Region x year-month matrix of mean rates.
    pub fn region_month_pivot(records: &[Observation]) -> PivotTable {
        let means = Self::grouped_means(records, |r| (r.region.clone(), r.year_month()));

        let mut rows: Vec<String> = means.keys().map(|(region, _)| region.clone()).collect();
        rows.dedup();
        let mut columns: Vec<YearMonth> = means.keys().map(|(_, period)| *period).collect();
        columns.sort();
        columns.dedup();

        let cells = rows
            .iter()
            .map(|region| {
                columns
                    .iter()
                    .map(|period| means.get(&(region.clone(), *period)).copied())
                    .collect()
            })
            .collect();

        PivotTable {
            rows,
            columns,
            cells,
        }
    }

    /// Min, mean, max per region, sorted by descending mean.
    pub fn region_summary(records: &[Observation]) -> Vec<RegionSummary> {
        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in records {
            groups.entry(record.region.as_str()).or_default().push(record.rate);
        }

        let mut summaries: Vec<RegionSummary> = groups
            .into_iter()
            .map(|(region, values)| RegionSummary {
                region: region.to_string(),
                min: Statistics::min(&values),
                mean: Statistics::mean(&values),
                max: Statistics::max(&values),
            })
            .collect();
        summaries.sort_by(|a, b| b.mean.total_cmp(&a.mean));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn cell(pivot: &PivotTable, region: &str, period: YearMonth) -> Option<f64> {
        let row = pivot.rows.iter().position(|r| r == region)?;
        let col = pivot.columns.iter().position(|c| *c == period)?;
        pivot.cells[row][col]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(d: NaiveDate, region: &str, area: Area, rate: f64) -> Observation {
        Observation::new(d, region, area, rate)
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs(date(2019, 5, 31), "Assam", Area::Rural, 4.0),
            obs(date(2019, 5, 31), "Assam", Area::Urban, 8.0),
            obs(date(2019, 5, 31), "Bihar", Area::Rural, 10.0),
            obs(date(2020, 4, 30), "Bihar", Area::Urban, 40.0),
            obs(date(2020, 4, 30), "Goa", Area::Rural, 6.0),
            obs(date(2020, 5, 31), "Goa", Area::Urban, 12.0),
            obs(date(2020, 5, 31), "Kerala", Area::Rural, 3.0),
            obs(date(2019, 6, 30), "Delhi", Area::Urban, 15.0),
            obs(date(2019, 6, 30), "Punjab", Area::Rural, 7.0),
        ]
    }

    #[test]
    fn before_and_during_window_means() {
        let records = vec![
            obs(date(2020, 2, 1), "A", Area::Urban, 5.0),
            obs(date(2020, 4, 1), "A", Area::Urban, 20.0),
        ];

        let impact = StatsCalculator::covid_impact(&records);

        assert_eq!(impact.before, 5.0);
        assert_eq!(impact.during, 20.0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let records = vec![
            obs(date(2020, 3, 1), "A", Area::Urban, 10.0),
            obs(date(2020, 6, 30), "A", Area::Urban, 30.0),
            obs(date(2020, 7, 1), "A", Area::Urban, 99.0),
        ];

        let impact = StatsCalculator::covid_impact(&records);

        assert_eq!(impact.during, 20.0);
        assert!(impact.before.is_nan());
    }

    #[test]
    fn empty_selection_is_nan() {
        assert!(StatsCalculator::mean_rate(&Vec::<Observation>::new()).is_nan());
        let impact = StatsCalculator::covid_impact(&[]);
        assert!(impact.before.is_nan() && impact.during.is_nan());
    }

    #[test]
    fn overall_trend_covers_every_distinct_date() {
        let records = sample();

        let trend = StatsCalculator::overall_trend(&records);

        let trend_dates: BTreeSet<NaiveDate> = trend.iter().map(|(d, _)| *d).collect();
        let distinct: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(trend_dates, distinct);
        assert!(trend.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(trend[0].0, date(2019, 5, 31));
        assert!((trend[0].1 - 22.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn area_trends_split_urban_and_rural() {
        let trends = StatsCalculator::area_trends(&sample());

        assert_eq!(
            trends.urban,
            vec![
                (date(2019, 5, 31), 8.0),
                (date(2019, 6, 30), 15.0),
                (date(2020, 4, 30), 40.0),
                (date(2020, 5, 31), 12.0),
            ]
        );
        assert_eq!(trends.rural.len(), 4);
        assert_eq!(trends.rural[0], (date(2019, 5, 31), 7.0));
    }

    #[test]
    fn top_regions_is_sorted_subset() {
        let records = sample();
        let regions: BTreeSet<String> = records.iter().map(|r| r.region.clone()).collect();

        let top = StatsCalculator::top_regions(&records, 5);

        assert_eq!(top.len(), 5.min(regions.len()));
        assert!(top.iter().all(|(r, _)| regions.contains(r)));
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top[0], ("Bihar".to_string(), 25.0));
    }

    #[test]
    fn top_regions_with_fewer_regions_than_n() {
        let records = vec![
            obs(date(2020, 1, 31), "A", Area::Rural, 1.0),
            obs(date(2020, 1, 31), "B", Area::Rural, 2.0),
        ];

        let top = StatsCalculator::top_regions(&records, 5);

        assert_eq!(top, vec![("B".to_string(), 2.0), ("A".to_string(), 1.0)]);
    }

    #[test]
    fn seasonality_groups_by_month_number() {
        let seasonality = StatsCalculator::monthly_seasonality(&sample());

        let months: Vec<u32> = seasonality.iter().map(|(m, _)| *m).collect();
        assert_eq!(months, vec![4, 5, 6]);
        // May: 4, 8, 10 (2019) and 12, 3 (2020)
        assert!((seasonality[1].1 - 37.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn pivot_has_region_rows_and_period_columns() {
        let pivot = StatsCalculator::region_month_pivot(&sample());

        assert_eq!(
            pivot.rows,
            vec!["Assam", "Bihar", "Delhi", "Goa", "Kerala", "Punjab"]
        );
        assert_eq!(pivot.columns.len(), 4);
        assert!(pivot.columns.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(pivot.cells.len(), pivot.rows.len());
        assert!(pivot.cells.iter().all(|row| row.len() == pivot.columns.len()));

        let may_2019 = YearMonth { year: 2019, month: 5 };
        assert_eq!(cell(&pivot, "Assam", may_2019), Some(6.0));
        assert_eq!(cell(&pivot, "Kerala", may_2019), None);
    }

    #[test]
    fn region_summary_min_mean_max() {
        let records = vec![
            obs(date(2020, 1, 31), "A", Area::Rural, 1.0),
            obs(date(2020, 2, 29), "A", Area::Rural, 2.0),
            obs(date(2020, 3, 31), "A", Area::Urban, 3.0),
        ];

        let summary = StatsCalculator::region_summary(&records);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].region, "A");
        assert_eq!(summary[0].min, 1.0);
        assert_eq!(summary[0].mean, 2.0);
        assert_eq!(summary[0].max, 3.0);
    }

    #[test]
    fn region_summary_is_ordered_and_bounded() {
        let summary = StatsCalculator::region_summary(&sample());

        assert!(summary.windows(2).all(|w| w[0].mean >= w[1].mean));
        for s in &summary {
            assert!(s.min <= s.mean && s.mean <= s.max, "{} out of order", s.region);
        }
    }
}
