//! Daily movement counts.
//!
//! The one place where summaries are bucketed into up/still/down; both
//! the static chart and the dashboard go through [`classify_daily`].

use moves_core::{DailyCounts, DailySummary, MarketFilter, Thresholds};
use std::collections::{BTreeMap, HashSet};

/// Count markets per movement bucket for every date in `rows`.
///
/// Rows without a maximum-price change (a market's first date) and rows
/// sitting exactly on a threshold are counted nowhere, but their date
/// still gets an output row. Output is ascending by date.
pub fn classify_daily<'a, I>(rows: I, thresholds: &Thresholds) -> Vec<DailyCounts>
where
    I: IntoIterator<Item = &'a DailySummary>,
{
    let mut by_date: BTreeMap<_, DailyCounts> = BTreeMap::new();
    for row in rows {
        let counts = by_date
            .entry(row.date)
            .or_insert_with(|| DailyCounts::new(row.date));
        if let Some(movement) = row.pct_max_price_change.and_then(|c| thresholds.classify(c)) {
            counts.record(movement);
        }
    }
    by_date.into_values().collect()
}

/// Rows of `rows` that pass `filter`.
pub fn filter_markets<'a>(
    rows: &'a [DailySummary],
    filter: &'a MarketFilter,
) -> impl Iterator<Item = &'a DailySummary> + 'a {
    rows.iter().filter(move |r| filter.matches(&r.market))
}

/// Distinct market names in first-appearance order.
pub fn market_names(rows: &[DailySummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.market.as_str()))
        .map(|r| r.market.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, d).unwrap()
    }

    fn row(market: &str, date: NaiveDate, pct_max: Option<f64>) -> DailySummary {
        DailySummary {
            date,
            price_w_mean: 1.0,
            market: market.to_string(),
            price_maximum: 1.0,
            pct_avg_price_change: pct_max,
            pct_max_price_change: pct_max,
        }
    }

    fn table() -> Vec<DailySummary> {
        vec![
            row("AAA", jan(1), None),
            row("AAA", jan(2), Some(0.04)),
            row("AAA", jan(3), Some(0.01)),
            row("BBB", jan(1), None),
            row("BBB", jan(2), Some(-0.04)),
            row("BBB", jan(3), Some(0.10)),
            row("CCC", jan(2), None),
            row("CCC", jan(3), Some(-0.02)),
        ]
    }

    #[test]
    fn test_two_market_scenario() {
        // AAA max 100 -> 104, BBB max 100 -> 96
        let rows = vec![
            row("AAA", jan(1), None),
            row("AAA", jan(2), Some((104.0 - 100.0) / 100.0)),
            row("BBB", jan(1), None),
            row("BBB", jan(2), Some((96.0 - 100.0) / 100.0)),
        ];
        let counts = classify_daily(&rows, &Thresholds::default());

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], DailyCounts::new(jan(1)));
        assert_eq!(counts[1].date, jan(2));
        assert_eq!(counts[1].ups, 1);
        assert_eq!(counts[1].downs, 1);
        assert_eq!(counts[1].stills, 0);
    }

    #[test]
    fn test_counts_cover_non_null_values() {
        let rows = table();
        let counts = classify_daily(&rows, &Thresholds::default());

        for day in &counts {
            let non_null = rows
                .iter()
                .filter(|r| r.date == day.date && r.pct_max_price_change.is_some())
                .count() as u32;
            assert_eq!(day.total(), non_null, "date {}", day.date);
        }
        assert_eq!(counts[2].ups, 1);
        assert_eq!(counts[2].stills, 2);
        assert_eq!(counts[2].downs, 0);
    }

    #[test]
    fn test_threshold_boundaries_count_nowhere() {
        let rows = vec![
            row("AAA", jan(2), Some(0.03)),
            row("BBB", jan(2), Some(-0.03)),
        ];
        let counts = classify_daily(&rows, &Thresholds::default());
        assert_eq!(counts[0].total(), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let rows = table();
        let wide = Thresholds::new(0.2, -0.2).unwrap();
        let counts = classify_daily(&rows, &wide);
        assert!(counts.iter().all(|c| c.ups == 0 && c.downs == 0));
        assert_eq!(counts[2].stills, 3);
    }

    #[test]
    fn test_single_market_filter_matches_contribution() {
        let rows = table();
        let thresholds = Thresholds::default();
        let all = classify_daily(&rows, &thresholds);

        let mut summed: BTreeMap<NaiveDate, (u32, u32, u32)> = BTreeMap::new();
        for market in market_names(&rows) {
            let filter = MarketFilter::from_selection([market.clone()]);
            let only = classify_daily(filter_markets(&rows, &filter), &thresholds);

            // every counted row belongs to the selected market
            for day in &only {
                let expected = rows
                    .iter()
                    .filter(|r| r.market == market && r.date == day.date)
                    .filter_map(|r| r.pct_max_price_change)
                    .filter_map(|c| thresholds.classify(c))
                    .count() as u32;
                assert_eq!(day.total(), expected);
                let entry = summed.entry(day.date).or_default();
                entry.0 += day.ups;
                entry.1 += day.stills;
                entry.2 += day.downs;
            }
        }

        for day in &all {
            assert_eq!(summed[&day.date], (day.ups, day.stills, day.downs));
        }
    }

    #[test]
    fn test_all_markets_filter_is_identity() {
        let rows = table();
        let filter = MarketFilter::All;
        let thresholds = Thresholds::default();
        assert_eq!(
            classify_daily(filter_markets(&rows, &filter), &thresholds),
            classify_daily(&rows, &thresholds)
        );
    }

    #[test]
    fn test_empty_selection_yields_no_rows() {
        let rows = table();
        let filter = MarketFilter::from_selection(Vec::<String>::new());
        assert!(classify_daily(filter_markets(&rows, &filter), &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_market_names_in_order() {
        assert_eq!(market_names(&table()), vec!["AAA", "BBB", "CCC"]);
    }
}
