mod common;

use common::scenario_dataset;
use groundwater_dash::data::aggregate::{aggregate, AggregationEngine, GroupedRow, SummaryScope};
use groundwater_dash::data::filter::{Choice, FilterGraph, Selection};
use groundwater_dash::data::session::{FilterEvent, Session};

fn row(region: &str, site: &str, count: u64) -> GroupedRow {
    GroupedRow {
        region: region.to_string(),
        site: site.to_string(),
        measurement_count: count,
    }
}

#[test]
fn year_with_all_regions_and_sites() {
    let engine = AggregationEngine::new(scenario_dataset());
    let summary = engine.aggregate(&Selection::new(Some("2020"), Choice::All, Choice::All));
    assert_eq!(summary.site_count, 2);
    assert_eq!(summary.total_measurements, 2);
    assert_eq!(summary.rows, vec![row("AGS", "SiteA", 1), row("BC", "SiteB", 1)]);
}

#[test]
fn no_year_reports_global_site_count() {
    let engine = AggregationEngine::new(scenario_dataset());
    let summary = engine.aggregate(&Selection::default());
    assert_eq!(summary.scope, SummaryScope::Global);
    assert_eq!(summary.site_count, 2);
    assert_eq!(summary.total_measurements, 0);
    assert!(summary.rows.is_empty());
}

#[test]
fn specific_region() {
    let engine = AggregationEngine::new(scenario_dataset());
    let selection = Selection::new(Some("2020"), Choice::specific("AGS"), Choice::All);
    let summary = engine.aggregate(&selection);
    assert_eq!(summary.site_count, 1);
    assert_eq!(summary.total_measurements, 1);
    assert_eq!(summary.rows, vec![row("AGS", "SiteA", 1)]);
}

#[test]
fn year_without_rows_is_empty_not_an_error() {
    let engine = AggregationEngine::new(scenario_dataset());
    let summary = engine.aggregate(&Selection::new(Some("2099"), Choice::All, Choice::All));
    assert_eq!(summary.scope, SummaryScope::Filtered);
    assert_eq!(summary.site_count, 0);
    assert_eq!(summary.total_measurements, 0);
    assert!(summary.rows.is_empty());
}

#[test]
fn aggregate_is_idempotent_and_sums_match() {
    let ds = scenario_dataset();
    let selections = [
        Selection::new(Some("2020"), Choice::All, Choice::All),
        Selection::new(Some("2021"), Choice::specific("AGS"), Choice::specific("SiteA")),
        Selection::new(Some("2020"), Choice::specific("BC"), Choice::specific("SiteA")),
    ];
    for sel in &selections {
        let first = aggregate(&ds.measurements, ds.total_site_count, sel);
        let second = aggregate(&ds.measurements, ds.total_site_count, sel);
        assert_eq!(first, second);
        let table_sum: u64 = first.rows.iter().map(|r| r.measurement_count).sum();
        assert_eq!(first.total_measurements, table_sum, "selection {sel:?}");
    }
}

#[test]
fn region_options_have_no_duplicates() {
    let graph = FilterGraph::new(scenario_dataset());
    for year in graph.year_options() {
        let opts = graph.options_for_region(Some(year.as_str()));
        assert_eq!(opts.iter().next(), Some(&Choice::All));
        let values: Vec<&str> = opts.values().collect();
        let mut deduped = values.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(values.len(), deduped.len(), "year {year}");
    }
}

#[test]
fn year_change_always_resets_downstream() {
    let mut session = Session::new(scenario_dataset());
    for year in ["2020", "2021", "2099"] {
        session.apply(FilterEvent::RegionChanged(Choice::specific("AGS")));
        session.apply(FilterEvent::SiteChanged(Choice::specific("SiteA")));
        session.apply(FilterEvent::YearChanged(Some(year.to_string())));
        assert_eq!(session.selection().region, Choice::All);
        assert_eq!(session.selection().site, Choice::All);
    }
}

#[test]
fn sessions_over_one_dataset_are_independent() {
    let ds = scenario_dataset();
    let mut a = Session::new(ds.clone());
    let b = Session::new(ds);
    a.apply(FilterEvent::YearChanged(Some("2020".to_string())));
    assert_eq!(a.selection().year.as_deref(), Some("2020"));
    assert_eq!(b.selection().year.as_deref(), Some("2021"));
    assert_eq!(b.summary().total_measurements, 1);
}
