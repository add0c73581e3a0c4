use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use super::filter::Selection;
use super::model::{Dataset, Measurement};

// ---------------------------------------------------------------------------
// Summary – the aggregation output handed to the presentation layer
// ---------------------------------------------------------------------------

/// One row of the grouped table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedRow {
    pub region: String,
    pub site: String,
    pub measurement_count: u64,
}

/// Whether a summary describes the whole file or a filtered year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryScope {
    /// No year chosen yet: the site count covers the whole dataset.
    Global,
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub scope: SummaryScope,
    pub site_count: usize,
    pub total_measurements: u64,
    /// Ordered by `(region, site)`.
    pub rows: Vec<GroupedRow>,
}

impl Summary {
    fn global(total_site_count: usize) -> Self {
        Self {
            scope: SummaryScope::Global,
            site_count: total_site_count,
            total_measurements: 0,
            rows: Vec::new(),
        }
    }

    /// Site metric line, e.g. `Filtered sites (Year=2020, Region=ALL, Site=ALL): 2`.
    pub fn site_metric_text(&self, selection: &Selection, all_label: &str) -> String {
        let count = format_thousands(self.site_count as u64);
        match (self.scope, selection.year.as_deref()) {
            (SummaryScope::Filtered, Some(year)) => format!(
                "Filtered sites (Year={year}, Region={}, Site={}): {count}",
                selection.region.label(all_label),
                selection.site.label(all_label),
            ),
            _ => format!("Total sites in dataset: {count}"),
        }
    }

    /// Measurement metric line; empty before a year is chosen.
    pub fn measurement_metric_text(&self) -> String {
        match self.scope {
            SummaryScope::Global => String::new(),
            SummaryScope::Filtered => format!(
                "Total measurements shown: {}",
                format_thousands(self.total_measurements)
            ),
        }
    }

    /// Measurement totals per region, in table order.
    pub fn region_totals(&self) -> Vec<(&str, u64)> {
        let mut totals: Vec<(&str, u64)> = Vec::new();
        for row in &self.rows {
            if let Some((region, total)) = totals.last_mut() {
                if *region == row.region {
                    *total += row.measurement_count;
                    continue;
                }
            }
            totals.push((row.region.as_str(), row.measurement_count));
        }
        totals
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Reduce `rows` under `selection` to site/measurement counts and a grouped table.
///
/// With no year selected this is the initial state: the global site count,
/// zero measurements and an empty table.
pub fn aggregate(rows: &[Measurement], total_site_count: usize, selection: &Selection) -> Summary {
    if selection.year.is_none() {
        return Summary::global(total_site_count);
    }

    let mut sites: BTreeSet<&str> = BTreeSet::new();
    let mut groups: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    let mut total_measurements = 0;

    for m in rows.iter().filter(|m| selection.admits(m)) {
        sites.insert(m.site.as_str());
        *groups.entry((m.region.as_str(), m.site.as_str())).or_default() += m.unit_count;
        total_measurements += m.unit_count;
    }

    Summary {
        scope: SummaryScope::Filtered,
        site_count: sites.len(),
        total_measurements,
        rows: groups
            .into_iter()
            .map(|((region, site), measurement_count)| GroupedRow {
                region: region.to_string(),
                site: site.to_string(),
                measurement_count,
            })
            .collect(),
    }
}

/// Aggregation over an injected, shared dataset.
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    dataset: Arc<Dataset>,
}

impl AggregationEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn aggregate(&self, selection: &Selection) -> Summary {
        aggregate(&self.dataset.measurements, self.dataset.total_site_count, selection)
    }
}

/// Format an integer with comma thousands separators (`12,345`).
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Choice;

    fn rows() -> Vec<Measurement> {
        vec![
            Measurement::new("BC", "SiteB", "2020", 30.2),
            Measurement::new("AGS", "SiteA", "2020", 10.5),
            Measurement::new("AGS", "SiteA", "2020", 12.0),
            Measurement::new("AGS", "SiteC", "2020", 1.0),
        ]
    }

    #[test]
    fn groups_are_lexicographic_and_sum_unit_counts() {
        let sel = Selection::new(Some("2020"), Choice::All, Choice::All);
        let summary = aggregate(&rows(), 3, &sel);
        let keys: Vec<_> = summary
            .rows
            .iter()
            .map(|r| (r.region.as_str(), r.site.as_str(), r.measurement_count))
            .collect();
        assert_eq!(keys, vec![("AGS", "SiteA", 2), ("AGS", "SiteC", 1), ("BC", "SiteB", 1)]);
        assert_eq!(summary.site_count, 3);
        assert_eq!(summary.total_measurements, 4);
        assert_eq!(summary.region_totals(), vec![("AGS", 3), ("BC", 1)]);
    }

    #[test]
    fn weighted_unit_counts_are_summed() {
        let mut rows = rows();
        rows[0].unit_count = 5;
        let sel = Selection::new(Some("2020"), Choice::specific("BC"), Choice::All);
        let summary = aggregate(&rows, 3, &sel);
        assert_eq!(summary.total_measurements, 5);
        assert_eq!(summary.rows[0].measurement_count, 5);
        assert_eq!(summary.site_count, 1);
    }

    #[test]
    fn unresolved_site_matches_nothing() {
        let sel = Selection::new(Some("2020"), Choice::All, Choice::Unresolved);
        let summary = aggregate(&rows(), 3, &sel);
        assert_eq!(summary.scope, SummaryScope::Filtered);
        assert_eq!(summary.total_measurements, 0);
        assert!(summary.rows.is_empty());
    }

    #[test]
    fn metric_texts() {
        let sel = Selection::new(Some("2020"), Choice::specific("AGS"), Choice::All);
        let summary = aggregate(&rows(), 3, &sel);
        assert_eq!(
            summary.site_metric_text(&sel, "ALL"),
            "Filtered sites (Year=2020, Region=AGS, Site=ALL): 2"
        );
        assert_eq!(summary.measurement_metric_text(), "Total measurements shown: 3");

        let global = aggregate(&rows(), 1234, &Selection::default());
        assert_eq!(
            global.site_metric_text(&Selection::default(), "ALL"),
            "Total sites in dataset: 1,234"
        );
        assert_eq!(global.measurement_metric_text(), "");
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
