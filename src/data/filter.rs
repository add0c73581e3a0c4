use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::model::{Dataset, Measurement};

// ---------------------------------------------------------------------------
// Choice: the selection of one dependent dimension (region or site)
// ---------------------------------------------------------------------------

/// Selection of a dependent filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Choice {
    /// The upstream dimension has not been chosen yet.
    #[default]
    Unresolved,
    /// Every value of the dimension.
    All,
    Specific(String),
}

impl Choice {
    pub fn specific(value: impl Into<String>) -> Self {
        Choice::Specific(value.into())
    }

    /// Whether a row with dimension value `value` passes this choice.
    ///
    /// `Unresolved` admits nothing: an unchosen filter never widens to "all".
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Choice::Unresolved => false,
            Choice::All => true,
            Choice::Specific(v) => v == value,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Choice::Unresolved)
    }

    /// Display label, using `all_label` for the sentinel.
    pub fn label<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            Choice::Unresolved => "",
            Choice::All => all_label,
            Choice::Specific(v) => v,
        }
    }
}

// ---------------------------------------------------------------------------
// OptionSet
// ---------------------------------------------------------------------------

/// Valid values of a dependent dimension, `All` first when enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<Choice>,
}

/// A label/value pair handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: String,
    pub value: Choice,
}

impl OptionSet {
    /// The disabled dimension: no options at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `All` followed by the distinct `values`, in first-seen order.
    pub fn with_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = HashSet::new();
        let entries = std::iter::once(Choice::All)
            .chain(
                values
                    .into_iter()
                    .filter(|v| seen.insert(*v))
                    .map(|v| Choice::Specific(v.to_string())),
            )
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, choice: &Choice) -> bool {
        self.entries.contains(choice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.entries.iter()
    }

    /// Concrete values, without the `All` sentinel.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|c| match c {
            Choice::Specific(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn labelled(&self, all_label: &str) -> Vec<FilterOption> {
        self.entries
            .iter()
            .map(|c| FilterOption {
                label: c.label(all_label).to_string(),
                value: c.clone(),
            })
            .collect()
    }

    /// Default selection for a dimension offering these options.
    pub fn default_choice(&self) -> Choice {
        if self.is_empty() {
            Choice::Unresolved
        } else {
            Choice::All
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The current filter selection of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Year is always a concrete value once chosen; it has no `All`.
    pub year: Option<String>,
    pub region: Choice,
    pub site: Choice,
}

impl Selection {
    pub fn new(year: Option<&str>, region: Choice, site: Choice) -> Self {
        Self {
            year: year.map(str::to_string),
            region,
            site,
        }
    }

    /// Whether a measurement passes every dimension of the selection.
    pub fn admits(&self, m: &Measurement) -> bool {
        self.year.as_deref() == Some(m.year.as_str())
            && self.region.admits(&m.region)
            && self.site.admits(&m.site)
    }
}

// ---------------------------------------------------------------------------
// FilterGraph
// ---------------------------------------------------------------------------

/// Option computation for the cascading year → region → site filters.
///
/// Each dimension reads only the selections upstream of it.
#[derive(Debug, Clone)]
pub struct FilterGraph {
    dataset: Arc<Dataset>,
}

impl FilterGraph {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Distinct years, most recent first.
    pub fn year_options(&self) -> &[String] {
        &self.dataset.years
    }

    /// `All` plus the distinct regions measured in `year`.
    pub fn options_for_region(&self, year: Option<&str>) -> OptionSet {
        let Some(year) = year else {
            return OptionSet::empty();
        };
        OptionSet::with_values(
            self.dataset
                .measurements
                .iter()
                .filter(|m| m.year == year)
                .map(|m| m.region.as_str()),
        )
    }

    /// `All` plus the distinct sites measured in `year` within `region`.
    pub fn options_for_site(&self, year: Option<&str>, region: &Choice) -> OptionSet {
        let Some(year) = year else {
            return OptionSet::empty();
        };
        if !region.is_resolved() {
            return OptionSet::empty();
        }
        OptionSet::with_values(
            self.dataset
                .measurements
                .iter()
                .filter(|m| m.year == year && region.admits(&m.region))
                .map(|m| m.site.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> FilterGraph {
        FilterGraph::new(Arc::new(Dataset::from_measurements(vec![
            Measurement::new("AGS", "SiteA", "2020", 10.5),
            Measurement::new("AGS", "SiteA", "2021", 5.7),
            Measurement::new("BC", "SiteB", "2020", 30.2),
            Measurement::new("AGS", "SiteC", "2020", 1.0),
            Measurement::new("AGS", "SiteA", "2020", 11.0),
        ])))
    }

    #[test]
    fn region_options_are_all_plus_distinct_regions_of_year() {
        let opts = graph().options_for_region(Some("2020"));
        assert_eq!(
            opts.iter().cloned().collect::<Vec<_>>(),
            vec![Choice::All, Choice::specific("AGS"), Choice::specific("BC")]
        );
        let opts = graph().options_for_region(Some("2021"));
        assert_eq!(opts.values().collect::<Vec<_>>(), vec!["AGS"]);
    }

    #[test]
    fn unknown_year_still_offers_all() {
        let opts = graph().options_for_region(Some("2099"));
        assert_eq!(opts.len(), 1);
        assert!(opts.contains(&Choice::All));
    }

    #[test]
    fn unresolved_upstream_yields_empty_options() {
        let g = graph();
        assert!(g.options_for_region(None).is_empty());
        assert!(g.options_for_site(None, &Choice::All).is_empty());
        assert!(g.options_for_site(Some("2020"), &Choice::Unresolved).is_empty());
        assert_eq!(g.options_for_site(None, &Choice::All).default_choice(), Choice::Unresolved);
    }

    #[test]
    fn site_options_follow_region() {
        let g = graph();
        let all = g.options_for_site(Some("2020"), &Choice::All);
        assert_eq!(all.values().collect::<Vec<_>>(), vec!["SiteA", "SiteB", "SiteC"]);
        let ags = g.options_for_site(Some("2020"), &Choice::specific("AGS"));
        assert_eq!(ags.values().collect::<Vec<_>>(), vec!["SiteA", "SiteC"]);
        assert_eq!(ags.default_choice(), Choice::All);
    }

    #[test]
    fn labelled_options_use_all_label() {
        let opts = graph().options_for_region(Some("2021")).labelled("TODOS");
        assert_eq!(opts[0].label, "TODOS");
        assert_eq!(opts[0].value, Choice::All);
        assert_eq!(opts[1].label, "AGS");
    }
}
