use std::sync::Arc;

use super::aggregate::{AggregationEngine, Summary};
use super::filter::{Choice, FilterGraph, OptionSet, Selection};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Events and filter state
// ---------------------------------------------------------------------------

/// A user input on one of the three filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    YearChanged(Option<String>),
    RegionChanged(Choice),
    SiteChanged(Choice),
}

/// Selection plus the option sets it was resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selection: Selection,
    pub region_options: OptionSet,
    pub site_options: OptionSet,
}

/// Apply one event, recomputing every dimension downstream of it.
///
/// A year change resets region and site; a region change resets site.
/// Values missing from their option set fall back to the dimension default.
pub fn reduce(graph: &FilterGraph, state: &FilterState, event: FilterEvent) -> FilterState {
    match event {
        FilterEvent::YearChanged(year) => {
            let region_options = graph.options_for_region(year.as_deref());
            let region = region_options.default_choice();
            let site_options = graph.options_for_site(year.as_deref(), &region);
            let site = site_options.default_choice();
            FilterState {
                selection: Selection { year, region, site },
                region_options,
                site_options,
            }
        }
        FilterEvent::RegionChanged(region) => {
            let year = state.selection.year.clone();
            let region = checked(region, &state.region_options, "region");
            let site_options = graph.options_for_site(year.as_deref(), &region);
            let site = site_options.default_choice();
            FilterState {
                selection: Selection { year, region, site },
                region_options: state.region_options.clone(),
                site_options,
            }
        }
        FilterEvent::SiteChanged(site) => {
            let mut next = state.clone();
            next.selection.site = checked(site, &state.site_options, "site");
            next
        }
    }
}

fn checked(choice: Choice, options: &OptionSet, dimension: &str) -> Choice {
    if options.contains(&choice) {
        return choice;
    }
    let fallback = options.default_choice();
    if choice != fallback {
        log::warn!("{dimension} {choice:?} is not offered; resetting to {fallback:?}");
    }
    fallback
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's filter state machine over a shared dataset.
///
/// Every event runs the full year → region → site → aggregation chain and
/// replaces the visible state in one assignment.
#[derive(Debug, Clone)]
pub struct Session {
    graph: FilterGraph,
    engine: AggregationEngine,
    state: FilterState,
    summary: Summary,
}

impl Session {
    /// Start a session on the most recent year with region and site set to `All`.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let graph = FilterGraph::new(Arc::clone(&dataset));
        let engine = AggregationEngine::new(dataset);
        let year = graph.dataset().latest_year().map(str::to_string);
        let state = reduce(&graph, &FilterState::default(), FilterEvent::YearChanged(year));
        let summary = engine.aggregate(&state.selection);
        Self {
            graph,
            engine,
            state,
            summary,
        }
    }

    pub fn apply(&mut self, event: FilterEvent) {
        log::debug!("filter event {event:?}");
        let state = reduce(&self.graph, &self.state, event);
        let summary = self.engine.aggregate(&state.selection);
        self.state = state;
        self.summary = summary;
    }

    pub fn dataset(&self) -> &Dataset {
        self.graph.dataset()
    }

    pub fn year_options(&self) -> &[String] {
        self.graph.year_options()
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn region_options(&self) -> &OptionSet {
        &self.state.region_options
    }

    pub fn site_options(&self) -> &OptionSet {
        &self.state.site_options
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}
