use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DatasetConfig;
use crate::data::loader::load_dataset;
use crate::data::model::Dataset;
use crate::data::session::{FilterEvent, Session};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Column naming of input files.
    pub config: DatasetConfig,

    /// Filter session over the loaded dataset (None until a file is loaded).
    pub session: Option<Session>,

    /// Region colours for the loaded dataset.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset and start a fresh filter session.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.color_map = ColorMap::new(dataset.measurements.iter().map(|m| m.region.as_str()));
        self.session = Some(Session::new(Arc::new(dataset)));
        self.status_message = None;
    }

    /// Load a file, keeping the current dataset if it fails.
    pub fn load_path(&mut self, path: &Path) {
        match load_dataset(path, &self.config) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn load_demo(&mut self) {
        log::info!("Loading built-in demo dataset");
        self.set_dataset(Dataset::demo());
    }

    /// Route a filter event to the session.
    pub fn apply(&mut self, event: FilterEvent) {
        if let Some(session) = &mut self.session {
            session.apply(event);
        }
    }

    /// Label used for the "every value" option.
    pub fn all_label(&self) -> &str {
        &self.config.all_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Choice;

    #[test]
    fn demo_load_starts_session() {
        let mut state = AppState::default();
        state.load_demo();
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.selection().year.as_deref(), Some("2021"));
        assert_eq!(state.color_map.len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.load_demo();
        state.load_path(Path::new("/nonexistent/levels.csv"));
        assert!(state.session.is_some());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn events_reach_the_session() {
        let mut state = AppState::default();
        state.apply(FilterEvent::SiteChanged(Choice::All));
        state.load_demo();
        state.apply(FilterEvent::RegionChanged(Choice::specific("Baja California")));
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.selection().region, Choice::specific("Baja California"));
        assert_eq!(session.summary().site_count, 2);
    }
}
