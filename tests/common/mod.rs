#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use groundwater_dash::data::model::{Dataset, Measurement};

/// The three-row dataset used by the acceptance scenarios.
pub fn scenario_dataset() -> Arc<Dataset> {
    Arc::new(Dataset::from_measurements(vec![
        Measurement::new("AGS", "SiteA", "2020", 10.5),
        Measurement::new("AGS", "SiteA", "2021", 5.7),
        Measurement::new("BC", "SiteB", "2020", 30.2),
    ]))
}

/// A per-test scratch file under the system temp directory.
pub fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("groundwater-dash-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}
