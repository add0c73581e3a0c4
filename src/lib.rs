//! Groundwater level dashboard: a wide per-year table is unpivoted into
//! measurements, filtered by cascading year → region → site selections and
//! summarised into site/measurement counts and a grouped table.

pub mod color;
pub mod config;
pub mod data;
pub mod state;
