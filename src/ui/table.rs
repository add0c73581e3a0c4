use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use groundwater_dash::data::aggregate::format_thousands;
use groundwater_dash::state::AppState;

// ---------------------------------------------------------------------------
// Metrics header
// ---------------------------------------------------------------------------

/// Render the site and measurement metric lines.
pub fn metrics(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        return;
    };
    let summary = session.summary();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(summary.site_metric_text(session.selection(), state.all_label()))
                .size(22.0)
                .strong()
                .color(egui::Color32::from_rgb(0x00, 0x7b, 0xff)),
        );
        let measurements = summary.measurement_metric_text();
        if !measurements.is_empty() {
            ui.label(RichText::new(measurements).size(16.0));
        }
    });
}

// ---------------------------------------------------------------------------
// Grouped table
// ---------------------------------------------------------------------------

/// Render the (region, site) → measurement count table.
pub fn grouped_table(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        return;
    };
    let rows = &session.summary().rows;
    if rows.is_empty() {
        ui.label("No measurements match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("grouped_table")
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(110.0))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Region");
            });
            header.col(|ui| {
                ui.strong("Site");
            });
            header.col(|ui| {
                ui.strong("Measurements");
            });
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(RichText::new(&r.region).color(state.color_map.color_for(&r.region)));
                });
                row.col(|ui| {
                    ui.label(&r.site);
                });
                row.col(|ui| {
                    ui.label(format_thousands(r.measurement_count));
                });
            });
        });
}
