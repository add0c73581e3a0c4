use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use groundwater_dash::state::AppState;

// ---------------------------------------------------------------------------
// Measurements per region (bar chart)
// ---------------------------------------------------------------------------

/// Render one bar per region of the current summary.
pub fn region_chart(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view groundwater levels  (File → Open…)");
        });
        return;
    };

    let totals = session.summary().region_totals();
    if totals.is_empty() {
        return;
    }

    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (region, total))| {
            Bar::new(i as f64, *total as f64)
                .name(*region)
                .fill(state.color_map.color_for(region))
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = totals.iter().map(|(region, _)| region.to_string()).collect();

    Plot::new("region_chart")
        .legend(egui_plot::Legend::default())
        .y_axis_label("Measurements")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Measurements per region"));
        });
}
