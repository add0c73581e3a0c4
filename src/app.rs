use eframe::egui;

use groundwater_dash::state::AppState;

use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GroundwaterApp {
    pub state: AppState,
}

impl GroundwaterApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GroundwaterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: measurements per region ----
        if self.state.session.is_some() {
            egui::TopBottomPanel::bottom("region_chart")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    plot::region_chart(ui, &self.state);
                });
        }

        // ---- Central panel: metrics and grouped table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.is_none() {
                plot::region_chart(ui, &self.state);
                return;
            }
            table::metrics(ui, &self.state);
            ui.separator();
            table::grouped_table(ui, &self.state);
        });
    }
}
