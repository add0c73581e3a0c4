use eframe::egui::{self, Color32, RichText, Ui};

use groundwater_dash::data::filter::{Choice, OptionSet};
use groundwater_dash::data::session::FilterEvent;
use groundwater_dash::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – cascading filters
// ---------------------------------------------------------------------------

/// Render the year / region / site filters.
///
/// At most one event is produced per frame and applied after the widgets
/// are drawn, so every control in a frame reflects the same state.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };
    let all_label = state.config.all_label.as_str();
    let selection = session.selection();
    let mut event = None;

    ui.strong("Year");
    let current_year = selection.year.as_deref().unwrap_or("Select a year");
    egui::ComboBox::from_id_salt("filter_year")
        .selected_text(current_year)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for year in session.year_options() {
                let is_selected = selection.year.as_deref() == Some(year.as_str());
                if ui.selectable_label(is_selected, year).clicked() && !is_selected {
                    event = Some(FilterEvent::YearChanged(Some(year.clone())));
                }
            }
        });
    ui.add_space(8.0);

    ui.strong("Region");
    let region_options = session.region_options();
    if let Some(choice) =
        choice_combo(ui, "filter_region", region_options, &selection.region, all_label)
    {
        event = Some(FilterEvent::RegionChanged(choice));
    }
    ui.add_space(8.0);

    ui.strong("Site (optional)");
    let site_options = session.site_options();
    if let Some(choice) =
        choice_combo(ui, "filter_site", site_options, &selection.site, all_label)
    {
        event = Some(FilterEvent::SiteChanged(choice));
    }

    if let Some(event) = event {
        state.apply(event);
    }
}

/// Combo box over an option set; returns the newly picked choice.
fn choice_combo(
    ui: &mut Ui,
    id: &str,
    options: &OptionSet,
    current: &Choice,
    all_label: &str,
) -> Option<Choice> {
    let mut picked = None;
    ui.add_enabled_ui(!options.is_empty(), |ui: &mut Ui| {
        let selected_text = match current {
            Choice::Unresolved => "Select the year first",
            other => other.label(all_label),
        };
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for option in options.labelled(all_label) {
                    let is_selected = option.value == *current;
                    if ui.selectable_label(is_selected, &option.label).clicked() && !is_selected {
                        picked = Some(option.value);
                    }
                }
            });
    });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load demo data").clicked() {
                state.load_demo();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            let ds = session.dataset();
            ui.label(format!(
                "{} measurements, {} sites, {} years",
                ds.len(),
                ds.total_site_count,
                ds.years.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open groundwater levels")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
