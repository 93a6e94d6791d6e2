use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::LanguageFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state below.
    let max_pages = dataset.max_pages.max(1);
    let languages = dataset.languages.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Minimum pages slider ----
            ui.strong("Minimum pages");
            let mut min_pages = state.criteria.min_pages;
            if ui
                .add(egui::Slider::new(&mut min_pages, 0..=max_pages))
                .changed()
            {
                state.set_min_pages(min_pages);
            }
            ui.separator();

            // ---- Language selector ----
            ui.strong("Language");
            let current = match &state.criteria.language {
                LanguageFilter::All => "All".to_string(),
                LanguageFilter::Only(lang) => lang.clone(),
            };
            egui::ComboBox::from_id_salt("language_filter")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current == "All", "All").clicked() {
                        state.set_language_filter(LanguageFilter::All);
                    }
                    for lang in &languages {
                        if ui.selectable_label(current == *lang, lang).clicked() {
                            state.set_language_filter(LanguageFilter::Only(lang.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Cover-preview selector (hidden for an empty view) ----
            let titles = state.visible_titles();
            if !titles.is_empty() {
                ui.strong("Cover preview");
                let selected = state.selected_title.clone().unwrap_or_default();
                egui::ComboBox::from_id_salt("cover_preview")
                    .selected_text(&selected)
                    .show_ui(ui, |ui: &mut Ui| {
                        for title in &titles {
                            if ui.selectable_label(selected == *title, title).clicked() {
                                state.selected_title = Some(title.clone());
                            }
                        }
                    });
            }
        });
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} books loaded, {} match filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if state.loading {
            ui.separator();
            ui.spinner();
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
        .set_title("Open books dataset")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} books, {} languages, {} genres",
                    dataset.len(),
                    dataset.languages.len(),
                    dataset.genre_count
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
