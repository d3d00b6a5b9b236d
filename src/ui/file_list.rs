use eframe::egui::*;
use egui_toast::ToastKind;

use crate::registry::EXPORT_FILE_NAME;

impl crate::app::MetaMorphApp {
    /// Left panel: uploader, search, select-all, export, and the entry rows.
    pub fn files_panel_ui(&mut self, ui: &mut Ui) {
        self.uploader_ui(ui);
        ui.add_space(8.0);

        if self.registry.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(RichText::new("No files uploaded").strong());
                ui.label(RichText::new("Upload files to begin managing metadata.").weak());
            });
            return;
        }

        let filtered_ids: Vec<String> = self
            .registry
            .filter(&self.search_term)
            .map(|e| e.id.clone())
            .collect();

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("🗄 Files ({})", filtered_ids.len())).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let selected = self.registry.selected_count();
                if selected > 0 && ui.button(format!("🗑 Delete ({selected})")).clicked() {
                    let ids = self.registry.selected_ids().clone();
                    let count = self.registry.bulk_delete(&ids);
                    let _ = self
                        .toast_tx
                        .try_send((ToastKind::Warning, format!("Deleted {count} files.")));
                }
            });
        });

        ui.add(TextEdit::singleline(&mut self.search_term).hint_text("🔍 Search files…"));

        ui.horizontal(|ui| {
            let mut all_selected =
                !filtered_ids.is_empty() && filtered_ids.iter().all(|id| self.registry.is_selected(id));
            if ui.checkbox(&mut all_selected, "Select All").changed() {
                for id in &filtered_ids {
                    self.registry.set_selected(id, all_selected);
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let can_export = self.registry.selected_count() > 0;
                if ui.add_enabled(can_export, Button::new("⬇ Export JSON")).clicked() {
                    self.export_selected_to_disk();
                }
            });
        });
        ui.separator();

        if filtered_ids.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(RichText::new("No files found.").strong());
                ui.label(RichText::new("Try changing your search term.").weak());
            });
            return;
        }

        let mut to_select: Option<String> = None;
        let mut to_toggle: Option<(String, bool)> = None;
        let mut to_delete: Option<String> = None;

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for id in &filtered_ids {
                let Some(entry) = self.registry.get(id) else { continue };
                let active = self.registry.active_id() == Some(id.as_str());
                ui.horizontal(|ui| {
                    let mut checked = self.registry.is_selected(id);
                    if ui.checkbox(&mut checked, "").changed() {
                        to_toggle = Some((id.clone(), checked));
                    }
                    let label = format!(
                        "{} {}",
                        entry.metadata.general.file_type.icon(),
                        entry.metadata.general.file_name
                    );
                    if ui.selectable_label(active, label).clicked() {
                        to_select = Some(id.clone());
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("🗑").clicked() {
                            to_delete = Some(id.clone());
                        }
                        ui.label(RichText::new(&entry.metadata.general.file_size).small().weak());
                    });
                });
            }
        });

        if let Some((id, included)) = to_toggle {
            self.registry.set_selected(&id, included);
        }
        if let Some(id) = to_select {
            self.registry.select(&id);
        }
        if let Some(id) = to_delete {
            self.delete_with_confirm(&id);
        }
    }

    fn delete_with_confirm(&mut self, id: &str) {
        let Some(entry) = self.registry.get(id) else { return };
        let file_name = entry.metadata.general.file_name.clone();
        let confirmed = rfd::MessageDialog::new()
            .set_title("Delete file")
            .set_description(format!("Remove \"{file_name}\" from this session?"))
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show()
            == rfd::MessageDialogResult::Yes;
        if !confirmed {
            return;
        }
        if let Some(removed) = self.registry.delete(id) {
            let _ = self.toast_tx.try_send((
                ToastKind::Info,
                format!("\"{}\" has been removed.", removed.metadata.general.file_name),
            ));
        }
    }

    fn export_selected_to_disk(&mut self) {
        match self.registry.export_selected() {
            Ok(json) => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Export metadata")
                    .add_filter("JSON", &["json"])
                    .set_file_name(EXPORT_FILE_NAME)
                    .save_file()
                {
                    match std::fs::write(&path, json) {
                        Ok(()) => {
                            log::info!("[export] wrote {}", path.display());
                            let _ = self
                                .toast_tx
                                .try_send((ToastKind::Success, "Metadata exported as JSON.".into()));
                        }
                        Err(e) => {
                            log::error!("[export] write failed for {}: {e}", path.display());
                            let _ = self
                                .toast_tx
                                .try_send((ToastKind::Error, format!("Export failed: {e}")));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = self.toast_tx.try_send((ToastKind::Error, e.to_string()));
            }
        }
    }
}
