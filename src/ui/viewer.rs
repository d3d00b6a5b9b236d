use std::borrow::Cow;
use std::collections::HashSet;

use eframe::egui::*;
use egui_toast::ToastKind;

use crate::metadata::{EditableMetadata, FileKind};
use crate::registry::{SanitizeField, ValidationErrors};

/// Result of one description request, delivered over the describe channel.
#[derive(Debug, Clone)]
pub struct DescribeUpdate {
    pub id: String,
    pub result: Result<String, String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewerTab {
    #[default]
    Preview,
    Editable,
    General,
    Technical,
}

/// UI state of the detail pane. The draft is a working copy of the active
/// entry's editable record; nothing lands in the registry until Save.
#[derive(Default)]
pub struct MetadataViewer {
    pub tab: ViewerTab,
    pub draft: EditableMetadata,
    pub draft_for: Option<String>,
    pub errors: ValidationErrors,
    // entries with an outstanding description request
    pub in_flight: HashSet<String>,
}

fn preview_uri(id: &str) -> String {
    format!("bytes://{id}")
}

impl crate::app::MetaMorphApp {
    pub fn viewer_ui(&mut self, ui: &mut Ui) {
        let Some(active_id) = self.registry.active_id().map(|s| s.to_string()) else {
            // release the previous preview when the viewer empties
            if let Some(prev) = self.viewer.draft_for.take() {
                ui.ctx().forget_image(&preview_uri(&prev));
            }
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.label(RichText::new("📄").size(48.0));
                ui.label(RichText::new("Select a file to view its metadata").strong());
                ui.label(RichText::new("Or upload new files to get started").weak());
            });
            return;
        };

        // reset the draft whenever the active entry changes
        if self.viewer.draft_for.as_deref() != Some(active_id.as_str()) {
            if let Some(prev) = self.viewer.draft_for.take() {
                ui.ctx().forget_image(&preview_uri(&prev));
            }
            if let Some(entry) = self.registry.get(&active_id) {
                self.viewer.draft = entry.metadata.editable.clone();
            }
            self.viewer.errors = ValidationErrors::default();
            self.viewer.draft_for = Some(active_id.clone());
        }

        let Some(entry) = self.registry.get(&active_id) else { return };
        let general = entry.metadata.general.clone();
        let technical = entry.metadata.technical.clone();
        let bytes = entry.file.bytes.clone();

        ui.horizontal(|ui| {
            ui.label(RichText::new(general.file_type.icon()).size(24.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(&general.file_name).strong().size(16.0));
                ui.label(
                    RichText::new(format!("{} - {}", general.file_size, general.file_type))
                        .small()
                        .weak(),
                );
            });
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.viewer.tab, ViewerTab::Preview, "Preview");
            ui.selectable_value(&mut self.viewer.tab, ViewerTab::Editable, "Editable");
            ui.selectable_value(&mut self.viewer.tab, ViewerTab::General, "General");
            ui.selectable_value(&mut self.viewer.tab, ViewerTab::Technical, "Technical");
        });
        ui.separator();

        match self.viewer.tab {
            ViewerTab::Preview => {
                if general.file_type.is_image() {
                    let source = ImageSource::Bytes {
                        uri: Cow::from(preview_uri(&active_id)),
                        bytes: load::Bytes::Shared(bytes),
                    };
                    ui.centered_and_justified(|ui| {
                        ui.add(Image::new(source).max_size(ui.available_size()));
                    });
                } else {
                    ui.vertical_centered(|ui| {
                        ui.add_space(60.0);
                        ui.label(RichText::new(general.file_type.icon()).size(48.0));
                        ui.label(RichText::new("No preview available for this file type.").weak());
                    });
                }
            }
            ViewerTab::Editable => {
                ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    self.editable_form_ui(ui, &active_id, &general.file_name, general.file_type);
                });
            }
            ViewerTab::General => {
                metadata_grid(
                    ui,
                    "general-grid",
                    &[
                        ("File Name", general.file_name.clone()),
                        ("File Type", general.file_type.to_string()),
                        ("File Size", general.file_size.clone()),
                    ],
                );
            }
            ViewerTab::Technical => {
                if technical.is_empty() {
                    ui.label(RichText::new("No technical metadata available.").weak());
                } else {
                    let rows: Vec<(&str, String)> =
                        technical.iter().map(|(k, v)| (k, v.to_string())).collect();
                    metadata_grid(ui, "technical-grid", &rows);
                }
            }
        }
    }

    fn editable_form_ui(&mut self, ui: &mut Ui, active_id: &str, file_name: &str, file_type: FileKind) {
        ui.label("Title");
        ui.add(TextEdit::singleline(&mut self.viewer.draft.title).hint_text("Enter file title"));
        if let Some(err) = self.viewer.errors.title {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }
        ui.add_space(6.0);

        ui.label("Author");
        ui.add(TextEdit::singleline(&mut self.viewer.draft.author).hint_text("Enter author name"));
        if let Some(err) = self.viewer.errors.author {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }
        ui.add_space(6.0);

        ui.label("Description");
        ui.horizontal_top(|ui| {
            ui.add(
                TextEdit::multiline(&mut self.viewer.draft.description)
                    .desired_rows(4)
                    .hint_text("Add a description…"),
            );
            let busy = self.viewer.in_flight.contains(active_id);
            let button = ui
                .add_enabled(!busy, Button::new(if busy { "⏳" } else { "✨" }))
                .on_hover_text("Generate description with AI");
            if button.clicked() {
                self.spawn_describe(active_id.to_string(), file_name.to_string(), file_type);
            }
        });
        if let Some(err) = self.viewer.errors.description {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }
        ui.add_space(6.0);

        ui.label("Tags");
        ui.add(
            TextEdit::singleline(&mut self.viewer.draft.tags)
                .hint_text("e.g., travel, summer, beach"),
        );
        if let Some(err) = self.viewer.errors.tags {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button(RichText::new("💾 Save Changes").strong()).clicked() {
                match self.registry.save_editable(active_id, self.viewer.draft.clone()) {
                    Ok(()) => {
                        self.viewer.errors = ValidationErrors::default();
                        let _ = self.toast_tx.try_send((
                            ToastKind::Success,
                            format!("Changes to {file_name} have been saved."),
                        ));
                    }
                    Err(errors) => self.viewer.errors = errors,
                }
            }
            ui.separator();
            if ui.button("Remove Location").clicked() {
                self.apply_sanitize(active_id, file_name, &[SanitizeField::Location]);
            }
            if ui.button("Remove Camera Info").clicked() {
                self.apply_sanitize(active_id, file_name, &[SanitizeField::Camera]);
            }
            if ui.button("Sanitize All").clicked() {
                self.apply_sanitize(
                    active_id,
                    file_name,
                    &[SanitizeField::Author, SanitizeField::Title],
                );
                // the draft mirrors the cleared fields right away
                self.viewer.draft.author.clear();
                self.viewer.draft.title.clear();
            }
        });
    }

    fn apply_sanitize(&mut self, id: &str, file_name: &str, fields: &[SanitizeField]) {
        if self.registry.sanitize(id, fields) {
            let _ = self.toast_tx.try_send((
                ToastKind::Info,
                format!("Selected fields have been cleared for {file_name}."),
            ));
        }
    }

    /// At most one outstanding request per entry; the button stays disabled
    /// until the result comes back through the describe channel.
    pub fn spawn_describe(&mut self, id: String, file_name: String, file_type: FileKind) {
        if !self.viewer.in_flight.insert(id.clone()) {
            return;
        }
        let cfg = self.ui_settings.provider.clone();
        let tx = self.describe_tx.clone();
        tokio::spawn(async move {
            let result = crate::ai::generate_description(&cfg, &file_name, file_type.mime())
                .await
                .map_err(|e| e.to_string());
            let _ = tx.try_send(DescribeUpdate { id, result });
        });
    }
}

fn metadata_grid(ui: &mut Ui, id_salt: &str, rows: &[(&str, String)]) {
    Grid::new(id_salt)
        .num_columns(2)
        .spacing([40.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for (key, value) in rows {
                ui.label(RichText::new(*key).weak());
                ui.label(value);
                ui.end_row();
            }
        });
}
