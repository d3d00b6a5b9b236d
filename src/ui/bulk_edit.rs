use eframe::egui::*;
use egui_toast::ToastKind;

use crate::registry::BulkField;

/// Field selector and value for the bulk edit panel.
pub struct BulkEditPanel {
    pub field: BulkField,
    pub value: String,
}

impl Default for BulkEditPanel {
    fn default() -> Self {
        Self {
            field: BulkField::Author,
            value: String::new(),
        }
    }
}

impl crate::app::MetaMorphApp {
    /// Shown above the viewer once two or more entries are selected.
    pub fn bulk_edit_ui(&mut self, ui: &mut Ui) {
        let selected = self.registry.selected_count();
        if selected < 2 {
            return;
        }

        Frame::group(ui.style()).show(ui, |ui| {
            ui.label(RichText::new(format!("✏ Bulk Edit ({selected} files selected)")).strong());
            ui.horizontal(|ui| {
                ComboBox::from_id_salt("bulk-edit-field")
                    .selected_text(self.bulk_edit.field.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.bulk_edit.field, BulkField::Author, "Author");
                        ui.selectable_value(&mut self.bulk_edit.field, BulkField::Title, "Title");
                    });
                let hint = format!("Enter new {}", self.bulk_edit.field.label().to_lowercase());
                ui.add(TextEdit::singleline(&mut self.bulk_edit.value).hint_text(hint));
                let can_apply = !self.bulk_edit.value.is_empty();
                if ui.add_enabled(can_apply, Button::new("Apply to All")).clicked() {
                    self.apply_bulk_edit();
                }
            });
        });
        ui.add_space(6.0);
    }

    fn apply_bulk_edit(&mut self) {
        let ids = self.registry.selected_ids().clone();
        let field = self.bulk_edit.field;
        let value = self.bulk_edit.value.clone();
        let updated = self.registry.bulk_update_field(&ids, field, &value);

        // keep the open draft in step when the active entry was included
        if let Some(active) = self.viewer.draft_for.clone() {
            if ids.contains(&active) {
                match field {
                    BulkField::Author => self.viewer.draft.author = value.clone(),
                    BulkField::Title => self.viewer.draft.title = value.clone(),
                }
            }
        }

        log::info!("[registry] bulk edit set {} on {updated} entries", field.label());
        let _ = self.toast_tx.try_send((
            ToastKind::Success,
            format!("Updated '{}' for {updated} files.", field.label().to_lowercase()),
        ));
        self.bulk_edit.value.clear();
    }
}
