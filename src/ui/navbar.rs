use eframe::egui::*;

use crate::ai::PROVIDERS;

impl crate::app::MetaMorphApp {
    pub fn navbar(&mut self, ctx: &Context) {
        TopBottomPanel::top("AppHeaderPanel")
            .exact_height(28.)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🗂 MetaMorph").strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let theme_icon = if self.ui_settings.dark_mode { "☀" } else { "🌙" };
                        if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                            self.ui_settings.dark_mode = !self.ui_settings.dark_mode;
                            self.apply_theme(ctx);
                        }
                        if ui.button("⚙").on_hover_text("Preferences").clicked() {
                            self.open_settings_modal = true;
                        }
                        ui.toggle_value(&mut self.show_logs, "Logs");
                    });
                });
            });

        if self.open_settings_modal {
            self.settings_modal(ctx);
        }
        if self.show_logs {
            self.logs_window(ctx);
        }
    }

    fn settings_modal(&mut self, ctx: &Context) {
        if self.settings_draft.is_none() {
            self.settings_draft = Some(self.ui_settings.clone());
        }
        let mut save_clicked = false;
        let mut close_clicked = false;

        Window::new("Preferences")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let Some(draft) = self.settings_draft.as_mut() else {
                    return;
                };
                ui.heading("Description assist");
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Provider");
                    ComboBox::from_id_salt("provider-select")
                        .selected_text(draft.provider.provider.clone())
                        .show_ui(ui, |ui| {
                            for p in PROVIDERS {
                                ui.selectable_value(
                                    &mut draft.provider.provider,
                                    p.to_string(),
                                    p,
                                );
                            }
                        });
                });
                ui.horizontal(|ui| {
                    ui.label("Model");
                    ui.text_edit_singleline(&mut draft.provider.model);
                });
                ui.horizontal(|ui| {
                    ui.label("API key");
                    ui.add(
                        TextEdit::singleline(draft.provider.api_key.get_or_insert_with(String::new))
                            .password(true),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Base URL");
                    ui.text_edit_singleline(draft.provider.base_url.get_or_insert_with(String::new));
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(RichText::new("Save").strong()).clicked() {
                        save_clicked = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            close_clicked = true;
                        }
                    });
                });
            });

        if save_clicked {
            if let Some(mut draft) = self.settings_draft.take() {
                // empty optional fields mean "unset"
                if draft.provider.api_key.as_deref() == Some("") {
                    draft.provider.api_key = None;
                }
                if draft.provider.base_url.as_deref() == Some("") {
                    draft.provider.base_url = None;
                }
                log::info!(
                    "[prefs] provider set to {} / {}",
                    draft.provider.provider,
                    draft.provider.model
                );
                self.ui_settings = draft;
            }
            self.open_settings_modal = false;
        } else if close_clicked {
            self.settings_draft = None;
            self.open_settings_modal = false;
        }
    }

    fn logs_window(&mut self, ctx: &Context) {
        Window::new("Logs")
            .default_size([700.0, 400.0])
            .open(&mut self.show_logs)
            .show(ctx, |ui| {
                egui_logger::logger_ui().show(ui);
            });
    }
}
