use eframe::egui::{Context, Visuals};
use egui_toast::{Toast, ToastKind, ToastOptions};

impl crate::app::MetaMorphApp {
    /// Drains every async channel at the top of the frame. Registry
    /// mutations happen here, on the UI thread, so they never interleave.
    pub fn receive(&mut self, ctx: &Context) {
        if self.first_run {
            self.first_run = false;
            egui_extras::install_image_loaders(ctx);
            self.apply_theme(ctx);
            log::info!("[app] MetaMorph {} started", env!("CARGO_PKG_VERSION"));
        }

        while let Ok(files) = self.upload_rx.try_recv() {
            if files.is_empty() {
                continue;
            }
            let added = self.registry.add(files).len();
            let _ = self
                .toast_tx
                .try_send((ToastKind::Success, format!("{added} file(s) added.")));
        }

        while let Ok(update) = self.describe_rx.try_recv() {
            self.viewer.in_flight.remove(&update.id);
            match update.result {
                Ok(text) => {
                    if self.registry.apply_description(&update.id, &text) {
                        if self.viewer.draft_for.as_deref() == Some(update.id.as_str()) {
                            self.viewer.draft.description = text;
                        }
                        let _ = self.toast_tx.try_send((
                            ToastKind::Success,
                            "Description has been generated and filled in.".to_string(),
                        ));
                    } else {
                        // the entry was deleted while the request was in flight
                        log::info!("[describe] dropping late result for removed entry {}", update.id);
                    }
                }
                Err(err) => {
                    log::warn!("[describe] generation failed for {}: {err}", update.id);
                    let _ = self.toast_tx.try_send((
                        ToastKind::Error,
                        "Could not generate a description. Please try again.".to_string(),
                    ));
                }
            }
        }

        while let Ok((kind, text)) = self.toast_rx.try_recv() {
            self.toasts.add(Toast {
                kind,
                text: text.into(),
                options: ToastOptions::default()
                    .duration_in_seconds(4.0)
                    .show_progress(true),
                ..Default::default()
            });
        }
    }

    pub fn apply_theme(&self, ctx: &Context) {
        ctx.set_visuals(if self.ui_settings.dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        });
    }
}
