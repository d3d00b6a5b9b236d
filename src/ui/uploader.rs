use std::path::PathBuf;

use eframe::egui::*;
use egui_toast::ToastKind;

use crate::registry::{is_accepted_mime, RawFile, UPLOAD_EXTS};

impl crate::app::MetaMorphApp {
    /// Drop zone plus a native file picker. Accepted files are read off the
    /// UI thread and arrive through the upload channel.
    pub fn uploader_ui(&mut self, ui: &mut Ui) {
        let hovering = !ui.ctx().input(|i| i.raw.hovered_files.is_empty());
        let stroke = if hovering {
            Stroke::new(2.0, ui.visuals().selection.bg_fill)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        Frame::group(ui.style())
            .stroke(stroke)
            .inner_margin(Margin::same(14))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").size(26.0));
                    if hovering {
                        ui.label(RichText::new("Drop the files here…").strong());
                    } else {
                        ui.label("Drag & drop files here");
                    }
                    ui.label(RichText::new("Supports: JPG, PNG, PDF").small().weak());
                    if ui.button("Browse files…").clicked() {
                        if let Some(paths) = rfd::FileDialog::new()
                            .set_title("Add files")
                            .add_filter("Supported files", UPLOAD_EXTS.as_slice())
                            .pick_files()
                        {
                            self.spawn_load_files(paths);
                        }
                    }
                });
            });

        let dropped: Vec<PathBuf> = ui
            .ctx()
            .input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        if !dropped.is_empty() {
            self.spawn_load_files(dropped);
        }
    }

    pub fn spawn_load_files(&self, paths: Vec<PathBuf>) {
        let upload_tx = self.upload_tx.clone();
        let toast_tx = self.toast_tx.clone();
        tokio::spawn(async move {
            let mut accepted: Vec<RawFile> = Vec::new();
            for path in paths {
                match RawFile::read(&path).await {
                    Ok(file) if is_accepted_mime(&file.mime) => accepted.push(file),
                    Ok(file) => {
                        log::warn!("[upload] rejected {} (unsupported type {})", file.name, file.mime);
                        let _ = toast_tx.try_send((
                            ToastKind::Error,
                            format!("\"{}\" is not a supported file type.", file.name),
                        ));
                    }
                    Err(e) => {
                        log::error!("[upload] failed to read {}: {e}", path.display());
                        let _ = toast_tx.try_send((
                            ToastKind::Error,
                            format!("Could not read \"{}\".", path.display()),
                        ));
                    }
                }
            }
            if !accepted.is_empty() {
                let _ = upload_tx.try_send(accepted);
            }
        });
    }
}
