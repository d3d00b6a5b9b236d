pub mod ai;
pub mod app;
pub mod metadata;
pub mod receive;
pub mod registry;
pub mod ui;

pub use metadata::*;
pub use registry::*;

impl eframe::App for app::MetaMorphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive(ctx);
        self.navbar(ctx);
        egui::SidePanel::left("FilesPanel")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                self.files_panel_ui(ui);
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.bulk_edit_ui(ui);
            self.viewer_ui(ui);
        });
        self.toasts.show(ctx);
    }
}

#[tokio::main]
async fn main() -> eframe::Result<()> {
    egui_logger::builder()
        .max_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let _ = eframe::run_native(
        format!("MetaMorph {}", env!("CARGO_PKG_VERSION")).as_str(),
        eframe::NativeOptions {
            viewport: eframe::egui::ViewportBuilder::default()
                .with_inner_size([1180.0, 760.0])
                .with_drag_and_drop(true),
            ..Default::default()
        },
        Box::new(|cc| Ok(Box::new(app::MetaMorphApp::new(cc)))),
    );

    Ok(())
}
