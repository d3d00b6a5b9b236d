use crossbeam::channel::{Receiver, Sender};
use egui_toast::{ToastKind, Toasts};
use serde::{Deserialize, Serialize};

use crate::ai::ProviderConfig;
use crate::registry::{FileRegistry, RawFile};
use crate::ui::bulk_edit::BulkEditPanel;
use crate::ui::viewer::{DescribeUpdate, MetadataViewer};

/// Session-only settings. Nothing here is persisted; the provider key is
/// seeded from the environment once and lives in memory after that.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UiSettings {
    pub dark_mode: bool,
    pub provider: ProviderConfig,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            provider: ProviderConfig::default(),
        }
    }
}

pub struct MetaMorphApp {
    pub first_run: bool,
    pub registry: FileRegistry,
    pub search_term: String,
    pub viewer: MetadataViewer,
    pub bulk_edit: BulkEditPanel,
    pub ui_settings: UiSettings,
    // Draft copy of settings while editing in the Preferences modal
    pub settings_draft: Option<UiSettings>,
    pub open_settings_modal: bool,
    pub show_logs: bool,
    // Toasts manager and channel for async notifications
    pub toasts: Toasts,
    pub toast_tx: Sender<(ToastKind, String)>,
    pub toast_rx: Receiver<(ToastKind, String)>,
    // Accepted uploads arrive here from the reader task
    pub upload_tx: Sender<Vec<RawFile>>,
    pub upload_rx: Receiver<Vec<RawFile>>,
    // Description assist results
    pub describe_tx: Sender<DescribeUpdate>,
    pub describe_rx: Receiver<DescribeUpdate>,
}

impl MetaMorphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (toast_tx, toast_rx) = crossbeam::channel::unbounded();
        let (upload_tx, upload_rx) = crossbeam::channel::unbounded();
        let (describe_tx, describe_rx) = crossbeam::channel::unbounded();

        Self {
            first_run: true,
            registry: FileRegistry::new(),
            search_term: String::new(),
            viewer: MetadataViewer::default(),
            bulk_edit: BulkEditPanel::default(),
            ui_settings: UiSettings::default(),
            settings_draft: None,
            open_settings_modal: false,
            show_logs: false,
            toasts: Toasts::new().anchor(eframe::egui::Align2::RIGHT_TOP, (-10.0, 10.0)),
            toast_tx,
            toast_rx,
            upload_tx,
            upload_rx,
            describe_tx,
            describe_rx,
        }
    }
}
