use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        }
    }
}

// --- Sizing ---
pub const ICON_COL_WIDTH: f32 = 24.0;
pub const ROW_HEIGHT: f32 = 22.0;

// --- Panel constraints ---
pub const COLUMN_MIN: f32 = 140.0;
pub const COLUMN_MAX: f32 = 480.0;
pub const PREVIEW_MIN: f32 = 200.0;
pub const PREVIEW_MAX: f32 = 900.0;

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;

// --- Colors ---
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(120, 180, 255);
pub const DROP_HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(80, 140, 220);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(230, 90, 90);

pub fn truncated_label_with_sense(
    ui: &mut egui::Ui,
    text: impl Into<egui::WidgetText>,
    sense: egui::Sense,
) -> egui::Response {
    ui.add(egui::Label::new(text).truncate().sense(sense))
}
