// Top and bottom bars: tabs with the active path, status line
use super::ViewAction;
use crate::app::ColumnarApp;
use crate::state::{SortBy, SortOrder};
use crate::style;
use eframe::egui;

impl ColumnarApp {
    pub(crate) fn render_tab_bar(&self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let active = self.tabs.active_index();
                for (index, tab) in self.tabs.iter().enumerate() {
                    let response = ui.selectable_label(index == active, tab.label.as_str());
                    if response.clicked() {
                        actions.push(ViewAction::SwitchTab(index));
                    }
                    if response.middle_clicked() && self.tabs.tab_count() > 1 {
                        actions.push(ViewAction::CloseTab(index));
                    }
                }
                if ui.button("+").on_hover_text("New tab").clicked() {
                    actions.push(ViewAction::NewTab);
                }
            });

            let navigator = &self.tabs.active().navigator;
            let path = navigator
                .last_selected()
                .map(|e| e.path.clone())
                .unwrap_or_else(|| navigator.active_column().path.clone());
            ui.label(egui::RichText::new(path.display().to_string()).monospace());
            ui.add_space(4.0);
        });
    }

    pub(crate) fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let navigator = &self.tabs.active().navigator;
                ui.label(format!("{} items", navigator.active_column().len()));
                if navigator.is_loading() {
                    ui.spinner();
                }

                let sort = &self.listing.sort;
                let field = match sort.sort_by {
                    SortBy::Name => "name",
                    SortBy::Size => "size",
                    SortBy::Modified => "modified",
                    SortBy::Extension => "extension",
                };
                let arrow = match sort.sort_order {
                    SortOrder::Ascending => "\u{2191}",
                    SortOrder::Descending => "\u{2193}",
                };
                ui.separator();
                ui.weak(format!("Sort: {} {}", field, arrow));
                if sort.dirs_first {
                    ui.weak("folders first");
                }
                if self.listing.show_hidden {
                    ui.weak("hidden shown");
                }

                if let Some((message, _)) = &self.status.error_message {
                    ui.separator();
                    ui.colored_label(style::ERROR, message.as_str());
                } else if let Some((message, _)) = &self.status.info_message {
                    ui.separator();
                    ui.label(message.as_str());
                }
            });
        });
    }
}
