// Column strip rendering: one fixed-width table per navigator column
use super::{DragPayload, ViewAction};
use crate::app::ColumnarApp;
use crate::io::TransferMode;
use crate::state::Column;
use crate::style;
use eframe::egui;
use egui_extras::{Column as TableColumn, TableBuilder};
use std::path::PathBuf;

impl ColumnarApp {
    /// Draw the active tab's columns. Returns the directory under the pointer.
    pub(crate) fn render_columns(
        &self,
        ui: &mut egui::Ui,
        actions: &mut Vec<ViewAction>,
    ) -> Option<PathBuf> {
        let navigator = &self.tabs.active().navigator;
        let height = ui.available_height();
        let mut hovered = None;

        egui::ScrollArea::horizontal()
            .id_salt("column_strip")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    for (depth, column) in navigator.columns().iter().enumerate() {
                        let is_active = depth == navigator.active();
                        let inner = ui.push_id(depth, |ui| {
                            ui.allocate_ui_with_layout(
                                egui::vec2(self.column_width, height),
                                egui::Layout::top_down(egui::Align::Min),
                                |ui| {
                                    ui.set_width(self.column_width);
                                    ui.set_height(height);
                                    self.render_column(ui, depth, column, is_active, actions)
                                },
                            )
                        });
                        let response = inner.inner.response;
                        if response.contains_pointer() {
                            hovered = Some(column.path.clone());
                        }
                        if is_active && self.scroll_to_active {
                            response.scroll_to_me(None);
                        }
                        ui.separator();
                    }

                    let trailing = navigator.columns().len();
                    if navigator.pending().is_some_and(|p| p.depth == trailing) {
                        ui.allocate_ui(egui::vec2(self.column_width, height), |ui| {
                            ui.set_width(self.column_width);
                            ui.vertical_centered(|ui| {
                                ui.add_space(height / 3.0);
                                ui.spinner();
                            });
                        });
                    } else if let Some(failure) =
                        navigator.load_failure().filter(|f| f.depth == trailing)
                    {
                        ui.allocate_ui(egui::vec2(self.column_width, height), |ui| {
                            ui.set_width(self.column_width);
                            ui.add_space(8.0);
                            ui.colored_label(style::ERROR, failure.message.as_str());
                        });
                    }
                });
            });

        hovered
    }

    fn render_column(
        &self,
        ui: &mut egui::Ui,
        depth: usize,
        column: &Column,
        is_active: bool,
        actions: &mut Vec<ViewAction>,
    ) {
        let (_, dropped) = ui.dnd_drop_zone::<DragPayload, ()>(egui::Frame::NONE, |ui| {
            ui.set_min_size(ui.available_size());
            let title = egui::RichText::new(column.title()).strong();
            ui.label(if is_active {
                title.color(style::ACCENT)
            } else {
                title
            });
            ui.separator();

            if column.is_empty() {
                ui.weak("Empty folder");
                return;
            }

            let copy_modifier = ui.input(|i| i.modifiers.alt);
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .resizable(false)
                .auto_shrink([false, false])
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(TableColumn::exact(style::ICON_COL_WIDTH))
                .column(TableColumn::remainder().clip(true));

            if self.scroll_to_active && is_active {
                if let Some(index) = column.selected {
                    table = table.scroll_to_row(index, None);
                }
            }

            table.body(|body| {
                body.rows(style::ROW_HEIGHT, column.len(), |mut row| {
                    let index = row.index();
                    let entry = &column.entries[index];
                    row.set_selected(column.selected == Some(index));

                    row.col(|ui| {
                        ui.label(egui::RichText::new(entry.icon()).size(self.icon_size));
                    });
                    row.col(|ui| {
                        let mut text =
                            egui::RichText::new(entry.display_name()).size(self.font_size);
                        if entry.is_dir {
                            text = text.color(style::ACCENT);
                        }
                        let response = style::truncated_label_with_sense(
                            ui,
                            text,
                            egui::Sense::click_and_drag(),
                        );

                        if response.double_clicked() {
                            actions.push(ViewAction::Open { depth, index });
                        } else if response.clicked() {
                            actions.push(ViewAction::Select { depth, index });
                        }
                        response.dnd_set_drag_payload(DragPayload {
                            paths: vec![entry.path.clone()],
                        });

                        if !entry.is_dir {
                            return;
                        }
                        if response.dnd_hover_payload::<DragPayload>().is_some() {
                            ui.painter().rect_filled(
                                response.rect,
                                2.0,
                                style::DROP_HIGHLIGHT.gamma_multiply(0.35),
                            );
                        }
                        if let Some(payload) = response.dnd_release_payload::<DragPayload>() {
                            actions.push(ViewAction::Drop {
                                sources: payload.paths.clone(),
                                destination: entry.path.clone(),
                                mode: drop_mode(copy_modifier),
                            });
                        }
                    });
                });
            });
        });

        if let Some(payload) = dropped {
            let copy_modifier = ui.input(|i| i.modifiers.alt);
            actions.push(ViewAction::Drop {
                sources: payload.paths.clone(),
                destination: column.path.clone(),
                mode: drop_mode(copy_modifier),
            });
        }
    }
}

fn drop_mode(copy_modifier: bool) -> TransferMode {
    if copy_modifier {
        TransferMode::Copy
    } else {
        TransferMode::Move
    }
}
