// Keyboard input and drops from other applications
use crate::app::ColumnarApp;
use crate::io::{TransferMode, TransferRequest};
use crate::preview::PreviewSurface;
use eframe::egui;
use std::path::PathBuf;

impl ColumnarApp {
    pub(crate) fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let sources: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if sources.is_empty() {
            return;
        }

        let destination = self
            .hovered_dir
            .clone()
            .unwrap_or_else(|| self.tabs.active().navigator.active_column().path.clone());
        self.start_transfer(TransferRequest {
            sources,
            destination,
            mode: TransferMode::Copy,
        });
    }

    pub(crate) fn handle_input(&mut self, ctx: &egui::Context) {
        // Text fields keep their keys.
        if ctx.wants_keyboard_input() {
            return;
        }

        let tab = self.tabs.active().id;

        // 1. Open preview captures arrows, Space and Escape close it
        if self.preview.is_open() {
            for key in self.preview.capture_keys(ctx) {
                let request = self.tabs.active_mut().navigator.preview_key(key);
                self.dispatch(tab, request);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::Escape)) {
                self.preview.hide();
            }
            return;
        }

        // 2. Tab management
        if ctx.input(|i| i.key_pressed(egui::Key::T) && i.modifiers.command) {
            self.new_tab();
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::W) && i.modifiers.command) {
            if self.tabs.close_current_tab() {
                self.on_tab_switched();
            }
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Tab) && i.modifiers.ctrl && !i.modifiers.shift) {
            self.tabs.next_tab();
            self.on_tab_switched();
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Tab) && i.modifiers.ctrl && i.modifiers.shift) {
            self.tabs.prev_tab();
            self.on_tab_switched();
            return;
        }
        for n in 1..=9 {
            if let Some(key) = egui::Key::from_name(&n.to_string()) {
                if ctx.input(|i| i.modifiers.alt && i.key_pressed(key)) {
                    self.tabs.switch_to_tab(n - 1);
                    self.on_tab_switched();
                    return;
                }
            }
        }

        // 3. Listing options
        if ctx.input(|i| i.key_pressed(egui::Key::Period)) {
            self.listing.show_hidden = !self.listing.show_hidden;
            self.refresh_all_tabs();
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::S) && i.modifiers.shift) {
            self.listing.sort.toggle_order();
            self.refresh_all_tabs();
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::S) && !i.modifiers.any()) {
            self.listing.sort.cycle_sort_by();
            self.refresh_all_tabs();
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::D) && !i.modifiers.any()) {
            self.listing.sort.toggle_dirs_first();
            self.refresh_all_tabs();
            return;
        }
        if ctx.input(|i| {
            (i.key_pressed(egui::Key::R) && i.modifiers.command) || i.key_pressed(egui::Key::F5)
        }) {
            let requests = self.tabs.active_mut().navigator.refresh_all();
            self.dispatch_all(tab, requests);
            return;
        }

        if ctx.input(|i| {
            i.key_pressed(egui::Key::Backspace)
                || (i.key_pressed(egui::Key::ArrowUp) && i.modifiers.command)
        }) {
            self.enclosing_root();
            return;
        }

        // 4. Opening and preview
        if ctx.input(|i| {
            i.key_pressed(egui::Key::Enter)
                || (i.key_pressed(egui::Key::ArrowDown) && i.modifiers.command)
        }) {
            self.open_selection();
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.tabs.active().navigator.toggle_preview(&mut self.preview);
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            let navigator = &mut self.tabs.active_mut().navigator;
            let active = navigator.active();
            navigator.clear_selection(active);
            return;
        }

        // 5. Column navigation
        let offset = ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::J) {
                Some(1)
            } else if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::K) {
                Some(-1)
            } else if i.key_pressed(egui::Key::Home) {
                Some(isize::MIN)
            } else if i.key_pressed(egui::Key::End) {
                Some(isize::MAX)
            } else {
                None
            }
        });
        if let Some(offset) = offset {
            let request = self.tabs.active_mut().navigator.move_within(offset);
            self.dispatch(tab, request);
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::H)) {
            self.tabs.active_mut().navigator.move_to_parent();
            self.scroll_to_active = true;
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::L)) {
            let request = self.tabs.active_mut().navigator.move_to_child();
            self.dispatch(tab, request);
            self.scroll_to_active = true;
        }
    }
}
