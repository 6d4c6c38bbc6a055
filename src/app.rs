// Application shell: owns the tabs, the I/O worker and the preview pane
use crate::config::Config;
use crate::io::{
    spawn_worker, IoCommand, IoResult, ListingOptions, SystemLauncher, TransferRequest,
};
use crate::preview::PreviewSurface;
use crate::state::{ListingRequest, NavigatorEvent, TabId, TabsManager};
use crate::style::{self, Theme};
use crate::view::{PreviewPane, StatusLine, ViewAction};
use crate::watcher::DirectoryWatcher;
use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

pub struct ColumnarApp {
    pub(crate) tabs: TabsManager,
    pub(crate) listing: ListingOptions,
    pub(crate) column_width: f32,
    pub(crate) preview_width: f32,
    pub(crate) font_size: f32,
    pub(crate) icon_size: f32,
    pub(crate) preview: PreviewPane,
    pub(crate) launcher: SystemLauncher,
    pub(crate) status: StatusLine,
    /// Bring the active column and its selection into view on the next frame
    pub(crate) scroll_to_active: bool,
    /// Column directory under the pointer, target for drops from other apps
    pub(crate) hovered_dir: Option<PathBuf>,
    command_tx: Sender<IoCommand>,
    result_rx: Receiver<IoResult>,
    watcher: Option<DirectoryWatcher>,
}

impl ColumnarApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, start: PathBuf) -> Self {
        let theme = if config.is_dark() { Theme::Dark } else { Theme::Light };
        cc.egui_ctx.set_visuals(theme.visuals());

        let ctx = cc.egui_ctx.clone();
        let (command_tx, result_rx) = spawn_worker(move || ctx.request_repaint());

        let ctx = cc.egui_ctx.clone();
        let watcher = match DirectoryWatcher::new(move || ctx.request_repaint()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                log::warn!("directory watching disabled: {}", e);
                None
            }
        };

        let listing = config.listing_options();
        let mut app = Self {
            tabs: TabsManager::new(start.clone()),
            listing,
            column_width: config
                .panel
                .column_width
                .clamp(style::COLUMN_MIN, style::COLUMN_MAX),
            preview_width: config
                .panel
                .preview_width
                .clamp(style::PREVIEW_MIN, style::PREVIEW_MAX),
            font_size: config.font.font_size,
            icon_size: config.font.icon_size,
            preview: PreviewPane::new(config.preview.clone(), listing, theme),
            launcher: SystemLauncher,
            status: StatusLine::default(),
            scroll_to_active: false,
            hovered_dir: None,
            command_tx,
            result_rx,
            watcher,
        };

        let tab = app.tabs.active().id;
        let request = app.tabs.active_mut().navigator.refresh(0);
        app.dispatch(tab, request);
        log::info!("browsing {}", start.display());
        app
    }

    pub(crate) fn dispatch(&self, tab: TabId, request: Option<ListingRequest>) {
        let Some(request) = request else {
            return;
        };
        let command = IoCommand::List {
            tab,
            request,
            options: self.listing,
        };
        if self.command_tx.send(command).is_err() {
            log::warn!("io worker is gone, listing dropped");
        }
    }

    pub(crate) fn dispatch_all(&self, tab: TabId, requests: Vec<ListingRequest>) {
        for request in requests {
            self.dispatch(tab, Some(request));
        }
    }

    pub(crate) fn start_transfer(&mut self, request: TransferRequest) {
        if request.sources.is_empty() {
            return;
        }
        log::info!(
            "{:?} of {} item(s) into {}",
            request.mode,
            request.sources.len(),
            request.destination.display()
        );
        if self.command_tx.send(IoCommand::Transfer(request)).is_err() {
            log::warn!("io worker is gone, transfer dropped");
            self.status.set_error("Transfer could not be started".to_string());
        }
    }

    /// Re-list every column, in every tab, that shows `dir`.
    pub(crate) fn refresh_everywhere(&mut self, dir: &Path) {
        let batches: Vec<(TabId, Vec<ListingRequest>)> = self
            .tabs
            .iter_mut()
            .map(|tab| (tab.id, tab.navigator.refresh_path(dir)))
            .collect();
        for (tab, requests) in batches {
            self.dispatch_all(tab, requests);
        }
    }

    /// Re-list every column of every tab, after listing options changed.
    pub(crate) fn refresh_all_tabs(&mut self) {
        self.preview.set_listing(self.listing);
        let batches: Vec<(TabId, Vec<ListingRequest>)> = self
            .tabs
            .iter_mut()
            .map(|tab| (tab.id, tab.navigator.refresh_all()))
            .collect();
        for (tab, requests) in batches {
            self.dispatch_all(tab, requests);
        }
    }

    pub(crate) fn open_selection(&mut self) {
        match self.tabs.active().navigator.open_selection(&self.launcher) {
            Ok(Some(path)) => log::info!("opened {}", path.display()),
            Ok(None) => {}
            Err(e) => {
                log::warn!("{}", e);
                self.status.set_error(e.to_string());
            }
        }
    }

    pub(crate) fn new_tab(&mut self) {
        let path = self.tabs.active().navigator.active_column().path.clone();
        let tab = self.tabs.new_tab(path);
        let request = self.tabs.active_mut().navigator.refresh(0);
        self.dispatch(tab, request);
        self.on_tab_switched();
    }

    /// Re-root the active tab at the directory enclosing its root column.
    pub(crate) fn enclosing_root(&mut self) {
        let tab = self.tabs.active_mut();
        let id = tab.id;
        let Some(request) = tab.reroot_to_parent() else {
            return;
        };
        self.dispatch(id, Some(request));
        self.scroll_to_active = true;
    }

    /// The preview follows the active tab.
    pub(crate) fn on_tab_switched(&mut self) {
        if let Some(entry) = self.tabs.active().navigator.active_selection() {
            self.preview.update(entry);
        }
        self.scroll_to_active = true;
    }

    fn process_io_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                IoResult::Listed { tab, outcome } => {
                    if let Some(tab) = self.tabs.get_mut(tab) {
                        tab.navigator.apply_listing(outcome);
                    }
                }
                IoResult::Transferred(report) => {
                    if report.failed.is_empty() {
                        self.status.set_info(report.summary());
                    } else {
                        self.status.set_error(report.summary());
                    }
                    for dir in report.touched_directories() {
                        self.refresh_everywhere(&dir);
                    }
                }
            }
        }
    }

    fn process_watcher(&mut self) {
        let changed = match self.watcher.as_mut() {
            Some(watcher) => watcher.poll_changed(),
            None => return,
        };
        for dir in changed {
            log::debug!("{} changed on disk", dir.display());
            self.refresh_everywhere(&dir);
        }

        let mut dirs: Vec<PathBuf> = self
            .tabs
            .iter()
            .flat_map(|tab| tab.navigator.columns().iter().map(|c| c.path.clone()))
            .collect();
        dirs.sort();
        dirs.dedup();
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.sync(&dirs);
        }
    }

    fn process_navigator_events(&mut self) {
        let active = self.tabs.active().id;
        for tab in self.tabs.iter_mut() {
            let events = tab.navigator.drain_events();
            if tab.id != active {
                continue;
            }
            for event in events {
                match event {
                    NavigatorEvent::SelectionChanged { .. } => {
                        if let Some(entry) = tab.navigator.active_selection() {
                            self.preview.update(entry);
                        }
                        self.scroll_to_active = true;
                    }
                    NavigatorEvent::ColumnAppended { .. } | NavigatorEvent::ActiveColumnChanged(_) => {
                        self.scroll_to_active = true;
                    }
                    NavigatorEvent::ColumnLoadFailed(failure) => {
                        self.status.set_error(format!(
                            "Cannot open {}: {}",
                            failure.path.display(),
                            failure.message
                        ));
                    }
                    NavigatorEvent::ColumnRefreshed { .. } | NavigatorEvent::ColumnsTruncated { .. } => {}
                }
            }
        }
    }

    fn apply_actions(&mut self, actions: Vec<ViewAction>) {
        for action in actions {
            match action {
                ViewAction::Select { depth, index } => {
                    let tab = self.tabs.active().id;
                    let request = self.tabs.active_mut().navigator.select(depth, index);
                    self.dispatch(tab, request);
                }
                ViewAction::Open { depth, index } => {
                    let tab = self.tabs.active().id;
                    let request = self.tabs.active_mut().navigator.select(depth, index);
                    let is_dir = request.is_some()
                        || self
                            .tabs
                            .active()
                            .navigator
                            .column(depth)
                            .and_then(|c| c.selected_entry())
                            .is_some_and(|e| e.is_dir);
                    self.dispatch(tab, request);
                    if !is_dir {
                        self.open_selection();
                    }
                }
                ViewAction::Drop {
                    sources,
                    destination,
                    mode,
                } => {
                    let sources: Vec<PathBuf> =
                        sources.into_iter().filter(|s| *s != destination).collect();
                    self.start_transfer(TransferRequest {
                        sources,
                        destination,
                        mode,
                    });
                }
                ViewAction::SwitchTab(index) => {
                    self.tabs.switch_to_tab(index);
                    self.on_tab_switched();
                }
                ViewAction::NewTab => self.new_tab(),
                ViewAction::CloseTab(index) => {
                    if self.tabs.close_tab(index) {
                        self.on_tab_switched();
                    }
                }
            }
        }
    }
}

impl eframe::App for ColumnarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_io_results();
        self.process_watcher();
        self.handle_input(ctx);
        self.handle_dropped_files(ctx);
        self.process_navigator_events();
        self.status.clear_expired_messages(style::MESSAGE_TIMEOUT_SECS);

        let mut actions = Vec::new();
        self.render_tab_bar(ctx, &mut actions);
        self.render_status_bar(ctx);

        if self.preview.is_open() {
            egui::SidePanel::right("preview_panel")
                .resizable(true)
                .default_width(self.preview_width)
                .width_range(style::PREVIEW_MIN..=style::PREVIEW_MAX)
                .show(ctx, |ui| {
                    self.preview.render(ui);
                });
        }

        let hovered = egui::CentralPanel::default()
            .show(ctx, |ui| self.render_columns(ui, &mut actions))
            .inner;
        self.hovered_dir = hovered;
        self.scroll_to_active = false;

        self.apply_actions(actions);

        if self.status.has_message() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}
