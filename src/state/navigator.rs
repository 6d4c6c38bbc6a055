//! Column navigation state machine.
//!
//! The navigator owns an ordered chain of columns. Column 0 is the root
//! directory; column `i` lists the directory selected in column `i - 1`.
//! Directory listings are never performed here: selecting a directory yields a
//! [`ListingRequest`] that the caller runs off-thread, and the finished
//! [`ListingOutcome`] is fed back through [`ColumnNavigator::apply_listing`],
//! which discards it if the chain has moved on in the meantime.

use super::column::Column;
use super::event::{ColumnLoadFailure, NavigatorEvent};
use crate::entry::FileEntry;
use crate::error::{ListError, OpenError};
use crate::io::EntryLauncher;
use crate::preview::{PreviewKey, PreviewSurface};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingKind {
    /// Produces a new column at `depth`
    Append,
    /// Replaces the entries of the existing column at `depth`
    Refresh,
}

/// A directory listing the navigator wants performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingRequest {
    pub ticket: u64,
    pub depth: usize,
    pub path: PathBuf,
    pub kind: ListingKind,
}

impl ListingRequest {
    pub fn complete(self, result: Result<Vec<FileEntry>, ListError>) -> ListingOutcome {
        ListingOutcome {
            ticket: self.ticket,
            depth: self.depth,
            path: self.path,
            kind: self.kind,
            result,
        }
    }
}

#[derive(Debug)]
pub struct ListingOutcome {
    pub ticket: u64,
    pub depth: usize,
    pub path: PathBuf,
    pub kind: ListingKind,
    pub result: Result<Vec<FileEntry>, ListError>,
}

/// The append listing currently in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingListing {
    pub ticket: u64,
    pub depth: usize,
    pub path: PathBuf,
}

pub struct ColumnNavigator {
    columns: Vec<Column>,
    active: usize,
    pending: Option<PendingListing>,
    next_ticket: u64,
    load_failure: Option<ColumnLoadFailure>,
    events: VecDeque<NavigatorEvent>,
}

impl ColumnNavigator {
    pub fn new(root: PathBuf, entries: Vec<FileEntry>) -> Self {
        Self {
            columns: vec![Column::new(root, entries, 0)],
            active: 0,
            pending: None,
            next_ticket: 1,
            load_failure: None,
            events: VecDeque::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, depth: usize) -> Option<&Column> {
        self.columns.get(depth)
    }

    pub fn root(&self) -> &Column {
        &self.columns[0]
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_column(&self) -> &Column {
        &self.columns[self.active]
    }

    pub fn pending(&self) -> Option<&PendingListing> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn load_failure(&self) -> Option<&ColumnLoadFailure> {
        self.load_failure.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<NavigatorEvent> {
        self.events.drain(..).collect()
    }

    /// Replace the root directory and drop everything to its right.
    pub fn reset_root(&mut self, path: PathBuf, entries: Vec<FileEntry>) {
        let ticket = self.take_ticket();
        let had_children = self.columns.len() > 1;
        self.columns = vec![Column::new(path, entries, ticket)];
        self.pending = None;
        self.load_failure = None;
        if had_children {
            self.events.push_back(NavigatorEvent::ColumnsTruncated { len: 1 });
        }
        self.set_active(0);
    }

    /// Select entry `index` of the column at `depth`.
    ///
    /// Columns to the right of `depth` are discarded. When the entry is a
    /// directory a listing request for the new column is returned.
    pub fn select(&mut self, depth: usize, index: usize) -> Option<ListingRequest> {
        let entry = self.columns.get(depth)?.entries.get(index)?.clone();

        if self.is_current_selection(depth, index, &entry) {
            self.set_active(depth);
            return None;
        }

        self.columns[depth].selected = Some(index);
        self.events.push_back(NavigatorEvent::SelectionChanged {
            depth,
            path: Some(entry.path.clone()),
        });
        self.pending = None;
        self.load_failure = None;
        self.truncate(depth + 1);
        self.set_active(depth);

        if !entry.is_dir {
            return None;
        }
        let request = ListingRequest {
            ticket: self.take_ticket(),
            depth: depth + 1,
            path: entry.path,
            kind: ListingKind::Append,
        };
        self.pending = Some(PendingListing {
            ticket: request.ticket,
            depth: request.depth,
            path: request.path.clone(),
        });
        Some(request)
    }

    /// Whether selecting `entry` again would change nothing.
    fn is_current_selection(&self, depth: usize, index: usize, entry: &FileEntry) -> bool {
        if self.columns[depth].selected != Some(index) {
            return false;
        }
        if !entry.is_dir {
            return true;
        }
        let child_shown = self
            .columns
            .get(depth + 1)
            .is_some_and(|c| c.path == entry.path);
        let child_loading = self
            .pending
            .as_ref()
            .is_some_and(|p| p.depth == depth + 1 && p.path == entry.path);
        child_shown || child_loading
    }

    pub fn clear_selection(&mut self, depth: usize) {
        let Some(column) = self.columns.get_mut(depth) else {
            return;
        };
        if column.selected.take().is_none() {
            return;
        }
        self.events
            .push_back(NavigatorEvent::SelectionChanged { depth, path: None });
        self.forget_below(depth);
        self.truncate(depth + 1);
    }

    /// Feed back a finished listing. Returns whether it was applied.
    pub fn apply_listing(&mut self, outcome: ListingOutcome) -> bool {
        match outcome.kind {
            ListingKind::Append => self.apply_append(outcome),
            ListingKind::Refresh => self.apply_refresh(outcome),
        }
    }

    fn apply_append(&mut self, outcome: ListingOutcome) -> bool {
        let expected = self
            .pending
            .as_ref()
            .is_some_and(|p| p.ticket == outcome.ticket);
        let parent_matches = outcome.depth >= 1
            && self.columns.len() == outcome.depth
            && self.columns[outcome.depth - 1]
                .selected_entry()
                .is_some_and(|e| e.is_dir && e.path == outcome.path);
        if !expected || !parent_matches {
            log::debug!(
                "discarding stale listing #{} of {} for column {}",
                outcome.ticket,
                outcome.path.display(),
                outcome.depth
            );
            return false;
        }

        self.pending = None;
        match outcome.result {
            Ok(entries) => {
                self.columns
                    .push(Column::new(outcome.path, entries, outcome.ticket));
                self.events.push_back(NavigatorEvent::ColumnAppended {
                    depth: outcome.depth,
                });
            }
            Err(e) => self.record_failure(outcome.depth, outcome.path, &e),
        }
        true
    }

    fn apply_refresh(&mut self, outcome: ListingOutcome) -> bool {
        let depth = outcome.depth;
        let current = self
            .columns
            .get(depth)
            .is_some_and(|c| c.path == outcome.path && c.ticket < outcome.ticket);
        if !current {
            log::debug!(
                "discarding stale refresh #{} of {}",
                outcome.ticket,
                outcome.path.display()
            );
            return false;
        }

        let entries = match outcome.result {
            Ok(entries) => entries,
            Err(e) => {
                self.record_failure(depth, outcome.path, &e);
                return true;
            }
        };

        let column = &mut self.columns[depth];
        let previous = column.selected_entry().map(|e| e.path.clone());
        column.entries = entries;
        column.ticket = outcome.ticket;
        column.selected = previous.as_deref().and_then(|p| column.index_of(p));
        let still_dir = column.selected_entry().is_some_and(|e| e.is_dir);
        let lost_selection = previous.is_some() && column.selected.is_none();

        self.events
            .push_back(NavigatorEvent::ColumnRefreshed { depth });
        if lost_selection {
            self.events
                .push_back(NavigatorEvent::SelectionChanged { depth, path: None });
        }
        if lost_selection || !still_dir {
            self.forget_below(depth);
            self.truncate(depth + 1);
        }
        true
    }

    fn record_failure(&mut self, depth: usize, path: PathBuf, error: &ListError) {
        log::warn!("column {} could not be listed: {}", depth, error);
        let failure = ColumnLoadFailure {
            depth,
            path,
            message: error.to_string(),
        };
        self.load_failure = Some(failure.clone());
        self.events
            .push_back(NavigatorEvent::ColumnLoadFailed(failure));
    }

    /// Move the selection of the active column by `offset`, clamped to its bounds.
    pub fn move_within(&mut self, offset: isize) -> Option<ListingRequest> {
        let column = &self.columns[self.active];
        if column.is_empty() {
            return None;
        }
        let current = column.selected.map(|i| i as isize).unwrap_or(-1);
        let last = column.len() as isize - 1;
        let target = current.saturating_add(offset).clamp(0, last) as usize;
        self.select(self.active, target)
    }

    pub fn move_to_parent(&mut self) {
        self.set_active(self.active.saturating_sub(1));
    }

    /// Step into the column opened by the active selection, if it is shown.
    pub fn move_to_child(&mut self) -> Option<ListingRequest> {
        let opens_child = self.active_column().selected_entry().is_some_and(|e| e.is_dir);
        let child = self.active + 1;
        if !opens_child || child >= self.columns.len() {
            return None;
        }
        self.set_active(child);
        let column = &self.columns[child];
        if column.selected.is_none() && !column.is_empty() {
            return self.select(child, 0);
        }
        None
    }

    /// Deepest selected entry in the chain.
    pub fn last_selected(&self) -> Option<&FileEntry> {
        self.columns.iter().rev().find_map(|c| c.selected_entry())
    }

    /// The active column's selection, falling back to the deepest one.
    pub fn active_selection(&self) -> Option<&FileEntry> {
        self.active_column()
            .selected_entry()
            .or_else(|| self.last_selected())
    }

    /// Open the deepest selected entry. Returns the path that was handed off.
    pub fn open_selection(&self, launcher: &dyn EntryLauncher) -> Result<Option<PathBuf>, OpenError> {
        let Some(entry) = self.last_selected() else {
            return Ok(None);
        };
        launcher.launch(&entry.path)?;
        Ok(Some(entry.path.clone()))
    }

    pub fn toggle_preview(&self, surface: &mut dyn PreviewSurface) {
        if surface.is_open() {
            surface.hide();
        } else if let Some(entry) = self.active_selection() {
            surface.show(entry);
        }
    }

    /// Arrow key forwarded by an open preview surface.
    pub fn preview_key(&mut self, key: PreviewKey) -> Option<ListingRequest> {
        self.move_within(key.offset())
    }

    pub fn refresh(&mut self, depth: usize) -> Option<ListingRequest> {
        let path = self.columns.get(depth)?.path.clone();
        Some(ListingRequest {
            ticket: self.take_ticket(),
            depth,
            path,
            kind: ListingKind::Refresh,
        })
    }

    /// Refresh every column showing `path`.
    pub fn refresh_path(&mut self, path: &Path) -> Vec<ListingRequest> {
        let depths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.path == path)
            .map(|(depth, _)| depth)
            .collect();
        depths.into_iter().filter_map(|d| self.refresh(d)).collect()
    }

    pub fn refresh_all(&mut self) -> Vec<ListingRequest> {
        (0..self.columns.len()).filter_map(|d| self.refresh(d)).collect()
    }

    fn take_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    /// Drop the pending listing and the load failure for columns past `depth`.
    fn forget_below(&mut self, depth: usize) {
        if self.pending.as_ref().is_some_and(|p| p.depth > depth) {
            self.pending = None;
        }
        if self.load_failure.as_ref().is_some_and(|f| f.depth > depth) {
            self.load_failure = None;
        }
    }

    fn truncate(&mut self, len: usize) {
        if self.columns.len() > len {
            self.columns.truncate(len);
            self.events
                .push_back(NavigatorEvent::ColumnsTruncated { len });
        }
        if self.active >= self.columns.len() {
            self.set_active(self.columns.len() - 1);
        }
    }

    fn set_active(&mut self, depth: usize) {
        let depth = depth.min(self.columns.len() - 1);
        if depth != self.active {
            self.active = depth;
            self.events
                .push_back(NavigatorEvent::ActiveColumnChanged(depth));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryId, EntryKind};
    use std::cell::RefCell;
    use std::time::SystemTime;

    fn entry(parent: &str, name: &str, is_dir: bool) -> FileEntry {
        let path = PathBuf::from(parent).join(name);
        FileEntry {
            id: EntryId {
                device: 1,
                inode: path.as_os_str().len() as u64,
            },
            name: name.to_string(),
            path,
            is_dir,
            is_symlink: false,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
            extension: String::new(),
            kind: if is_dir { EntryKind::Folder } else { EntryKind::Other },
        }
    }

    fn dir(parent: &str, name: &str) -> FileEntry {
        entry(parent, name, true)
    }

    fn file(parent: &str, name: &str) -> FileEntry {
        entry(parent, name, false)
    }

    /// Root `/r` with `[A(dir), B(file)]`; `A` holds `[C(dir), D(file)]`.
    fn navigator() -> ColumnNavigator {
        ColumnNavigator::new(PathBuf::from("/r"), vec![dir("/r", "A"), file("/r", "B")])
    }

    fn a_children() -> Vec<FileEntry> {
        vec![dir("/r/A", "C"), file("/r/A", "D")]
    }

    fn open_a(nav: &mut ColumnNavigator) {
        let request = nav.select(0, 0).expect("A is a directory");
        assert!(nav.apply_listing(request.complete(Ok(a_children()))));
    }

    struct RecordingLauncher(RefCell<Vec<PathBuf>>);

    impl EntryLauncher for RecordingLauncher {
        fn launch(&self, path: &Path) -> Result<(), OpenError> {
            self.0.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePreview {
        shown: Option<PathBuf>,
    }

    impl PreviewSurface for FakePreview {
        fn is_open(&self) -> bool {
            self.shown.is_some()
        }
        fn show(&mut self, entry: &FileEntry) {
            self.shown = Some(entry.path.clone());
        }
        fn update(&mut self, entry: &FileEntry) {
            if self.shown.is_some() {
                self.shown = Some(entry.path.clone());
            }
        }
        fn hide(&mut self) {
            self.shown = None;
        }
    }

    #[test]
    fn test_selecting_directory_requests_child_column() {
        let mut nav = navigator();
        let request = nav.select(0, 0).unwrap();
        assert_eq!(request.depth, 1);
        assert_eq!(request.path, PathBuf::from("/r/A"));
        assert_eq!(request.kind, ListingKind::Append);
        assert!(nav.is_loading());
        assert_eq!(nav.columns().len(), 1);

        assert!(nav.apply_listing(request.complete(Ok(a_children()))));
        assert_eq!(nav.columns().len(), 2);
        assert_eq!(nav.column(1).unwrap().path, PathBuf::from("/r/A"));
        assert!(!nav.is_loading());
    }

    #[test]
    fn test_selecting_file_in_child_keeps_chain_at_that_depth() {
        let mut nav = navigator();
        open_a(&mut nav);

        assert!(nav.select(1, 1).is_none());
        assert_eq!(nav.columns().len(), 2);
        assert_eq!(nav.column(1).unwrap().selected_entry().unwrap().name, "D");
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn test_selecting_file_upstream_removes_all_children() {
        let mut nav = navigator();
        open_a(&mut nav);
        let request = nav.select(1, 0).unwrap();
        assert!(nav.apply_listing(request.complete(Ok(vec![file("/r/A/C", "e.txt")]))));
        assert_eq!(nav.columns().len(), 3);

        nav.move_to_parent();
        assert_eq!(nav.active(), 0);

        assert!(nav.select(0, 1).is_none());
        assert_eq!(nav.columns().len(), 1);
        assert_eq!(nav.root().selected_entry().unwrap().name, "B");
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn test_reselecting_is_a_noop() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.drain_events();

        assert!(nav.select(0, 0).is_none());
        assert_eq!(nav.columns().len(), 2);
        assert!(!nav.is_loading());
        assert!(nav.drain_events().is_empty());
    }

    #[test]
    fn test_reselecting_while_loading_does_not_relist() {
        let mut nav = navigator();
        let first = nav.select(0, 0).unwrap();
        assert!(nav.select(0, 0).is_none());
        assert!(nav.apply_listing(first.complete(Ok(a_children()))));
    }

    #[test]
    fn test_reselecting_after_failure_retries() {
        let mut nav = navigator();
        let request = nav.select(0, 0).unwrap();
        let err = ListError::PermissionDenied {
            path: PathBuf::from("/r/A"),
        };
        assert!(nav.apply_listing(request.complete(Err(err))));
        assert!(nav.select(0, 0).is_some());
    }

    #[test]
    fn test_stale_listing_is_discarded() {
        let mut nav = navigator();
        let request = nav.select(0, 0).unwrap();
        nav.select(0, 1);

        assert!(!nav.apply_listing(request.complete(Ok(a_children()))));
        assert_eq!(nav.columns().len(), 1);
    }

    #[test]
    fn test_superseded_listing_for_same_path_is_discarded() {
        let mut nav = navigator();
        let old = nav.select(0, 0).unwrap();
        nav.select(0, 1);
        let new = nav.select(0, 0).unwrap();
        assert_ne!(old.ticket, new.ticket);

        assert!(!nav.apply_listing(old.complete(Ok(vec![]))));
        assert!(nav.apply_listing(new.complete(Ok(a_children()))));
        assert_eq!(nav.column(1).unwrap().len(), 2);
    }

    #[test]
    fn test_load_failure_leaves_chain_shallower_and_reports() {
        let mut nav = navigator();
        let request = nav.select(0, 0).unwrap();
        nav.drain_events();

        let err = ListError::NotFound {
            path: PathBuf::from("/r/A"),
        };
        assert!(nav.apply_listing(request.complete(Err(err))));

        assert_eq!(nav.columns().len(), 1);
        let failure = nav.load_failure().unwrap();
        assert_eq!(failure.depth, 1);
        assert_eq!(failure.path, PathBuf::from("/r/A"));
        assert!(matches!(
            nav.drain_events().as_slice(),
            [NavigatorEvent::ColumnLoadFailed(_)]
        ));

        nav.select(0, 1);
        assert!(nav.load_failure().is_none());
    }

    #[test]
    fn test_clearing_selection_forgets_failed_child() {
        let mut nav = navigator();
        let request = nav.select(0, 0).unwrap();
        let err = ListError::NotFound {
            path: PathBuf::from("/r/A"),
        };
        nav.apply_listing(request.complete(Err(err)));
        assert!(nav.load_failure().is_some());

        nav.clear_selection(0);
        assert!(nav.load_failure().is_none());
        assert!(nav.pending().is_none());
    }

    #[test]
    fn test_move_within_clamps_at_both_ends() {
        let mut nav = navigator();
        nav.move_within(-3);
        assert_eq!(nav.root().selected, Some(0));

        nav.move_within(1);
        nav.move_within(1);
        nav.move_within(isize::MAX);
        assert_eq!(nav.root().selected, Some(1));

        nav.move_within(isize::MIN);
        assert_eq!(nav.root().selected, Some(0));
    }

    #[test]
    fn test_move_within_without_selection_starts_at_top() {
        let mut nav = navigator();
        let request = nav.move_within(1);
        assert_eq!(nav.root().selected, Some(0));
        assert!(request.is_some());
    }

    #[test]
    fn test_move_within_empty_column() {
        let mut nav = ColumnNavigator::new(PathBuf::from("/empty"), vec![]);
        assert!(nav.move_within(1).is_none());
        assert_eq!(nav.root().selected, None);
    }

    #[test]
    fn test_move_to_parent_floors_at_zero() {
        let mut nav = navigator();
        nav.move_to_parent();
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn test_move_to_child_autoselects_first_entry() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.move_to_parent();

        let request = nav.move_to_child().expect("C is a directory");
        assert_eq!(nav.active(), 1);
        assert_eq!(nav.column(1).unwrap().selected, Some(0));
        assert_eq!(request.path, PathBuf::from("/r/A/C"));
    }

    #[test]
    fn test_move_to_child_requires_loaded_directory() {
        let mut nav = navigator();
        nav.select(0, 0);
        assert!(nav.move_to_child().is_none());
        assert_eq!(nav.active(), 0);

        nav.select(0, 1);
        assert!(nav.move_to_child().is_none());
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn test_last_selected_prefers_deepest() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.select(1, 1);
        nav.move_to_parent();

        assert_eq!(nav.last_selected().unwrap().name, "D");
        assert_eq!(nav.active_selection().unwrap().name, "A");

        let launcher = RecordingLauncher(RefCell::new(Vec::new()));
        let opened = nav.open_selection(&launcher).unwrap();
        assert_eq!(opened, Some(PathBuf::from("/r/A/D")));
        assert_eq!(*launcher.0.borrow(), vec![PathBuf::from("/r/A/D")]);
    }

    #[test]
    fn test_open_without_selection() {
        let nav = navigator();
        let launcher = RecordingLauncher(RefCell::new(Vec::new()));
        assert_eq!(nav.open_selection(&launcher).unwrap(), None);
        assert!(launcher.0.borrow().is_empty());
    }

    #[test]
    fn test_toggle_preview_and_preview_keys() {
        let mut nav = navigator();
        let mut preview = FakePreview::default();

        nav.toggle_preview(&mut preview);
        assert!(!preview.is_open(), "nothing selected yet");

        nav.select(0, 0);
        nav.toggle_preview(&mut preview);
        assert_eq!(preview.shown, Some(PathBuf::from("/r/A")));

        assert!(nav.preview_key(PreviewKey::Right).is_none());
        assert_eq!(nav.root().selected, Some(1));
        nav.preview_key(PreviewKey::Up);
        assert_eq!(nav.root().selected, Some(0));

        nav.toggle_preview(&mut preview);
        assert!(!preview.is_open());
    }

    #[test]
    fn test_preview_shows_active_column_selection() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.select(1, 1);
        nav.move_to_parent();
        assert_eq!(nav.active(), 0);

        let mut preview = FakePreview::default();
        nav.toggle_preview(&mut preview);
        assert_eq!(preview.shown, Some(PathBuf::from("/r/A")));
    }

    #[test]
    fn test_refresh_keeps_selection_by_path() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.select(1, 1);

        let request = nav.refresh(1).unwrap();
        let listing = vec![file("/r/A", "0-new"), dir("/r/A", "C"), file("/r/A", "D")];
        assert!(nav.apply_listing(request.complete(Ok(listing))));

        let column = nav.column(1).unwrap();
        assert_eq!(column.selected, Some(2));
        assert_eq!(column.selected_entry().unwrap().name, "D");
    }

    #[test]
    fn test_refresh_turning_selected_directory_into_file_keeps_selection() {
        let mut nav = navigator();
        open_a(&mut nav);
        assert_eq!(nav.columns().len(), 2);

        let request = nav.refresh(0).unwrap();
        let listing = vec![file("/r", "A"), file("/r", "B")];
        assert!(nav.apply_listing(request.complete(Ok(listing))));

        assert_eq!(nav.columns().len(), 1);
        assert_eq!(nav.root().selected, Some(0));
        assert_eq!(nav.root().selected_entry().unwrap().name, "A");
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn test_failed_refresh_keeps_column_and_reports() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.select(1, 1);
        nav.drain_events();

        let request = nav.refresh(1).unwrap();
        let err = ListError::PermissionDenied {
            path: PathBuf::from("/r/A"),
        };
        assert!(nav.apply_listing(request.complete(Err(err))));

        assert_eq!(nav.columns().len(), 2);
        let column = nav.column(1).unwrap();
        assert_eq!(column.len(), 2);
        assert_eq!(column.selected, Some(1));
        assert_eq!(nav.load_failure().unwrap().depth, 1);
        assert!(matches!(
            nav.drain_events().as_slice(),
            [NavigatorEvent::ColumnLoadFailed(failure)] if failure.path == PathBuf::from("/r/A")
        ));
    }

    #[test]
    fn test_refresh_dropping_selected_directory_truncates_and_clamps_active() {
        let mut nav = navigator();
        open_a(&mut nav);
        let request = nav.select(1, 0).unwrap();
        nav.apply_listing(request.complete(Ok(vec![file("/r/A/C", "x")])));
        nav.move_to_child();
        assert_eq!(nav.active(), 2);

        let request = nav.refresh(1).unwrap();
        assert!(nav.apply_listing(request.complete(Ok(vec![file("/r/A", "D")]))));

        assert_eq!(nav.columns().len(), 2);
        assert_eq!(nav.column(1).unwrap().selected, None);
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn test_refresh_of_discarded_column_is_ignored() {
        let mut nav = navigator();
        open_a(&mut nav);
        let request = nav.refresh(1).unwrap();
        nav.select(0, 1);

        assert!(!nav.apply_listing(request.complete(Ok(vec![]))));
        assert_eq!(nav.columns().len(), 1);
    }

    #[test]
    fn test_older_refresh_does_not_overwrite_newer() {
        let mut nav = navigator();
        let older = nav.refresh(0).unwrap();
        let newer = nav.refresh(0).unwrap();

        assert!(nav.apply_listing(newer.complete(Ok(vec![file("/r", "fresh")]))));
        assert!(!nav.apply_listing(older.complete(Ok(vec![]))));
        assert_eq!(nav.root().entries[0].name, "fresh");
    }

    #[test]
    fn test_refresh_path_targets_matching_columns() {
        let mut nav = navigator();
        open_a(&mut nav);
        let requests = nav.refresh_path(Path::new("/r/A"));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].depth, 1);
        assert_eq!(nav.refresh_all().len(), 2);
    }

    #[test]
    fn test_clear_selection_discards_children() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.clear_selection(0);
        assert_eq!(nav.columns().len(), 1);
        assert_eq!(nav.root().selected, None);
    }

    #[test]
    fn test_reset_root() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.reset_root(PathBuf::from("/other"), vec![file("/other", "z")]);
        assert_eq!(nav.columns().len(), 1);
        assert_eq!(nav.root().path, PathBuf::from("/other"));
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn test_events_describe_transitions() {
        let mut nav = navigator();
        open_a(&mut nav);
        nav.select(1, 1);
        let events = nav.drain_events();
        assert_eq!(
            events,
            vec![
                NavigatorEvent::SelectionChanged {
                    depth: 0,
                    path: Some(PathBuf::from("/r/A")),
                },
                NavigatorEvent::ColumnAppended { depth: 1 },
                NavigatorEvent::SelectionChanged {
                    depth: 1,
                    path: Some(PathBuf::from("/r/A/D")),
                },
                NavigatorEvent::ActiveColumnChanged(1),
            ]
        );
    }

    #[test]
    fn test_chain_shape_over_selection_sequences() {
        let mut nav = navigator();
        for _ in 0..3 {
            open_a(&mut nav);
            assert_eq!(nav.columns().len(), 2);
            nav.select(1, 1);
            assert_eq!(nav.columns().len(), 2);
            nav.select(0, 1);
            assert_eq!(nav.columns().len(), 1);
            assert!(nav.active() < nav.columns().len());
        }
    }
}
