// Tabs state management, one column navigator per tab
use super::navigator::{ColumnNavigator, ListingRequest};
use std::path::{Path, PathBuf};

/// Stable tab identity, used to route listings back to their tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabId(u64);

pub struct Tab {
    pub id: TabId,
    pub label: String,
    pub navigator: ColumnNavigator,
}

impl Tab {
    fn new(id: TabId, path: PathBuf) -> Self {
        Self {
            id,
            label: label_for(&path),
            navigator: ColumnNavigator::new(path, Vec::new()),
        }
    }

    pub fn update_label(&mut self) {
        self.label = label_for(&self.navigator.root().path);
    }

    /// Re-root at the directory enclosing the root column and request its listing.
    /// Does nothing at a filesystem root.
    pub fn reroot_to_parent(&mut self) -> Option<ListingRequest> {
        let parent = self
            .navigator
            .root()
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())?
            .to_path_buf();
        log::info!("root of tab {:?} is now {}", self.id, parent.display());
        self.navigator.reset_root(parent, Vec::new());
        self.update_label();
        self.navigator.refresh(0)
    }
}

fn label_for(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("/")
        .to_string()
}

/// Manages multiple tabs. There is always at least one.
pub struct TabsManager {
    tabs: Vec<Tab>,
    active_tab: usize,
    next_id: u64,
}

impl TabsManager {
    pub fn new(initial_path: PathBuf) -> Self {
        Self {
            tabs: vec![Tab::new(TabId(0), initial_path)],
            active_tab: 0,
            next_id: 1,
        }
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active_tab]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active_tab]
    }

    pub fn active_index(&self) -> usize {
        self.active_tab
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tab> {
        self.tabs.iter_mut()
    }

    /// Open a tab rooted at `path` and make it active.
    pub fn new_tab(&mut self, path: PathBuf) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        self.tabs.push(Tab::new(id, path));
        self.active_tab = self.tabs.len() - 1;
        id
    }

    pub fn close_tab(&mut self, index: usize) -> bool {
        if self.tabs.len() <= 1 || index >= self.tabs.len() {
            return false;
        }

        self.tabs.remove(index);

        if self.active_tab > index || self.active_tab >= self.tabs.len() {
            self.active_tab -= 1;
        }

        true
    }

    pub fn close_current_tab(&mut self) -> bool {
        self.close_tab(self.active_tab)
    }

    pub fn switch_to_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active_tab = index;
        }
    }

    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
    }

    pub fn prev_tab(&mut self) {
        if self.active_tab == 0 {
            self.active_tab = self.tabs.len() - 1;
        } else {
            self.active_tab -= 1;
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}
