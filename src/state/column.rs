// One directory listing in the column chain
use crate::entry::FileEntry;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct Column {
    pub path: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected: Option<usize>,
    /// Ticket of the listing these entries came from
    pub(crate) ticket: u64,
}

impl Column {
    pub fn new(path: PathBuf, entries: Vec<FileEntry>, ticket: u64) -> Self {
        Self {
            path,
            entries,
            selected: None,
            ticket,
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label shown above the column.
    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
