// Notifications the navigator queues for the render layer
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigatorEvent {
    /// Selection of a column changed; `None` means it was cleared
    SelectionChanged { depth: usize, path: Option<PathBuf> },
    ColumnAppended { depth: usize },
    ColumnRefreshed { depth: usize },
    /// Columns past `len` were discarded
    ColumnsTruncated { len: usize },
    ActiveColumnChanged(usize),
    ColumnLoadFailed(ColumnLoadFailure),
}

/// A listing that could not be completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLoadFailure {
    pub depth: usize,
    pub path: PathBuf,
    pub message: String,
}
