pub mod columns;
pub mod panels;
pub mod preview;
pub mod status;

pub use preview::{PreviewContent, PreviewPane};
pub use status::StatusLine;

use crate::io::TransferMode;
use std::path::PathBuf;

/// Something the user did during rendering, applied once the frame is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    Select { depth: usize, index: usize },
    Open { depth: usize, index: usize },
    Drop {
        sources: Vec<PathBuf>,
        destination: PathBuf,
        mode: TransferMode,
    },
    SwitchTab(usize),
    NewTab,
    CloseTab(usize),
}

/// Drag-and-drop payload carried between column rows.
#[derive(Clone, Debug)]
pub struct DragPayload {
    pub paths: Vec<PathBuf>,
}
