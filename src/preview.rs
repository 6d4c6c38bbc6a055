//! Quick-look style preview surface.
//!
//! The surface is created once by the shell and handed to the navigator by
//! reference. While it is open it owns arrow-key capture and reports the keys
//! back as [`PreviewKey`]s, which the navigator turns into column moves.

use crate::entry::FileEntry;

pub trait PreviewSurface {
    fn is_open(&self) -> bool;

    /// Open the surface on `entry`.
    fn show(&mut self, entry: &FileEntry);

    /// Follow a selection change while open. Ignored when closed.
    fn update(&mut self, entry: &FileEntry);

    fn hide(&mut self);
}

/// Arrow keys captured by an open preview surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKey {
    Up,
    Down,
    Left,
    Right,
}

impl PreviewKey {
    /// Offset within the active column this key stands for.
    pub fn offset(self) -> isize {
        match self {
            PreviewKey::Up | PreviewKey::Left => -1,
            PreviewKey::Down | PreviewKey::Right => 1,
        }
    }
}
