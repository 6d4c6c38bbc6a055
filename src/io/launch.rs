use crate::error::OpenError;
use std::path::Path;

/// Hands an entry to whatever should open it.
pub trait EntryLauncher {
    fn launch(&self, path: &Path) -> Result<(), OpenError>;
}

/// Opens paths with the platform's default application.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLauncher;

impl EntryLauncher for SystemLauncher {
    fn launch(&self, path: &Path) -> Result<(), OpenError> {
        open::that(path).map_err(|source| OpenError {
            path: path.to_path_buf(),
            source,
        })
    }
}
