use crate::entry::FileEntry;
use crate::error::ListError;
use crate::state::SortOptions;
use std::fs;
use std::path::Path;

/// How a directory should be listed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListingOptions {
    pub show_hidden: bool,
    pub sort: SortOptions,
}

/// List `path`, dropping hidden entries unless requested, sorted per `options`.
///
/// Entries whose metadata cannot be read (deleted mid-listing) are skipped.
pub fn read_directory(path: &Path, options: &ListingOptions) -> Result<Vec<FileEntry>, ListError> {
    let metadata = fs::metadata(path).map_err(|e| ListError::from_io(path, e))?;
    if !metadata.is_dir() {
        return Err(ListError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let read_dir = fs::read_dir(path).map_err(|e| ListError::from_io(path, e))?;
    let mut entries = Vec::new();
    for entry in read_dir.flatten() {
        let Some(file_entry) = FileEntry::from_path(entry.path()) else {
            continue;
        };
        if options.show_hidden || !file_entry.is_hidden() {
            entries.push(file_entry);
        }
    }
    options.sort.sort(&mut entries);
    Ok(entries)
}

pub fn is_likely_binary(path: &Path) -> bool {
    let mut buf = [0u8; 8192];
    if let Ok(mut f) = fs::File::open(path) {
        if let Ok(n) = std::io::Read::read(&mut f, &mut buf) {
            if n == 0 {
                return false;
            }
            let null_count = buf[..n].iter().filter(|&&b| b == 0).count();
            return null_count > (n / 100).max(1);
        }
    }
    false
}
