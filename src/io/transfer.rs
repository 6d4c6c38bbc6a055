// Copy and move of dropped items, with Finder-style collision naming
use crate::error::TransferError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

#[derive(Clone, Debug)]
pub struct TransferRequest {
    pub sources: Vec<PathBuf>,
    pub destination: PathBuf,
    pub mode: TransferMode,
}

/// Outcome of a multi-item transfer. Items succeed or fail independently.
#[derive(Debug)]
pub struct TransferReport {
    pub mode: TransferMode,
    pub destination: PathBuf,
    /// Final paths of the items that made it
    pub completed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, TransferError)>,
    /// Parents the moved items were taken from
    pub source_parents: Vec<PathBuf>,
}

impl TransferReport {
    pub fn summary(&self) -> String {
        let verb = match self.mode {
            TransferMode::Copy => "Copied",
            TransferMode::Move => "Moved",
        };
        if self.failed.is_empty() {
            format!("{} {} item(s)", verb, self.completed.len())
        } else {
            format!(
                "{} {} item(s), {} failed: {}",
                verb,
                self.completed.len(),
                self.failed.len(),
                self.failed[0].1
            )
        }
    }

    /// Directories whose listings changed because of this transfer.
    pub fn touched_directories(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.destination.clone()];
        for parent in &self.source_parents {
            if !dirs.contains(parent) {
                dirs.push(parent.clone());
            }
        }
        dirs
    }
}

/// Pick a free name for `name` inside `dir`.
///
/// `x.txt` becomes `x 1.txt`, then `x 2.txt`, and so on. The counter goes
/// before the last extension; names without one get it appended.
pub fn unique_destination(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !exists(&candidate) {
        return candidate;
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let extension = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1u64;
    loop {
        let candidate = dir.join(format!("{} {}{}", stem, n, extension));
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// Dangling symlinks still occupy their name.
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

pub fn transfer(request: &TransferRequest) -> TransferReport {
    let mut report = TransferReport {
        mode: request.mode,
        destination: request.destination.clone(),
        completed: Vec::new(),
        failed: Vec::new(),
        source_parents: Vec::new(),
    };

    for src in &request.sources {
        match transfer_one(src, &request.destination, request.mode) {
            Ok(Some(dest)) => {
                log::debug!("{:?} {} -> {}", request.mode, src.display(), dest.display());
                if request.mode == TransferMode::Move {
                    if let Some(parent) = src.parent() {
                        if !report.source_parents.iter().any(|p| p == parent) {
                            report.source_parents.push(parent.to_path_buf());
                        }
                    }
                }
                report.completed.push(dest);
            }
            Ok(None) => report.completed.push(src.clone()),
            Err(e) => {
                log::warn!("{:?} of {} abandoned: {}", request.mode, src.display(), e);
                report.failed.push((src.clone(), e));
            }
        }
    }

    report
}

/// Returns the final path, or `None` when there was nothing to do.
fn transfer_one(src: &Path, dest_dir: &Path, mode: TransferMode) -> Result<Option<PathBuf>, TransferError> {
    let name = src
        .file_name()
        .ok_or_else(|| TransferError::InvalidSource {
            path: src.to_path_buf(),
        })?
        .to_string_lossy()
        .to_string();
    let meta = fs::symlink_metadata(src).map_err(|_| TransferError::InvalidSource {
        path: src.to_path_buf(),
    })?;

    if mode == TransferMode::Move && src.parent() == Some(dest_dir) {
        return Ok(None);
    }
    if meta.is_dir() && dest_dir.starts_with(src) {
        return Err(TransferError::IntoItself {
            path: src.to_path_buf(),
        });
    }

    let target = unique_destination(dest_dir, &name);
    let file_type = meta.file_type();
    match mode {
        TransferMode::Copy => copy_item(src, &target, file_type)?,
        TransferMode::Move => {
            if let Err(e) = fs::rename(src, &target) {
                if !is_cross_device(&e) {
                    return Err(io_error("move", src, e));
                }
                copy_item(src, &target, file_type)?;
                if file_type.is_dir() {
                    // Partly removed sources keep their copy.
                    fs::remove_dir_all(src).map_err(|e| io_error("remove", src, e))?;
                } else if let Err(e) = fs::remove_file(src) {
                    discard_partial(&target);
                    return Err(io_error("remove", src, e));
                }
            }
        }
    }
    Ok(Some(target))
}

/// Copy `src` to the fresh path `target`. On failure nothing is left at `target`.
fn copy_item(src: &Path, target: &Path, file_type: fs::FileType) -> Result<(), TransferError> {
    let copied = copy_entry(src, target, file_type);
    if copied.is_err() {
        discard_partial(target);
    }
    copied
}

// Symlinks are recreated, never followed.
fn copy_entry(src: &Path, target: &Path, file_type: fs::FileType) -> Result<(), TransferError> {
    if file_type.is_symlink() {
        copy_symlink(src, target)
    } else if file_type.is_dir() {
        copy_dir_recursive(src, target)
    } else {
        fs::copy(src, target)
            .map(|_| ())
            .map_err(|e| io_error("copy", src, e))
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), TransferError> {
    fs::create_dir(dest).map_err(|e| io_error("create directory", dest, e))?;

    for entry in fs::read_dir(src).map_err(|e| io_error("read", src, e))? {
        let entry = entry.map_err(|e| io_error("read", src, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_error("read", &path, e))?;
        copy_entry(&path, &dest.join(entry.file_name()), file_type)?;
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, target: &Path) -> Result<(), TransferError> {
    let link = fs::read_link(src).map_err(|e| io_error("read link", src, e))?;
    std::os::unix::fs::symlink(&link, target).map_err(|e| io_error("link", target, e))
}

#[cfg(windows)]
fn copy_symlink(src: &Path, target: &Path) -> Result<(), TransferError> {
    let link = fs::read_link(src).map_err(|e| io_error("read link", src, e))?;
    let created = if fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(&link, target)
    } else {
        std::os::windows::fs::symlink_file(&link, target)
    };
    created.map_err(|e| io_error("link", target, e))
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(src: &Path, target: &Path) -> Result<(), TransferError> {
    fs::copy(src, target)
        .map(|_| ())
        .map_err(|e| io_error("copy", src, e))
}

fn discard_partial(target: &Path) {
    let removed = match fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(target),
        Ok(_) => fs::remove_file(target),
        Err(_) => return,
    };
    if let Err(e) = removed {
        log::warn!("could not clean up {}: {}", target.display(), e);
    }
}

fn io_error(action: &'static str, path: &Path, source: io::Error) -> TransferError {
    TransferError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV
    e.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}
