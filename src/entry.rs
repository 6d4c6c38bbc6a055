use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Stable identity of a file system object.
///
/// On unix this is the `(device, inode)` pair, so an entry keeps its id across
/// renames within a volume. Elsewhere it falls back to a hash of the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId {
    pub device: u64,
    pub inode: u64,
}

impl EntryId {
    #[cfg(unix)]
    fn from_metadata(_path: &Path, metadata: &fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        }
    }

    #[cfg(not(unix))]
    fn from_metadata(path: &Path, _metadata: &fs::Metadata) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self {
            device: 0,
            inode: hasher.finish(),
        }
    }
}

/// Coarse classification used for icons and the preview header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Text,
    Source,
    Image,
    Audio,
    Video,
    Archive,
    Document,
    Other,
}

impl EntryKind {
    fn classify(is_dir: bool, extension: &str) -> Self {
        if is_dir {
            return EntryKind::Folder;
        }
        match extension {
            "txt" | "md" | "log" | "csv" | "toml" | "yaml" | "yml" | "json" | "xml" | "ini"
            | "conf" => EntryKind::Text,
            "rs" | "py" | "js" | "mjs" | "ts" | "tsx" | "jsx" | "c" | "h" | "cpp" | "cc"
            | "hpp" | "java" | "go" | "rb" | "php" | "swift" | "kt" | "sh" | "bash" | "zsh"
            | "html" | "css" | "scss" | "sql" | "lua" => EntryKind::Source,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg" | "heic" | "tiff" => {
                EntryKind::Image
            }
            "mp3" | "wav" | "flac" | "ogg" | "m4a" | "aac" => EntryKind::Audio,
            "mp4" | "mkv" | "mov" | "avi" | "webm" => EntryKind::Video,
            "zip" | "tar" | "gz" | "tgz" | "7z" | "rar" | "xz" | "bz2" | "dmg" => {
                EntryKind::Archive
            }
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "odt" | "pages" => {
                EntryKind::Document
            }
            _ => EntryKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Folder => "Folder",
            EntryKind::Text => "Text",
            EntryKind::Source => "Source code",
            EntryKind::Image => "Image",
            EntryKind::Audio => "Audio",
            EntryKind::Video => "Video",
            EntryKind::Archive => "Archive",
            EntryKind::Document => "Document",
            EntryKind::Other => "File",
        }
    }
}

/// Snapshot of one directory entry, taken when its parent was listed.
#[derive(Clone, Debug, PartialEq)]
pub struct FileEntry {
    pub id: EntryId,
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub modified: SystemTime,
    pub extension: String,
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let symlink_meta = fs::symlink_metadata(&path).ok()?;
        let is_symlink = symlink_meta.is_symlink();

        let name = path.file_name()?.to_string_lossy().to_string();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        // Follow symlinks for the displayed metadata, but keep a dangling
        // link visible using its own metadata.
        let metadata = fs::metadata(&path).ok();
        let id_source = metadata.as_ref().unwrap_or(&symlink_meta);
        let id = EntryId::from_metadata(&path, id_source);
        let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
        let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .or_else(|| symlink_meta.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let kind = EntryKind::classify(is_dir, &extension);

        Some(Self {
            id,
            path,
            name,
            is_dir,
            is_symlink,
            size,
            modified,
            extension,
            kind,
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            EntryKind::Folder => "📁",
            EntryKind::Text => "📄",
            EntryKind::Source => "📝",
            EntryKind::Image => "🖼",
            EntryKind::Audio => "🎵",
            EntryKind::Video => "🎞",
            EntryKind::Archive => "📦",
            EntryKind::Document => "📑",
            EntryKind::Other => "📄",
        }
    }

    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{} \u{2192}", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn display_size(&self) -> String {
        if self.is_dir {
            "--".to_string()
        } else {
            bytesize::ByteSize(self.size).to_string()
        }
    }

    pub fn display_modified(&self) -> String {
        let datetime: DateTime<Local> = self.modified.into();
        datetime.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Notes.TXT");
        fs::write(&file, b"hello").unwrap();

        let entry = FileEntry::from_path(file.clone()).unwrap();
        assert_eq!(entry.name, "Notes.TXT");
        assert_eq!(entry.extension, "txt");
        assert_eq!(entry.size, 5);
        assert!(!entry.is_dir);
        assert_eq!(entry.kind, EntryKind::Text);
        assert_eq!(entry.path, file);
    }

    #[test]
    fn test_directory_kind_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("photos");
        fs::create_dir(&sub).unwrap();

        let entry = FileEntry::from_path(sub).unwrap();
        assert!(entry.is_dir);
        assert_eq!(entry.kind, EntryKind::Folder);
        assert_eq!(entry.display_size(), "--");
    }

    #[test]
    fn test_id_is_stable_between_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        fs::write(&file, b"fn main() {}").unwrap();

        let first = FileEntry::from_path(file.clone()).unwrap();
        let second = FileEntry::from_path(file).unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_missing_path_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileEntry::from_path(dir.path().join("gone")).is_none());
    }

    #[test]
    fn test_hidden_detection() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        fs::write(&file, b"").unwrap();
        assert!(FileEntry::from_path(file).unwrap().is_hidden());
    }
}
