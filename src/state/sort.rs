// Sort options for column listings
use crate::entry::FileEntry;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Size,
    Modified,
    Extension,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOptions {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub dirs_first: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Name,
            sort_order: SortOrder::Ascending,
            dirs_first: false,
        }
    }
}

impl SortBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "name" => Some(SortBy::Name),
            "size" => Some(SortBy::Size),
            "modified" => Some(SortBy::Modified),
            "extension" => Some(SortBy::Extension),
            _ => None,
        }
    }
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

impl SortOptions {
    pub fn cycle_sort_by(&mut self) {
        self.sort_by = match self.sort_by {
            SortBy::Name => SortBy::Size,
            SortBy::Size => SortBy::Modified,
            SortBy::Modified => SortBy::Extension,
            SortBy::Extension => SortBy::Name,
        };
    }

    pub fn toggle_order(&mut self) {
        self.sort_order = match self.sort_order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        };
    }

    pub fn toggle_dirs_first(&mut self) {
        self.dirs_first = !self.dirs_first;
    }

    /// Order two entries. Names break ties so the result is total.
    pub fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        if self.dirs_first && a.is_dir != b.is_dir {
            return b.is_dir.cmp(&a.is_dir);
        }
        let by_name = || a.name.to_lowercase().cmp(&b.name.to_lowercase());
        let ordering = match self.sort_by {
            SortBy::Name => by_name(),
            SortBy::Size => a.size.cmp(&b.size).then_with(by_name),
            SortBy::Modified => a.modified.cmp(&b.modified).then_with(by_name),
            SortBy::Extension => a.extension.cmp(&b.extension).then_with(by_name),
        };
        match self.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    pub fn sort(&self, entries: &mut [FileEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryId, EntryKind};
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn entry(name: &str, is_dir: bool, size: u64) -> FileEntry {
        FileEntry {
            id: EntryId { device: 0, inode: size },
            path: PathBuf::from("/t").join(name),
            name: name.to_string(),
            is_dir,
            is_symlink: false,
            size,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(size),
            extension: String::new(),
            kind: if is_dir { EntryKind::Folder } else { EntryKind::Other },
        }
    }

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_by_name_case_insensitive() {
        let mut entries = vec![entry("beta", false, 1), entry("Alpha", true, 2), entry("gamma", false, 3)];
        SortOptions::default().sort(&mut entries);
        assert_eq!(names(&entries), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_dirs_first_groups_directories() {
        let mut entries = vec![entry("a.txt", false, 1), entry("zeta", true, 2), entry("b.txt", false, 3)];
        let options = SortOptions {
            dirs_first: true,
            ..SortOptions::default()
        };
        options.sort(&mut entries);
        assert_eq!(names(&entries), vec!["zeta", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_size_descending() {
        let mut entries = vec![entry("small", false, 1), entry("big", false, 30), entry("mid", false, 10)];
        let options = SortOptions {
            sort_by: SortBy::Size,
            sort_order: SortOrder::Descending,
            dirs_first: false,
        };
        options.sort(&mut entries);
        assert_eq!(names(&entries), vec!["big", "mid", "small"]);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut options = SortOptions::default();
        for _ in 0..4 {
            options.cycle_sort_by();
        }
        assert_eq!(options.sort_by, SortBy::Name);
        options.toggle_order();
        assert_eq!(options.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_parse() {
        assert_eq!(SortBy::parse("Modified"), Some(SortBy::Modified));
        assert_eq!(SortBy::parse("colour"), None);
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Descending));
    }
}
