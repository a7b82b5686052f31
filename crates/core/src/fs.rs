use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::model::EntryKind;

/// Longest path the platform accepts, in bytes, excluding the terminator.
#[cfg(windows)]
pub const PLATFORM_MAX_PATH_LEN: usize = 259;
/// Longest path the platform accepts, in bytes, excluding the terminator.
#[cfg(not(windows))]
pub const PLATFORM_MAX_PATH_LEN: usize = 4095;

/// One directory child as reported by enumeration.
#[derive(Debug, Clone)]
pub struct DirChild {
    pub name: OsString,
    pub kind: EntryKind,
}

/// Filesystem capabilities the scan and rename pipeline runs against.
///
/// Keeping this surface small lets tests substitute an in-memory
/// implementation, including one with a tiny path limit.
pub trait FileSystem {
    /// Longest path, in bytes, this filesystem accepts.
    fn max_path_len(&self) -> usize;

    /// Whether `path` refers to an existing item.
    fn path_exists(&self, path: &Path) -> bool;

    /// Whether `path` refers to a directory.
    fn is_directory(&self, path: &Path) -> bool;

    /// Immediate children of `path`, excluding the `.` and `..`
    /// pseudo-entries. Fails only when enumeration cannot start; children
    /// that cannot be read mid-listing are omitted.
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>>;

    /// Renames `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// `FileSystem` backed by the platform filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn max_path_len(&self) -> usize {
        PLATFORM_MAX_PATH_LEN
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)? {
            let Ok(entry) = entry else { continue };
            let kind = match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => EntryKind::Directory,
                _ => EntryKind::File,
            };
            children.push(DirChild {
                name: entry.file_name(),
                kind,
            });
        }
        Ok(children)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFileSystem;


#[cfg(test)]
mod tests {
    use super::{FileSystem, RealFileSystem};
    use crate::model::EntryKind;
    use std::fs::File;

    #[test]
    fn lists_children_with_their_kinds() {
        let dir = tempfile::tempdir().expect("tempdir");
        File::create(dir.path().join("a.txt")).expect("create file");
        std::fs::create_dir(dir.path().join("nested")).expect("create dir");

        let children = RealFileSystem.list_children(dir.path()).expect("list");
        let mut names: Vec<(String, EntryKind)> = children
            .into_iter()
            .map(|child| (child.name.to_string_lossy().into_owned(), child.kind))
            .collect();
        names.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            names,
            vec![
                ("a.txt".to_string(), EntryKind::File),
                ("nested".to_string(), EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn listing_a_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(RealFileSystem
            .list_children(&dir.path().join("missing"))
            .is_err());
    }

    #[test]
    fn renames_an_item_in_place() {
        let dir = tempfile::tempdir().expect("tempdir");
        let from = dir.path().join("Old Name.txt");
        File::create(&from).expect("create file");
        let to = dir.path().join("old_name.txt");

        RealFileSystem.rename(&from, &to).expect("rename");
        assert!(!RealFileSystem.path_exists(&from));
        assert!(RealFileSystem.path_exists(&to));
    }
}
