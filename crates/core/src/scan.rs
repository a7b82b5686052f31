use std::io;
use std::path::{Path, MAIN_SEPARATOR};

use thiserror::Error;
use tracing::debug;

use crate::clean::clean_item_path;
use crate::fs::FileSystem;
use crate::model::RenameEntry;
use crate::plan::{AppendError, RenamePlan};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("path is {len} bytes, longer than the {max} byte limit")]
    PathTooLong { len: usize, max: usize },
    #[error("path not found: {path}")]
    NotFound { path: String },
    #[error("not a directory: {path}")]
    NotADirectory { path: String },
    #[error("no room to build child paths under {path}")]
    SearchPathTooLong { path: String },
    #[error("could not enumerate {path}")]
    EnumerationFailed {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub plan: RenamePlan,
    pub warnings: Vec<String>,
}

/// Collects the children of `dir_path` whose names need cleaning.
///
/// Path validation failures and enumeration never starting are fatal.
/// Everything past that point is best-effort: an unusable child is skipped
/// with a warning, and if the plan stops accepting entries the partial plan
/// is returned with a warning instead of an error.
pub fn scan_directory(fs: &dyn FileSystem, dir_path: &str) -> Result<ScanOutcome, ScanError> {
    let max_path_len = fs.max_path_len();
    if dir_path.len() > max_path_len {
        return Err(ScanError::PathTooLong {
            len: dir_path.len(),
            max: max_path_len,
        });
    }
    let dir = Path::new(dir_path);
    if !fs.path_exists(dir) {
        return Err(ScanError::NotFound {
            path: dir_path.to_string(),
        });
    }
    if !fs.is_directory(dir) {
        return Err(ScanError::NotADirectory {
            path: dir_path.to_string(),
        });
    }
    // Child paths need room for a separator and at least one character.
    if dir_path.len() + 2 > max_path_len {
        return Err(ScanError::SearchPathTooLong {
            path: dir_path.to_string(),
        });
    }

    let children = fs
        .list_children(dir)
        .map_err(|source| ScanError::EnumerationFailed {
            path: dir_path.to_string(),
            source,
        })?;

    let mut plan = RenamePlan::with_max_name_len(max_path_len);
    let mut warnings = Vec::new();
    for child in children {
        let Some(name) = child.name.to_str() else {
            warnings.push(format!(
                "skipped an item under {dir_path}: name is not valid UTF-8"
            ));
            continue;
        };
        if name == "." || name == ".." {
            continue;
        }
        let item_path = join_child(dir_path, name);
        let outcome = match clean_item_path(&item_path, max_path_len) {
            Ok(outcome) => outcome,
            Err(err) => {
                warnings.push(format!("skipped {item_path}: {err}"));
                continue;
            }
        };
        if !outcome.changed {
            continue;
        }
        match plan.append(RenameEntry::new(item_path.clone(), outcome.cleaned, child.kind)) {
            Ok(()) => {}
            Err(err @ AppendError::NameTooLong { .. }) => {
                warnings.push(format!("skipped {item_path}: {err}"));
            }
            Err(err) => {
                warnings.push(format!(
                    "stopped collecting after {} item(s): {err}; not all items were collected",
                    plan.len()
                ));
                break;
            }
        }
    }

    debug!(
        "collected {} rename candidate(s) under {} with {} warning(s)",
        plan.len(),
        dir_path,
        warnings.len()
    );
    Ok(ScanOutcome { plan, warnings })
}

fn join_child(dir_path: &str, name: &str) -> String {
    let mut path = String::with_capacity(dir_path.len() + name.len() + 1);
    path.push_str(dir_path);
    if !dir_path.ends_with(std::path::is_separator) {
        path.push(MAIN_SEPARATOR);
    }
    path.push_str(name);
    path
}

#[cfg(test)]
mod tests {
    use super::{join_child, scan_directory, ScanError};
    use crate::fs::MemoryFileSystem;
    use crate::model::EntryKind;

    fn fixture() -> MemoryFileSystem {
        let mut fs = MemoryFileSystem::new();
        fs.add_dir("/data");
        fs.add_file("/data/My File.TXT");
        fs.add_file("/data/already_clean.txt");
        fs.add_dir("/data/Archive Box");
        fs
    }

    #[test]
    fn collects_only_names_that_need_changes() {
        let outcome = scan_directory(&fixture(), "/data").expect("scan");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.plan.len(), 2);

        let first = outcome.plan.get(0).expect("first entry");
        assert_eq!(first.current_name(), "Archive Box");
        assert_eq!(first.cleaned_name(), "archive_box");
        assert_eq!(first.kind, EntryKind::Directory);

        let second = outcome.plan.get(1).expect("second entry");
        assert_eq!(second.current_name(), "My File.TXT");
        assert_eq!(second.cleaned_name(), "my_file.txt");
        assert_eq!(second.kind, EntryKind::File);
    }

    #[test]
    fn skips_pseudo_entries() {
        let mut fs = MemoryFileSystem::new();
        fs.add_dir("/data");
        fs.push_raw_child("/data", ".", EntryKind::Directory);
        fs.push_raw_child("/data", "..", EntryKind::Directory);
        fs.push_raw_child("/data", "Read Me", EntryKind::File);

        let outcome = scan_directory(&fs, "/data").expect("scan");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.plan.len(), 1);
        assert_eq!(outcome.plan.get(0).expect("entry").cleaned_name(), "read_me");
    }

    #[test]
    fn fails_when_the_path_is_missing() {
        let err = scan_directory(&MemoryFileSystem::new(), "/gone").unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn fails_when_the_path_is_a_file() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/data");
        let err = scan_directory(&fs, "/data").unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[test]
    fn fails_when_the_path_exceeds_the_limit() {
        let fs = MemoryFileSystem::with_max_path_len(8);
        let err = scan_directory(&fs, "/data/long").unwrap_err();
        assert!(matches!(err, ScanError::PathTooLong { len: 10, max: 8 }));
    }

    #[test]
    fn fails_when_no_child_path_can_fit() {
        let mut fs = MemoryFileSystem::with_max_path_len(8);
        fs.add_dir("/datadir");
        let err = scan_directory(&fs, "/datadir").unwrap_err();
        assert!(matches!(err, ScanError::SearchPathTooLong { .. }));
    }

    #[test]
    fn fails_when_enumeration_cannot_start() {
        let mut fs = MemoryFileSystem::new();
        fs.add_dir("/data");
        fs.deny_listing("/data");
        let err = scan_directory(&fs, "/data").unwrap_err();
        assert!(matches!(err, ScanError::EnumerationFailed { .. }));
    }

    #[test]
    fn skips_a_child_whose_path_exceeds_the_limit() {
        let mut fs = MemoryFileSystem::with_max_path_len(24);
        fs.add_dir("/data");
        fs.add_file("/data/Tiny A");
        fs.add_file("/data/An Extremely Long Name");

        let outcome = scan_directory(&fs, "/data").expect("scan");
        assert_eq!(outcome.plan.len(), 1);
        assert_eq!(outcome.plan.get(0).expect("entry").cleaned_name(), "tiny_a");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("skipped"));
    }

    #[test]
    fn a_name_with_only_caseless_uppercase_is_left_alone() {
        let mut fs = MemoryFileSystem::new();
        fs.add_dir("/data");
        fs.add_file("/data/ℕotes");

        let outcome = scan_directory(&fs, "/data").expect("scan");
        assert!(outcome.plan.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn skips_children_with_non_utf8_names() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let mut fs = MemoryFileSystem::new();
        fs.add_dir("/data");
        fs.push_raw_child(
            "/data",
            OsString::from_vec(vec![0x52, 0x61, 0xff]),
            EntryKind::File,
        );

        let outcome = scan_directory(&fs, "/data").expect("scan");
        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("not valid UTF-8"));
    }

    #[test]
    fn join_child_avoids_doubling_the_separator() {
        assert_eq!(join_child("/", "Data"), "/Data");
        assert_eq!(
            join_child("/data", "x"),
            format!("/data{}x", std::path::MAIN_SEPARATOR)
        );
    }
}
