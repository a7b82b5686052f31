use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub current_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub kind: EntryKind,
}

impl RenameEntry {
    pub fn new(
        current_path: impl Into<PathBuf>,
        cleaned_path: impl Into<PathBuf>,
        kind: EntryKind,
    ) -> Self {
        Self {
            current_path: current_path.into(),
            cleaned_path: cleaned_path.into(),
            kind,
        }
    }

    /// The item's own name, without its parent directories.
    pub fn current_name(&self) -> Cow<'_, str> {
        final_segment(&self.current_path)
    }

    pub fn cleaned_name(&self) -> Cow<'_, str> {
        final_segment(&self.cleaned_path)
    }
}

fn final_segment(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(OsStr::to_string_lossy)
        .unwrap_or(Cow::Borrowed(""))
}
