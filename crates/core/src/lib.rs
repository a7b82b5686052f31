pub mod clean;
pub mod confirm;
pub mod fs;
pub mod model;
pub mod plan;
pub mod rename;
pub mod scan;

pub use clean::{clean_item_path, CleanOutcome, PathTooLong};
pub use confirm::{confirm_changes, MAX_INPUT_LEN};
pub use fs::{DirChild, FileSystem, RealFileSystem, PLATFORM_MAX_PATH_LEN};
pub use model::{EntryKind, RenameEntry};
pub use plan::{AppendError, RenamePlan, INITIAL_CAPACITY};
pub use rename::{apply_renames, RenameOutcome};
pub use scan::{scan_directory, ScanError, ScanOutcome};
