use tracing::debug;

use crate::fs::FileSystem;
use crate::plan::RenamePlan;

#[derive(Debug, Default)]
pub struct RenameOutcome {
    pub renamed: usize,
    pub failures: Vec<String>,
}

impl RenameOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies every rename in the plan, best-effort. A failure is recorded and
/// the remaining entries are still attempted; nothing is rolled back.
pub fn apply_renames(fs: &dyn FileSystem, plan: &RenamePlan) -> RenameOutcome {
    let mut outcome = RenameOutcome::default();
    for entry in plan.iter() {
        match fs.rename(&entry.current_path, &entry.cleaned_path) {
            Ok(()) => outcome.renamed += 1,
            Err(err) => outcome
                .failures
                .push(format!("{}: {err}", entry.current_path.display())),
        }
    }
    debug!("renamed {} of {} item(s)", outcome.renamed, plan.len());
    outcome
}
