use std::path::is_separator;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("path is {len} bytes, longer than the {max} byte limit")]
pub struct PathTooLong {
    pub len: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub cleaned: String,
    pub changed: bool,
}

/// Lowercases the final segment of `path` and turns its spaces into
/// underscores. Everything up to and including the last separator is copied
/// through verbatim.
pub fn clean_item_path(path: &str, max_path_len: usize) -> Result<CleanOutcome, PathTooLong> {
    if path.len() > max_path_len {
        return Err(PathTooLong {
            len: path.len(),
            max: max_path_len,
        });
    }

    let name_start = path.rfind(is_separator).map_or(0, |index| index + 1);
    let (prefix, name) = path.split_at(name_start);

    let mut cleaned = String::with_capacity(path.len());
    cleaned.push_str(prefix);
    for ch in name.chars() {
        if ch == ' ' {
            cleaned.push('_');
        } else if ch.is_uppercase() {
            cleaned.extend(ch.to_lowercase());
        } else {
            cleaned.push(ch);
        }
    }
    // Uppercase letters without a lowercase form pass through unaltered.
    let changed = &cleaned[name_start..] != name;

    Ok(CleanOutcome { cleaned, changed })
}
