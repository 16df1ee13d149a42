//! Tracks which photo each derived file belongs to within one run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Derived file paths (outputs, manifests) keyed to the photo that used them
/// first.
///
/// Both are named after the photo's file stem only, so `party.jpg` and
/// `party.png`, or same-named photos from different directories sharing an
/// output directory, map to the same file.
#[derive(Debug, Default)]
pub(crate) struct PathClaims {
    owners: Mutex<HashMap<PathBuf, String>>,
}

impl PathClaims {
    /// Records that `source` uses `path`.
    ///
    /// Returns the earlier photo if a different one already used `path`.
    pub(crate) fn claim(&self, path: &Path, source: &str) -> Option<String> {
        let mut owners = self.owners.lock().unwrap_or_else(PoisonError::into_inner);
        match owners.get(path) {
            Some(owner) if owner != source => Some(owner.clone()),
            Some(_) => None,
            None => {
                owners.insert(path.to_path_buf(), source.to_string());
                None
            }
        }
    }
}
