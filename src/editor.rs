use crate::document::{FormatError, SavedSearchDocument, WriteError};
use crate::finder::FinderControl;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures surfaced by editor operations. Format and state problems are
/// never silently recovered; the one exception is the best-effort
/// hide-extension write inside `commit_and_save`, which is logged and
/// swallowed.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("no document loaded")]
    NoDocument,
}

/// Holds the current document and its editable scope-path list.
///
/// The path list mirrors the document's scope array but is deliberately
/// decoupled from it; the two are joined only by `commit_and_save`. Not
/// designed for concurrent mutation; callers drive it from one thread.
pub struct SavedSearchEditor {
    document: Option<SavedSearchDocument>,
    paths: Vec<PathBuf>,
    dirty: bool,
    finder: Box<dyn FinderControl>,
}

impl SavedSearchEditor {
    pub fn new(finder: Box<dyn FinderControl>) -> Self {
        Self {
            document: None,
            paths: Vec::new(),
            dirty: false,
            finder,
        }
    }

    /// Read and parse a saved search, replacing any previously held document
    /// and path list.
    pub fn load_path(&mut self, path: &Path) -> Result<(), EditorError> {
        let bytes = fs::read(path)?;
        let document = SavedSearchDocument::from_bytes(&bytes)?;
        self.paths = document.scope_paths();
        self.document = Some(document);
        self.dirty = false;
        Ok(())
    }

    /// Start from an empty criteria skeleton.
    pub fn new_document(&mut self) {
        self.document = Some(SavedSearchDocument::new());
        self.paths.clear();
        self.dirty = false;
    }

    /// No dedup and no existence check: a scope may reference a location that
    /// only appears on disk later.
    pub fn insert_path(&mut self, path: PathBuf, at_front: bool) {
        if at_front {
            self.paths.insert(0, path);
        } else {
            self.paths.push(path);
        }
        self.dirty = true;
    }

    /// Remove every entry whose value is in `selected`, keeping the relative
    /// order of survivors. An empty selection removes nothing, never
    /// "everything".
    pub fn remove_paths(&mut self, selected: &HashSet<PathBuf>) {
        if selected.is_empty() {
            return;
        }
        let before = self.paths.len();
        self.paths.retain(|p| !selected.contains(p));
        if self.paths.len() != before {
            self.dirty = true;
        }
    }

    /// Reorder a single entry. Out-of-bounds indices are ignored.
    pub fn move_path(&mut self, from: usize, to: usize) {
        if from == to || from >= self.paths.len() || to >= self.paths.len() {
            return;
        }
        let entry = self.paths.remove(from);
        self.paths.insert(to, entry);
        self.dirty = true;
    }

    /// Write the editable path list into the document, serialize it as a
    /// binary plist, and write the bytes to `destination`. On success Finder
    /// is asked to refresh; any earlier failure returns before that point.
    pub fn commit_and_save(&mut self, destination: &Path) -> Result<(), EditorError> {
        let Some(document) = self.document.as_mut() else {
            return Err(EditorError::NoDocument);
        };

        document.set_scope_paths(&self.paths);
        let bytes = document.to_binary_bytes()?;
        fs::write(destination, &bytes)?;

        // Finder shows smart folders without their extension; best effort.
        if let Err(e) = self.finder.hide_extension(destination) {
            log::warn!(
                "could not hide extension of {} (non-fatal): {e}",
                destination.display()
            );
        }

        self.finder.request_refresh();

        self.dirty = false;
        Ok(())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn document(&self) -> Option<&SavedSearchDocument> {
        self.document.as_ref()
    }
}
