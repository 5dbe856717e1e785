//! Select mode and the pending bulk-deletion set.

use std::collections::HashSet;

use crate::error::Result;
use crate::store::PhotoStore;
use crate::storage::KeyValueStore;

/// Select-mode flag plus the ids picked for bulk deletion.
///
/// Selected ids are not pruned when photos disappear by other means;
/// [`SelectionController::selected_in`] and bulk deletion both treat ids
/// missing from the store as absent.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    select_mode: bool,
    selected: HashSet<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_select_mode(&self) -> bool {
        self.select_mode
    }

    /// Flip select mode. The selection is cleared on every flip.
    pub fn enter_or_exit(&mut self) {
        self.select_mode = !self.select_mode;
        self.selected.clear();
        log::debug!("Select mode: {}", self.select_mode);
    }

    /// Add `id` to the selection, or remove it if already selected.
    /// Ignored outside select mode. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.select_mode {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.selected.contains(id)
    }

    /// Drop the selection without leaving select mode.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Number of selected ids that still exist in `store`.
    pub fn selected_in<S: KeyValueStore>(&self, store: &PhotoStore<S>) -> usize {
        self.selected.iter().filter(|id| store.contains(id)).count()
    }

    /// Delete every selected photo, then leave select mode.
    ///
    /// Select mode is left even when the write fails; the removal itself
    /// always applies to the in-memory collection.
    pub fn commit_delete<S: KeyValueStore>(&mut self, store: &mut PhotoStore<S>) -> Result<usize> {
        let result = store.remove_many(&self.selected);
        if let Ok(count) = result {
            log::info!("Deleted {} selected photos", count);
        }
        self.enter_or_exit();
        result
    }
}
