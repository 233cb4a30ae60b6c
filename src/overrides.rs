//! Sparse per-workspace bar visibility overrides.
//!
//! An entry is created the first time the bar is toggled on a workspace and
//! is never removed.  If the compositor later reuses the id for a different
//! workspace, the old override still applies.

use crate::command::WorkspaceId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceBarOverrides {
    entries: HashMap<WorkspaceId, bool>,
}

impl WorkspaceBarOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// The manual override for `workspace`, or `None` to follow the default.
    pub fn get(&self, workspace: WorkspaceId) -> Option<bool> {
        self.entries.get(&workspace).copied()
    }

    pub fn set(&mut self, workspace: WorkspaceId, visible: bool) {
        self.entries.insert(workspace, visible);
    }

    /// Flip the override for `workspace` and return the new value.
    ///
    /// A workspace without an override starts from `!current`, where
    /// `current` is the visibility the user is looking at right now.
    pub fn toggle_or_init(&mut self, workspace: WorkspaceId, current: bool) -> bool {
        let entry = self.entries.entry(workspace).or_insert(current);
        *entry = !*entry;
        *entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
