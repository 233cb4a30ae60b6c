//! Effective bar visibility.
//!
//! [`VisibilityCoordinator`] derives `show_bar` from three inputs: the global
//! default, the per-workspace override map and the active workspace.  After
//! every operation `show_bar` equals
//! [`effective_visibility`]`(default, overrides[active])`.

use crate::command::WorkspaceId;
use crate::overrides::WorkspaceBarOverrides;
use crate::variable::Variable;
use log::debug;

/// The visibility implied by the default and an optional override.
///
/// A disabled default hides the bar everywhere, overrides included.
pub fn effective_visibility(default: bool, override_: Option<bool>) -> bool {
    default && override_.unwrap_or(true)
}

#[derive(Debug)]
pub struct VisibilityCoordinator {
    show_bar_default: Variable<bool>,
    show_bar: Variable<bool>,
    overrides: WorkspaceBarOverrides,
    active_workspace: Option<WorkspaceId>,
}

impl VisibilityCoordinator {
    /// Start with the given default and no known active workspace.
    pub fn new(default_visible: bool) -> Self {
        Self {
            show_bar_default: Variable::new(default_visible),
            show_bar: Variable::new(default_visible),
            overrides: WorkspaceBarOverrides::new(),
            active_workspace: None,
        }
    }

    pub fn show_bar(&self) -> bool {
        self.show_bar.value()
    }

    pub fn show_bar_default(&self) -> bool {
        self.show_bar_default.value()
    }

    pub fn active_workspace(&self) -> Option<WorkspaceId> {
        self.active_workspace
    }

    pub fn overrides(&self) -> &WorkspaceBarOverrides {
        &self.overrides
    }

    /// Cell holding the effective visibility, for subscribing.
    pub fn show_bar_cell(&mut self) -> &mut Variable<bool> {
        &mut self.show_bar
    }

    /// Cell holding the global default, for subscribing.
    pub fn show_bar_default_cell(&mut self) -> &mut Variable<bool> {
        &mut self.show_bar_default
    }

    /// Flip the global default and recompute the effective visibility.
    pub fn toggle_default(&mut self) {
        let default = !self.show_bar_default.value();
        self.show_bar_default.set(default);
        debug!("bar default is now {}", default);
        self.recompute();
    }

    /// Flip the bar on the active workspace only.
    ///
    /// No-op while the default is off, or before the compositor has reported
    /// an active workspace.
    pub fn toggle_for_active_workspace(&mut self) {
        if !self.show_bar_default.value() {
            debug!("bar default is off, ignoring workspace toggle");
            return;
        }
        let Some(workspace) = self.active_workspace else {
            debug!("no active workspace known, ignoring workspace toggle");
            return;
        };
        let visible = self
            .overrides
            .toggle_or_init(workspace, self.show_bar.value());
        debug!("workspace {} bar override is now {}", workspace, visible);
        self.recompute();
    }

    /// React to the compositor switching workspaces.
    pub fn on_active_workspace_changed(&mut self, workspace: WorkspaceId) {
        self.active_workspace = Some(workspace);
        self.recompute();
    }

    fn recompute(&mut self) {
        let override_ = self
            .active_workspace
            .and_then(|ws| self.overrides.get(ws));
        let visible = effective_visibility(self.show_bar_default.value(), override_);
        self.show_bar.set(visible);
    }
}
