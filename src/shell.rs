//! The single owner of all mutable state.
//!
//! [`Shell`] owns the visibility and mode coordinators plus the overlay
//! flags, and reacts to [`Command`]s by updating them and calling the
//! [`WindowControl`] backend.  It is the only writer of every
//! [`Variable`]; producers on other threads talk to it through an mpsc
//! channel drained on the main thread.

use crate::command::{Command, MonitorIndex};
use crate::config::{CloseEverythingConfig, Config};
use crate::mode::ModeCoordinator;
use crate::status::{FlagName, Snapshot, StatusEvent};
use crate::traits::{Compositor, WindowControl};
use crate::variable::Variable;
use crate::visibility::VisibilityCoordinator;
use crate::windows;
use log::{debug, info, warn};
use std::sync::mpsc;

/// Orchestrates bar state and window commands.
///
/// Generic over any [`Compositor`] and [`WindowControl`], so it is
/// independent of Hyprland and of how windows are actually drawn.
///
/// # Typical usage
///
/// ```ignore
/// let mut shell = Shell::new(HyprlandIpc::new(), windows, &config);
/// shell.handle(Command::ToggleBarForActiveWorkspace);
/// ```
pub struct Shell<C: Compositor, W: WindowControl> {
    compositor: C,
    windows: W,
    visibility: VisibilityCoordinator,
    modes: ModeCoordinator,
    show_music_controls: Variable<bool>,
    show_color_scheme: Variable<bool>,
    close_everything: CloseEverythingConfig,
    battery_low: u8,
}

impl<C: Compositor, W: WindowControl> Shell<C, W> {
    /// Build the shell and seed it from the compositor's current state.
    ///
    /// An unreachable compositor is not fatal: the active workspace stays
    /// unknown until the first workspace event, and one monitor is assumed.
    pub fn new(compositor: C, windows: W, config: &Config) -> Self {
        let mut visibility = VisibilityCoordinator::new(config.bar.default_visible);
        match compositor.active_workspace() {
            Ok(Some(ws)) => visibility.on_active_workspace_changed(ws),
            Ok(None) => debug!("compositor reports no active workspace"),
            Err(e) => warn!("failed to query active workspace: {}", e),
        }

        let mut shell = Self {
            compositor,
            windows,
            visibility,
            modes: ModeCoordinator::new(config.modes.clone(), 0),
            show_music_controls: Variable::new(false),
            show_color_scheme: Variable::new(false),
            close_everything: config.close_everything.clone(),
            battery_low: config.battery.low,
        };
        let count = shell.monitor_count();
        info!("tracking {} monitor(s)", count);
        shell.modes.ensure_monitors(count);
        shell
    }

    pub fn visibility(&self) -> &VisibilityCoordinator {
        &self.visibility
    }

    pub fn modes(&self) -> &ModeCoordinator {
        &self.modes
    }

    pub fn show_music_controls(&self) -> bool {
        self.show_music_controls.value()
    }

    pub fn show_color_scheme(&self) -> bool {
        self.show_color_scheme.value()
    }

    /// Everything a renderer needs to draw from scratch.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            show_bar: self.visibility.show_bar(),
            show_bar_default: self.visibility.show_bar_default(),
            modes: self.modes.modes().to_vec(),
            show_music_controls: self.show_music_controls.value(),
            show_color_scheme: self.show_color_scheme.value(),
            battery_low: self.battery_low,
        }
    }

    /// Publish every state change on `tx`, starting with a full
    /// [`StatusEvent::Snapshot`].
    pub fn attach_status(&mut self, tx: mpsc::Sender<StatusEvent>) {
        let _ = tx.send(StatusEvent::Snapshot(self.snapshot()));

        let t = tx.clone();
        self.visibility.show_bar_cell().subscribe(move |v| {
            let _ = t.send(StatusEvent::ShowBar(*v));
        });
        let t = tx.clone();
        self.visibility.show_bar_default_cell().subscribe(move |v| {
            let _ = t.send(StatusEvent::ShowBarDefault(*v));
        });
        let t = tx.clone();
        self.modes.modes_cell().subscribe(move |modes| {
            let _ = t.send(StatusEvent::Modes(modes.clone()));
        });
        for (name, cell) in [
            (FlagName::MusicControls, &mut self.show_music_controls),
            (FlagName::ColorScheme, &mut self.show_color_scheme),
        ] {
            let t = tx.clone();
            cell.subscribe(move |value| {
                let _ = t.send(StatusEvent::Flag {
                    name,
                    value: *value,
                });
            });
        }
    }

    /// Process a single [`Command`].
    ///
    /// Total: collaborator failures degrade to fallbacks and are logged.
    pub fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::ToggleBarDefault => {
                info!("toggle bar default");
                self.visibility.toggle_default();
            }

            Command::ToggleBarForActiveWorkspace => {
                info!("toggle bar for active workspace");
                self.visibility.toggle_for_active_workspace();
            }

            Command::CycleMode => {
                let active = self.active_monitor();
                let mode = self.modes.cycle(None, active);
                info!("cycle mode (active monitor {:?}) -> {}", active, mode);
            }

            Command::CycleModeOn(monitor) => {
                let known = self.modes.modes().len().max(self.monitor_count());
                if monitor.0 >= known {
                    warn!("ignoring cycle on monitor {}: only {} known", monitor, known);
                    return;
                }
                let mode = self.modes.cycle(Some(monitor), None);
                info!("cycle mode on monitor {} -> {}", monitor, mode);
            }

            Command::OpenOnAll(name) => {
                info!("open {} on all monitors", name);
                windows::open_on_all(&self.windows, &name, self.monitor_count());
            }

            Command::CloseOnAll(name) => {
                info!("close {} on all monitors", name);
                windows::close_on_all(&self.windows, &name, self.monitor_count());
            }

            Command::ToggleOnAll(name) => {
                info!("toggle {} on all monitors", name);
                windows::toggle_on_all(&self.windows, &name, self.monitor_count());
            }

            Command::CloseEverything => {
                info!("close everything");
                windows::close_everything(
                    &self.windows,
                    &self.close_everything,
                    self.monitor_count(),
                );
            }

            Command::ToggleMusicControls => {
                let v = !self.show_music_controls.value();
                info!("music controls {}", if v { "shown" } else { "hidden" });
                self.show_music_controls.set(v);
            }

            Command::ToggleColorScheme => {
                let v = !self.show_color_scheme.value();
                info!("color scheme {}", if v { "shown" } else { "hidden" });
                self.show_color_scheme.set(v);
            }

            Command::WorkspaceChanged(ws) => {
                debug!("active workspace {}", ws);
                self.visibility.on_active_workspace_changed(ws);
            }

            Command::MonitorsChanged => {
                let count = self.monitor_count();
                debug!("monitors changed, now {}", count);
                self.modes.ensure_monitors(count);
            }
        }
    }

    /// Monitor count from the compositor, or the fallback.
    fn monitor_count(&self) -> usize {
        let reported = self.compositor.monitor_count().unwrap_or_else(|e| {
            warn!("failed to query monitor count: {}", e);
            None
        });
        windows::resolve_monitor_count(reported)
    }

    fn active_monitor(&self) -> Option<MonitorIndex> {
        self.compositor.active_monitor().unwrap_or_else(|e| {
            warn!("failed to query active monitor: {}", e);
            None
        })
    }
}

//  Tests
