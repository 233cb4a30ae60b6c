//! Per-monitor shell mode.
//!
//! Each monitor cycles through [`ShellMode`] independently.  Modes live in a
//! single [`Variable`] indexed by monitor, so a subscriber always sees the
//! whole picture.

use crate::command::{MonitorIndex, ShellMode};
use crate::variable::Variable;
use log::{debug, warn};

#[derive(Debug)]
pub struct ModeCoordinator {
    initial: Vec<ShellMode>,
    modes: Variable<Vec<ShellMode>>,
}

impl ModeCoordinator {
    /// Track `monitor_count` monitors, each starting from its configured
    /// mode.
    ///
    /// `initial[i]` is the starting mode of monitor `i`; monitors without an
    /// entry start in [`ShellMode::Normal`].
    pub fn new(initial: Vec<ShellMode>, monitor_count: usize) -> Self {
        let modes = (0..monitor_count)
            .map(|i| initial_mode(&initial, i))
            .collect();
        Self {
            initial,
            modes: Variable::new(modes),
        }
    }

    pub fn modes(&self) -> &[ShellMode] {
        self.modes.get()
    }

    /// The current mode of `monitor`, or its configured starting mode if it
    /// is not tracked yet.
    pub fn mode(&self, monitor: MonitorIndex) -> ShellMode {
        self.modes
            .get()
            .get(monitor.0)
            .copied()
            .unwrap_or_else(|| initial_mode(&self.initial, monitor.0))
    }

    /// Cell holding every monitor's mode, for subscribing.
    pub fn modes_cell(&mut self) -> &mut Variable<Vec<ShellMode>> {
        &mut self.modes
    }

    /// Advance one monitor's mode and return the new mode.
    ///
    /// The target is `monitor` if given, else `active`, else monitor 0.
    /// An index that cannot be tracked leaves every mode unchanged.
    pub fn cycle(
        &mut self,
        monitor: Option<MonitorIndex>,
        active: Option<MonitorIndex>,
    ) -> ShellMode {
        let MonitorIndex(idx) = monitor.or(active).unwrap_or(MonitorIndex(0));
        if idx.checked_add(1).is_none() {
            warn!("monitor index {} out of range", idx);
            return self.mode(MonitorIndex(idx));
        }
        let initial = &self.initial;
        let mut next = ShellMode::default();
        self.modes.update(|modes| {
            grow(modes, initial, idx + 1);
            modes[idx] = modes[idx].next();
            next = modes[idx];
        });
        debug!("monitor {} mode is now {}", idx, next);
        next
    }

    /// Start tracking newly attached monitors.  Never shrinks, so a monitor
    /// that is unplugged and re-attached keeps its mode.
    pub fn ensure_monitors(&mut self, count: usize) {
        if count <= self.modes.get().len() {
            return;
        }
        let initial = &self.initial;
        self.modes.update(|modes| grow(modes, initial, count));
    }
}

fn initial_mode(initial: &[ShellMode], idx: usize) -> ShellMode {
    initial.get(idx).copied().unwrap_or_default()
}

fn grow(modes: &mut Vec<ShellMode>, initial: &[ShellMode], len: usize) {
    while modes.len() < len {
        let idx = modes.len();
        modes.push(initial_mode(initial, idx));
    }
}
