//! Window commands fanned out across every monitor.
//!
//! Per-monitor windows are named `<name><index>` (`session0`, `session1`,
//! …).  All operations are fire-and-forget: backend errors are logged and
//! the fan-out continues.
//!
//! Two [`WindowControl`] backends are provided: [`stream`] publishes window
//! requests on the status stream, [`exec`] runs configured commands.

pub mod exec;
pub mod stream;

use crate::config::CloseEverythingConfig;
use crate::traits::WindowControl;
use log::{debug, warn};

/// Monitor count used when the compositor cannot report one.
pub const FALLBACK_MONITOR_COUNT: usize = 1;

/// The id of window `name` on monitor `index`.
pub fn window_id(name: &str, index: usize) -> String {
    format!("{}{}", name, index)
}

/// Resolve a reported monitor count.  Unknown or zero both mean
/// [`FALLBACK_MONITOR_COUNT`].
pub fn resolve_monitor_count(reported: Option<usize>) -> usize {
    match reported {
        Some(n) if n > 0 => n,
        _ => FALLBACK_MONITOR_COUNT,
    }
}

pub fn open_on_all<W: WindowControl>(wm: &W, name: &str, monitors: usize) {
    for id in (0..monitors).map(|i| window_id(name, i)) {
        debug!("open {}", id);
        if let Err(e) = wm.open(&id) {
            warn!("failed to open {}: {}", id, e);
        }
    }
}

pub fn close_on_all<W: WindowControl>(wm: &W, name: &str, monitors: usize) {
    for id in (0..monitors).map(|i| window_id(name, i)) {
        close_quietly(wm, &id);
    }
}

pub fn toggle_on_all<W: WindowControl>(wm: &W, name: &str, monitors: usize) {
    for id in (0..monitors).map(|i| window_id(name, i)) {
        debug!("toggle {}", id);
        if let Err(e) = wm.toggle(&id) {
            warn!("failed to toggle {}: {}", id, e);
        }
    }
}

/// Close every configured overlay, per-monitor ones first.
pub fn close_everything<W: WindowControl>(
    wm: &W,
    targets: &CloseEverythingConfig,
    monitors: usize,
) {
    for i in 0..monitors {
        for name in &targets.per_monitor {
            close_quietly(wm, &window_id(name, i));
        }
    }
    for name in &targets.singletons {
        close_quietly(wm, name);
    }
}

fn close_quietly<W: WindowControl>(wm: &W, id: &str) {
    debug!("close {}", id);
    if let Err(e) = wm.close(id) {
        warn!("failed to close {}: {}", id, e);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::traits::WindowControl;
    use std::cell::RefCell;

    /// Records every call as `"<action> <id>"`.  Ids listed in `fail` error.
    #[derive(Debug, Default)]
    pub struct RecordingWindows {
        pub calls: RefCell<Vec<String>>,
        pub fail: Vec<String>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("window {0} is not open")]
    pub struct RecordingError(String);

    impl RecordingWindows {
        fn record(&self, action: &str, id: &str) -> Result<(), RecordingError> {
            self.calls.borrow_mut().push(format!("{} {}", action, id));
            if self.fail.iter().any(|f| f == id) {
                Err(RecordingError(id.to_string()))
            } else {
                Ok(())
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl WindowControl for RecordingWindows {
        type Error = RecordingError;

        fn open(&self, id: &str) -> Result<(), RecordingError> {
            self.record("open", id)
        }

        fn close(&self, id: &str) -> Result<(), RecordingError> {
            self.record("close", id)
        }

        fn toggle(&self, id: &str) -> Result<(), RecordingError> {
            self.record("toggle", id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingWindows;
    use super::*;

    #[test]
    fn window_id_concatenates() {
        assert_eq!(window_id("session", 0), "session0");
        assert_eq!(window_id("bar", 12), "bar12");
    }

    #[test]
    fn monitor_count_fallback() {
        assert_eq!(resolve_monitor_count(None), 1);
        assert_eq!(resolve_monitor_count(Some(0)), 1);
        assert_eq!(resolve_monitor_count(Some(3)), 3);
    }

    #[test]
    fn close_on_all_three_monitors() {
        let wm = RecordingWindows::default();
        close_on_all(&wm, "session", 3);
        assert_eq!(
            wm.calls(),
            vec!["close session0", "close session1", "close session2"]
        );
    }

    #[test]
    fn open_and_toggle_fan_out() {
        let wm = RecordingWindows::default();
        open_on_all(&wm, "cheatsheet", 2);
        toggle_on_all(&wm, "osk", 1);
        assert_eq!(
            wm.calls(),
            vec!["open cheatsheet0", "open cheatsheet1", "toggle osk0"]
        );
    }

    #[test]
    fn close_everything_two_monitors() {
        let wm = RecordingWindows::default();
        close_everything(&wm, &CloseEverythingConfig::default(), 2);
        let mut calls = wm.calls();
        calls.sort();
        let mut expected = vec![
            "close cheatsheet0",
            "close cheatsheet1",
            "close session0",
            "close session1",
            "close sideleft",
            "close sideright",
            "close overview",
        ];
        expected.sort();
        assert_eq!(calls, expected);
    }

    #[test]
    fn failures_do_not_stop_the_fan_out() {
        let wm = RecordingWindows {
            fail: vec!["cheatsheet0".into(), "sideleft".into()],
            ..Default::default()
        };
        close_everything(&wm, &CloseEverythingConfig::default(), 1);
        assert_eq!(wm.calls().len(), 5);
        assert_eq!(wm.calls().last().map(String::as_str), Some("close overview"));
    }
}
