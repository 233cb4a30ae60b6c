//! Core traits that decouple barmode from any specific compositor, window
//! backend or transport.
//!
//! The [`Shell`](crate::shell::Shell) only depends on these abstractions.
//! Concrete implementations live in [`hyprland`](crate::hyprland),
//! [`windows`](crate::windows) and [`ipc`](crate::ipc).

use crate::command::{Command, MonitorIndex, WorkspaceId};
use std::sync::mpsc;

/// Read-only view of the compositor's state.
///
/// Every method may fail (compositor not running, socket gone, …); callers
/// fall back to a sentinel rather than propagating the error.
pub trait Compositor {
    /// The error type produced by this compositor.
    type Error: std::error::Error + Send + 'static;

    /// The focused workspace, or `None` if the compositor reports none.
    fn active_workspace(&self) -> Result<Option<WorkspaceId>, Self::Error>;

    /// The focused monitor's 0-based index, or `None` if none is focused.
    fn active_monitor(&self) -> Result<Option<MonitorIndex>, Self::Error>;

    /// Number of attached monitors, or `None` if it cannot be determined.
    fn monitor_count(&self) -> Result<Option<usize>, Self::Error>;
}

/// Opens, closes and toggles windows by their string id.
///
/// Calls are fire-and-forget: closing a window that is already closed must
/// not be treated as a failure by the caller.
pub trait WindowControl {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    fn open(&self, window_id: &str) -> Result<(), Self::Error>;

    fn close(&self, window_id: &str) -> Result<(), Self::Error>;

    fn toggle(&self, window_id: &str) -> Result<(), Self::Error>;
}

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (the command socket, Hyprland's
/// event socket, a test harness) and forward parsed commands into the
/// provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
