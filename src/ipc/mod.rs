//! The command socket.
//!
//! Keybind helpers connect to the socket and send newline-delimited JSON
//! [`Command`](crate::command::Command)s; [`client`] is the sending half
//! used by the `barmode` binary.

pub mod client;
pub mod listener;

use std::path::PathBuf;

/// Default socket path: `$XDG_RUNTIME_DIR/barmode.sock`, or `/tmp` when the
/// runtime dir is unset.
pub fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("barmode.sock")
}
