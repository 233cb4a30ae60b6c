//! [`Compositor`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation.

use crate::command::{MonitorIndex, WorkspaceId};
use crate::traits::Compositor;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed compositor view.
///
/// No connection is held; each query opens a short-lived IPC request.
#[derive(Debug, Default)]
pub struct HyprlandIpc;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandIpcError(String);

impl HyprlandIpc {
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve a Hyprland socket path (`.socket.sock` or `.socket2.sock`).
pub(crate) fn socket_path(file: &str) -> Result<PathBuf, String> {
    let runtime_dir =
        std::env::var("XDG_RUNTIME_DIR").map_err(|_| "XDG_RUNTIME_DIR not set".to_string())?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| "HYPRLAND_INSTANCE_SIGNATURE not set".to_string())?;
    Ok(PathBuf::from(runtime_dir).join("hypr").join(his).join(file))
}

/// Send a JSON data query (`j/<command>`) and return the raw response.
fn ipc_json(data_command: &str) -> Result<String, HyprlandIpcError> {
    let path = socket_path(".socket.sock").map_err(HyprlandIpcError)?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandIpcError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(format!("j/{}", data_command).as_bytes())
        .map_err(|e| HyprlandIpcError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandIpcError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandIpcError(format!("utf-8: {}", e)))
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/activeworkspace`.
#[derive(Deserialize)]
struct WorkspaceJson {
    id: i32,
}

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    #[serde(default)]
    focused: bool,
}

fn parse_active_workspace(json: &str) -> Result<Option<WorkspaceId>, HyprlandIpcError> {
    // Hyprland answers `{}` when nothing is focused yet.
    if json.trim() == "{}" {
        return Ok(None);
    }
    let ws: WorkspaceJson =
        serde_json::from_str(json).map_err(|e| HyprlandIpcError(format!("parse: {}", e)))?;
    Ok(Some(WorkspaceId(ws.id)))
}

fn parse_monitors(json: &str) -> Result<Vec<MonitorJson>, HyprlandIpcError> {
    serde_json::from_str(json).map_err(|e| HyprlandIpcError(format!("parse: {}", e)))
}

/// Index of the focused monitor in `j/monitors` order.
fn focused_index(monitors: &[MonitorJson]) -> Option<MonitorIndex> {
    monitors.iter().position(|m| m.focused).map(MonitorIndex)
}

//  Compositor implementation

impl Compositor for HyprlandIpc {
    type Error = HyprlandIpcError;

    fn active_workspace(&self) -> Result<Option<WorkspaceId>, Self::Error> {
        parse_active_workspace(&ipc_json("activeworkspace")?)
    }

    fn active_monitor(&self) -> Result<Option<MonitorIndex>, Self::Error> {
        let monitors = parse_monitors(&ipc_json("monitors")?)?;
        Ok(focused_index(&monitors))
    }

    fn monitor_count(&self) -> Result<Option<usize>, Self::Error> {
        let monitors = parse_monitors(&ipc_json("monitors")?)?;
        Ok(Some(monitors.len()))
    }
}
