//! The outward state stream.
//!
//! Renderers (an eww `deflisten`, a waybar custom module, a GTK bar) read
//! one JSON-encoded [`StatusEvent`] per line from the daemon's stdout.
//!
//! ```json
//! {"Snapshot":{"show_bar":true,"show_bar_default":true,"modes":["normal"],"show_music_controls":false,"show_color_scheme":false,"battery_low":20}}
//! {"ShowBar":false}
//! {"Modes":["focus"]}
//! {"Flag":{"name":"music_controls","value":true}}
//! {"Window":{"action":"close","id":"session0"}}
//! ```

use crate::command::ShellMode;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::mpsc;

/// Full state, sent once when a stream is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub show_bar: bool,
    pub show_bar_default: bool,
    pub modes: Vec<ShellMode>,
    pub show_music_controls: bool,
    pub show_color_scheme: bool,
    /// Battery percentage at or below which the focus bar is styled as low.
    pub battery_low: u8,
}

/// Named overlay flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    MusicControls,
    ColorScheme,
}

/// What a window backend was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowAction {
    Open,
    Close,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEvent {
    Snapshot(Snapshot),
    ShowBar(bool),
    ShowBarDefault(bool),
    Modes(Vec<ShellMode>),
    Flag { name: FlagName, value: bool },
    Window { action: WindowAction, id: String },
}

/// Write every event from `rx` to `out` as a JSON line.
///
/// Returns when every sender has been dropped or `out` fails.
pub fn write_events<W: Write>(rx: mpsc::Receiver<StatusEvent>, mut out: W) {
    for event in rx {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                error!("failed to encode {:?}: {}", event, e);
                continue;
            }
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            error!("status stream closed: {}", e);
            return;
        }
    }
    info!("status stream finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_written_one_per_line() {
        let (tx, rx) = mpsc::channel();
        tx.send(StatusEvent::ShowBar(false)).unwrap();
        tx.send(StatusEvent::Flag {
            name: FlagName::MusicControls,
            value: true,
        })
        .unwrap();
        tx.send(StatusEvent::Window {
            action: WindowAction::Close,
            id: "session0".into(),
        })
        .unwrap();
        drop(tx);

        let mut buf = Vec::new();
        write_events(rx, &mut buf);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"ShowBar":false}"#,
                r#"{"Flag":{"name":"music_controls","value":true}}"#,
                r#"{"Window":{"action":"close","id":"session0"}}"#,
            ]
        );
    }

    #[test]
    fn snapshot_encodes_modes_lowercase() {
        let event = StatusEvent::Snapshot(Snapshot {
            show_bar: true,
            show_bar_default: true,
            modes: vec![ShellMode::Focus],
            show_music_controls: false,
            show_color_scheme: false,
            battery_low: 20,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""modes":["focus"]"#));
        let back: StatusEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
