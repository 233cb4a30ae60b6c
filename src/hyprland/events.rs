//! Translates Hyprland's event stream into barmode [`Command`]s.
//!
//! Hyprland writes `EVENT>>DATA\n` lines to its event socket (`socket2`) at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket2.sock`.
//! Only a few events matter here:
//!
//! | Event            | Payload             | Command                  |
//! |------------------|---------------------|--------------------------|
//! | `workspacev2`    | `<id>,<name>`       | `WorkspaceChanged(id)`   |
//! | `focusedmonv2`   | `<monitor>,<id>`    | `WorkspaceChanged(id)`   |
//! | `monitoradded`   | `<name>`            | `MonitorsChanged`        |
//! | `monitoraddedv2` | `<id>,<name>,<desc>`| `MonitorsChanged`        |
//! | `monitorremoved` | `<name>`            | `MonitorsChanged`        |
//!
//! Focusing another monitor changes the active workspace without a
//! `workspacev2` event, hence `focusedmonv2`.
//!
//! When the socket closes or cannot be reached (Hyprland restarting), the
//! source reconnects with a doubling delay and resyncs the active workspace
//! and monitors from the request socket.

use super::ipc::{socket_path, HyprlandIpc};
use crate::command::{Command, WorkspaceId};
use crate::traits::{CommandSource, Compositor};
use log::{debug, error, info, warn};
use std::io::{self, BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const RECONNECT_BASE: Duration = Duration::from_secs(1);
const RECONNECT_MAX: Duration = Duration::from_secs(30);

/// A [`CommandSource`] that follows Hyprland's event socket.
#[derive(Debug, Default)]
pub struct HyprlandEventSource;

impl HyprlandEventSource {
    pub fn new() -> Self {
        Self
    }
}

/// Error from the Hyprland event source.
#[derive(Debug, thiserror::Error)]
#[error("hyprland event error: {0}")]
pub struct HyprlandEventError(String);

/// Split a socket2 line into `(event, data)`.
fn parse_event_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(">>")
}

/// Map one event to the command it implies, if any.
fn event_to_command(event: &str, data: &str) -> Option<Command> {
    match event {
        "workspacev2" => {
            let (id, _name) = data.split_once(',')?;
            parse_workspace_id(id)
        }
        "focusedmonv2" => {
            // Monitor names never contain commas; the id is the last field.
            let (_monitor, id) = data.rsplit_once(',')?;
            parse_workspace_id(id)
        }
        "monitoradded" | "monitoraddedv2" | "monitorremoved" => Some(Command::MonitorsChanged),
        _ => None,
    }
}

fn parse_workspace_id(s: &str) -> Option<Command> {
    match s.trim().parse::<i32>() {
        Ok(id) => Some(Command::WorkspaceChanged(WorkspaceId(id))),
        Err(_) => {
            warn!("ignoring non-numeric workspace id {:?}", s);
            None
        }
    }
}

/// Forward every relevant event read from `reader` into `sink`.
///
/// Returns `Ok(true)` when the stream ended and `Ok(false)` when the sink
/// was closed.
fn pump<R: BufRead>(reader: R, sink: &mpsc::Sender<Command>) -> Result<bool, HyprlandEventError> {
    for line in reader.lines() {
        let line = line.map_err(|e| HyprlandEventError(format!("read error: {}", e)))?;
        let Some((event, data)) = parse_event_line(&line) else {
            continue;
        };
        if let Some(cmd) = event_to_command(event, data) {
            debug!("{} -> {:?}", event, cmd);
            if sink.send(cmd).is_err() {
                info!("sink closed, shutting down");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Delay between reconnect attempts: starts at `base`, doubles after each
/// failure up to `max`, and drops back to `base` once connected.
#[derive(Debug, Clone)]
struct Backoff {
    base: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            current: base,
        }
    }

    /// The delay to wait now; the following one is doubled.
    fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    fn reset(&mut self) {
        self.current = self.base;
    }
}

/// Keep `sink` fed across connections until it closes.
///
/// `connect` opens a fresh event stream, `resync` yields the commands that
/// catch the shell up after a reconnect (events sent while disconnected are
/// lost), and `sleep` waits out the backoff.
fn follow<R, C, S, W>(
    mut connect: C,
    mut resync: S,
    mut sleep: W,
    sink: &mpsc::Sender<Command>,
    backoff: &mut Backoff,
) where
    R: BufRead,
    C: FnMut() -> io::Result<R>,
    S: FnMut() -> Vec<Command>,
    W: FnMut(Duration),
{
    let mut connected_before = false;
    loop {
        let reader = match connect() {
            Ok(reader) => reader,
            Err(e) => {
                let delay = backoff.next_delay();
                warn!("socket2 unavailable ({}), retrying in {:?}", e, delay);
                sleep(delay);
                continue;
            }
        };
        backoff.reset();

        if connected_before {
            info!("reconnected to socket2");
            for cmd in resync() {
                if sink.send(cmd).is_err() {
                    info!("sink closed, shutting down");
                    return;
                }
            }
        }
        connected_before = true;

        match pump(reader, sink) {
            Ok(false) => return,
            Ok(true) => warn!("socket2 stream ended"),
            Err(e) => error!("{}", e),
        }
        let delay = backoff.next_delay();
        debug!("reconnecting in {:?}", delay);
        sleep(delay);
    }
}

/// Commands that bring the shell back in line with a restarted Hyprland.
fn resync_from(ipc: &HyprlandIpc) -> Vec<Command> {
    let mut cmds = vec![Command::MonitorsChanged];
    match ipc.active_workspace() {
        Ok(Some(ws)) => cmds.push(Command::WorkspaceChanged(ws)),
        Ok(None) => {}
        Err(e) => warn!("resync: failed to query active workspace: {}", e),
    }
    cmds
}

impl CommandSource for HyprlandEventSource {
    type Error = HyprlandEventError;

    /// Follow socket2, reconnecting whenever it closes, until the sink is
    /// dropped.  Fails only when the socket path cannot be determined.
    ///
    /// This method **blocks**.  Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        let path = socket_path(".socket2.sock").map_err(HyprlandEventError)?;
        info!("following hyprland events on {}", path.display());

        let ipc = HyprlandIpc::new();
        let mut backoff = Backoff::new(RECONNECT_BASE, RECONNECT_MAX);
        follow(
            || UnixStream::connect(&path).map(BufReader::new),
            || resync_from(&ipc),
            thread::sleep,
            &sink,
            &mut backoff,
        );
        Ok(())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;

    #[test]
    fn parse_event_line_splits_on_first_marker() {
        assert_eq!(parse_event_line("workspacev2>>2,2"), Some(("workspacev2", "2,2")));
        assert_eq!(parse_event_line("activewindow>>kitty,a>>b"), Some(("activewindow", "kitty,a>>b")));
        assert_eq!(parse_event_line("garbage"), None);
    }

    #[test]
    fn workspacev2_becomes_workspace_changed() {
        assert_eq!(
            event_to_command("workspacev2", "4,web"),
            Some(Command::WorkspaceChanged(WorkspaceId(4)))
        );
    }

    #[test]
    fn focusedmonv2_uses_trailing_id() {
        assert_eq!(
            event_to_command("focusedmonv2", "HDMI-A-1,7"),
            Some(Command::WorkspaceChanged(WorkspaceId(7)))
        );
    }

    #[test]
    fn monitor_hotplug_events() {
        for ev in ["monitoradded", "monitoraddedv2", "monitorremoved"] {
            assert_eq!(event_to_command(ev, "DP-2"), Some(Command::MonitorsChanged));
        }
    }

    #[test]
    fn other_events_are_ignored() {
        assert_eq!(event_to_command("workspace", "3"), None);
        assert_eq!(event_to_command("activewindow", "kitty,~"), None);
        assert_eq!(event_to_command("workspacev2", "abc,abc"), None);
        assert_eq!(event_to_command("workspacev2", "3"), None);
    }

    #[test]
    fn pump_forwards_relevant_events_in_order() {
        let input = "workspace>>2\nworkspacev2>>2,2\n\nactivewindow>>kitty,~\nfocusedmonv2>>DP-1,1\nmonitorremoved>>DP-2\n";
        let (tx, rx) = mpsc::channel();
        assert!(pump(Cursor::new(input), &tx).unwrap());
        let cmds: Vec<Command> = rx.try_iter().collect();
        assert_eq!(
            cmds,
            vec![
                Command::WorkspaceChanged(WorkspaceId(2)),
                Command::WorkspaceChanged(WorkspaceId(1)),
                Command::MonitorsChanged,
            ]
        );
    }

    #[test]
    fn pump_stops_when_sink_closes() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        assert!(!pump(Cursor::new("workspacev2>>1,1\n"), &tx).unwrap());
    }

    #[test]
    fn backoff_doubles_up_to_max_and_resets() {
        let mut b = Backoff::new(Duration::from_secs(1), Duration::from_secs(5));
        let delays: Vec<u64> = (0..5).map(|_| b.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 5, 5]);
        b.reset();
        assert_eq!(b.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn reconnects_after_stream_ends_and_resyncs() {
        let (tx, rx) = mpsc::channel();
        let rx = RefCell::new(Some(rx));
        let received = RefCell::new(Vec::new());
        let mut sleeps = Vec::new();
        let mut attempt = 0;
        let mut backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(30));

        follow(
            || {
                attempt += 1;
                match attempt {
                    1 => Ok(Cursor::new("workspacev2>>2,2\n")),
                    2 => Err(io::Error::new(io::ErrorKind::ConnectionRefused, "restarting")),
                    3 => Ok(Cursor::new("workspacev2>>5,5\n")),
                    _ => {
                        // Hang up so the next send ends the run.
                        if let Some(rx) = rx.borrow_mut().take() {
                            received.borrow_mut().extend(rx.try_iter());
                        }
                        Ok(Cursor::new("workspacev2>>9,9\n"))
                    }
                }
            },
            || vec![Command::MonitorsChanged, Command::WorkspaceChanged(WorkspaceId(5))],
            |d| sleeps.push(d),
            &tx,
            &mut backoff,
        );

        assert_eq!(
            *received.borrow(),
            vec![
                Command::WorkspaceChanged(WorkspaceId(2)),
                Command::MonitorsChanged,
                Command::WorkspaceChanged(WorkspaceId(5)),
                Command::WorkspaceChanged(WorkspaceId(5)),
            ]
        );
        // The successful third connect resets the delay.
        assert_eq!(
            sleeps,
            vec![Duration::from_secs(1), Duration::from_secs(2), Duration::from_secs(1)]
        );
    }

    #[test]
    fn follow_returns_without_waiting_once_sink_closes() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sleeps = Vec::new();
        let mut backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(30));
        follow(
            || Ok(Cursor::new("workspacev2>>1,1\n")),
            Vec::new,
            |d| sleeps.push(d),
            &tx,
            &mut backoff,
        );
        assert!(sleeps.is_empty());
    }
}
