//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON-encoded [`Command`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! "ToggleBarForActiveWorkspace"
//! {"CycleModeOn":1}
//! {"CloseOnAll":"session"}
//! "CloseEverything"
//! ```

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`CommandSource`] that listens on a Unix stream socket for
/// JSON-encoded commands.
///
/// Connections are served one after another; each may send any number of
/// newline-delimited commands.  Malformed lines are logged and skipped.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// Create a listener for `path`.  Nothing is bound until
    /// [`run`](CommandSource::run).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outcome of draining one client connection.
#[derive(Debug, PartialEq, Eq)]
enum Drained {
    ClientDone,
    SinkClosed,
}

/// Parse each non-blank line of `reader` as a [`Command`] and send it.
fn forward_lines<R: BufRead>(reader: R, sink: &mpsc::Sender<Command>) -> Drained {
    for line in reader.lines() {
        let text = match line {
            Ok(text) => text,
            Err(e) => {
                error!("read error: {}", e);
                break;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Command>(&text) {
            Ok(cmd) => {
                debug!("received {:?}", cmd);
                if sink.send(cmd).is_err() {
                    return Drained::SinkClosed;
                }
            }
            Err(e) => error!("bad command {:?}: {}", text, e),
        }
    }
    Drained::ClientDone
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and serve clients until the sink is dropped.
    ///
    /// This method **blocks**.  Run it on a dedicated thread.  A stale
    /// socket file from a previous run is replaced; the file is removed again
    /// when the sink closes.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        let _ = std::fs::remove_file(&self.path);
        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!("accept error: {}", e);
                    continue;
                }
            };
            if forward_lines(BufReader::new(stream), &sink) == Drained::SinkClosed {
                info!("sink closed, shutting down");
                let _ = std::fs::remove_file(&self.path);
                return Ok(());
            }
        }
        Ok(())
    }
}

//  Tests
