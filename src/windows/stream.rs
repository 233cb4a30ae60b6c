//! [`WindowControl`] that publishes requests on the status stream.
//!
//! The renderer reading the stream owns the actual windows and applies
//! `{"Window":{"action":"toggle","id":"cheatsheet0"}}` itself.

use crate::status::{StatusEvent, WindowAction};
use crate::traits::WindowControl;
use std::sync::mpsc;

pub struct StatusWindowControl {
    tx: mpsc::Sender<StatusEvent>,
}

/// The status stream has no reader left.
#[derive(Debug, thiserror::Error)]
#[error("status stream closed")]
pub struct StreamClosed;

impl StatusWindowControl {
    pub fn new(tx: mpsc::Sender<StatusEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, action: WindowAction, id: &str) -> Result<(), StreamClosed> {
        self.tx
            .send(StatusEvent::Window {
                action,
                id: id.to_string(),
            })
            .map_err(|_| StreamClosed)
    }
}

impl WindowControl for StatusWindowControl {
    type Error = StreamClosed;

    fn open(&self, window_id: &str) -> Result<(), StreamClosed> {
        self.send(WindowAction::Open, window_id)
    }

    fn close(&self, window_id: &str) -> Result<(), StreamClosed> {
        self.send(WindowAction::Close, window_id)
    }

    fn toggle(&self, window_id: &str) -> Result<(), StreamClosed> {
        self.send(WindowAction::Toggle, window_id)
    }
}
