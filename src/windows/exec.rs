//! [`WindowControl`] that runs an external command per request.
//!
//! Each action is an argv template from [`WindowCommands`]; every `{id}` in
//! an argument is replaced with the window id, e.g.
//! `["eww", "close", "{id}"]` → `eww close session0`.
//!
//! The child is reaped on a short-lived thread so the caller never waits on
//! it.  A non-zero exit is only logged: closing an already closed window is
//! allowed to fail.

use crate::config::WindowCommands;
use crate::traits::WindowControl;
use log::debug;
use std::process::{Command, Stdio};

pub struct ExecWindowControl {
    commands: WindowCommands,
}

#[derive(Debug, thiserror::Error)]
pub enum ExecWindowError {
    #[error("empty command template")]
    EmptyTemplate,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

impl ExecWindowControl {
    pub fn new(commands: WindowCommands) -> Self {
        Self { commands }
    }

    fn run(&self, template: &[String], window_id: &str) -> Result<(), ExecWindowError> {
        let argv = expand(template, window_id);
        let (program, args) = argv.split_first().ok_or(ExecWindowError::EmptyTemplate)?;
        debug!("exec {:?}", argv);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|source| ExecWindowError::Spawn {
                program: program.clone(),
                source,
            })?;
        let label = argv.join(" ");
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => debug!("`{}` exited with {}", label, status),
            Ok(_) => {}
            Err(e) => debug!("`{}` could not be waited on: {}", label, e),
        });
        Ok(())
    }
}

/// Substitute `window_id` for every `{id}` in `template`.
pub fn expand(template: &[String], window_id: &str) -> Vec<String> {
    template
        .iter()
        .map(|arg| arg.replace("{id}", window_id))
        .collect()
}

impl WindowControl for ExecWindowControl {
    type Error = ExecWindowError;

    fn open(&self, window_id: &str) -> Result<(), ExecWindowError> {
        self.run(&self.commands.open, window_id)
    }

    fn close(&self, window_id: &str) -> Result<(), ExecWindowError> {
        self.run(&self.commands.close, window_id)
    }

    fn toggle(&self, window_id: &str) -> Result<(), ExecWindowError> {
        self.run(&self.commands.toggle, window_id)
    }
}
