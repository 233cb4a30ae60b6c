//! Entry point for the **barmoded** daemon.
//!
//! Spawns the command socket and the Hyprland event source on background
//! threads, processes their commands on the main thread, and writes the
//! resulting status stream to stdout.

use barmode::command::Command;
use barmode::config::Config;
use barmode::hyprland::events::HyprlandEventSource;
use barmode::hyprland::ipc::HyprlandIpc;
use barmode::ipc::default_socket_path;
use barmode::ipc::listener::UnixSocketListener;
use barmode::shell::Shell;
use barmode::status::{self, StatusEvent};
use barmode::traits::{CommandSource, WindowControl};
use barmode::windows::exec::ExecWindowControl;
use barmode::windows::stream::StatusWindowControl;
use log::{error, info};
use std::sync::mpsc;

/// Resolve the config directory (`$XDG_CONFIG_HOME/barmode`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("barmode")
}

/// Load `config.json`, falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no usable config ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();

    let (status_tx, status_rx) = mpsc::channel::<StatusEvent>();
    let writer = std::thread::spawn(move || status::write_events(status_rx, std::io::stdout()));

    match config.window_commands.clone() {
        Some(cmds) => {
            info!("managing windows with external commands");
            run(ExecWindowControl::new(cmds), &config, status_tx);
        }
        None => {
            info!("publishing window requests on the status stream");
            let windows = StatusWindowControl::new(status_tx.clone());
            run(windows, &config, status_tx);
        }
    }

    let _ = writer.join();
}

/// Build the shell and process commands until every source is gone.
fn run<W: WindowControl>(windows: W, config: &Config, status_tx: mpsc::Sender<StatusEvent>) {
    let mut shell = Shell::new(HyprlandIpc::new(), windows, config);
    shell.attach_status(status_tx);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx);

    info!("barmoded running");
    for cmd in cmd_rx {
        shell.handle(cmd);
    }
    info!("all command sources closed, exiting");
}

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    {
        let tx = tx.clone();
        let path = default_socket_path();
        std::thread::spawn(move || {
            let mut source = UnixSocketListener::new(&path);
            if let Err(e) = source.run(tx) {
                error!("socket listener error: {}", e);
            }
        });
    }

    std::thread::spawn(move || {
        let mut source = HyprlandEventSource::new();
        if let Err(e) = source.run(tx) {
            error!("hyprland event source error: {}", e);
        }
    });
}
