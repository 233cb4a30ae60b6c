//! **barmode**: send one command to a running `barmoded`.
//!
//! Meant to be bound to keys, e.g. in `hyprland.conf`:
//!
//! ```text
//! bind = SUPER, B, exec, barmode toggle-workspace-bar
//! bind = SUPER SHIFT, B, exec, barmode toggle-bar
//! bind = SUPER, M, exec, barmode cycle-mode
//! bind = SUPER, Escape, exec, barmode close-everything
//! ```

use barmode::command::{Command, MonitorIndex};
use barmode::ipc::client::send_command;
use barmode::ipc::default_socket_path;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Control a running barmoded")]
struct Cli {
    /// Socket to send to (default: $XDG_RUNTIME_DIR/barmode.sock)
    #[arg(long)]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    subcmd: Subcmd,
}

#[derive(Subcommand, Clone)]
enum Subcmd {
    /// Flip whether the bar is shown by default
    ToggleBar,
    /// Flip the bar on the active workspace only
    ToggleWorkspaceBar,
    /// Advance the shell mode (normal, focus, nothing)
    CycleMode {
        /// Monitor index; defaults to the focused monitor
        monitor: Option<usize>,
    },
    /// Open `<NAME><i>` on every monitor
    Open { name: String },
    /// Close `<NAME><i>` on every monitor
    Close { name: String },
    /// Toggle `<NAME><i>` on every monitor
    Toggle { name: String },
    /// Close every overlay and side panel
    CloseEverything,
    /// Flip the music controls overlay
    ToggleMusic,
    /// Flip the color scheme overlay
    ToggleColorScheme,
}

impl From<Subcmd> for Command {
    fn from(subcmd: Subcmd) -> Self {
        match subcmd {
            Subcmd::ToggleBar => Command::ToggleBarDefault,
            Subcmd::ToggleWorkspaceBar => Command::ToggleBarForActiveWorkspace,
            Subcmd::CycleMode { monitor: None } => Command::CycleMode,
            Subcmd::CycleMode { monitor: Some(i) } => Command::CycleModeOn(MonitorIndex(i)),
            Subcmd::Open { name } => Command::OpenOnAll(name),
            Subcmd::Close { name } => Command::CloseOnAll(name),
            Subcmd::Toggle { name } => Command::ToggleOnAll(name),
            Subcmd::CloseEverything => Command::CloseEverything,
            Subcmd::ToggleMusic => Command::ToggleMusicControls,
            Subcmd::ToggleColorScheme => Command::ToggleColorScheme,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let path = cli.socket.unwrap_or_else(default_socket_path);
    let cmd = Command::from(cli.subcmd);
    log::debug!("sending {:?} to {}", cmd, path.display());

    if let Err(e) = send_command(&path, &cmd) {
        eprintln!("barmode: {}", e);
        std::process::exit(1);
    }
}
