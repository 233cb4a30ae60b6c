//! **barmode**: bar visibility and shell mode state for a Hyprland desktop.
//!
//! The daemon owns a handful of flags that a bar renderer draws from:
//! whether the bar is shown (globally, with per-workspace overrides), which
//! UI variant each monitor shows (`normal`, `focus`, `nothing`), and two
//! overlay toggles.  Keybinds change them through a Unix socket; Hyprland's
//! event stream keeps them in step with the active workspace.
//!
//! # Architecture
//!
//! All state lives in [`shell::Shell`], driven by [`command::Command`]s on
//! one thread.  It talks to the outside through three traits:
//!
//! * [`traits::Compositor`] answers "which workspace / monitor is active,
//!   how many monitors are there".
//! * [`traits::WindowControl`] opens, closes and toggles windows by id.
//! * [`traits::CommandSource`] delivers commands from a transport.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC),
//! [`windows`] (status-stream and exec backends) and [`ipc`] (command
//! socket).  State changes leave the daemon as [`status::StatusEvent`]s.

pub mod command;
pub mod config;
pub mod hyprland;
pub mod ipc;
pub mod mode;
pub mod overrides;
pub mod shell;
pub mod status;
pub mod traits;
pub mod variable;
pub mod visibility;
pub mod windows;
