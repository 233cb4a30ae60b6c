//! Commands and identifiers shared by every component.
//!
//! [`Command`] is the single vocabulary the [`Shell`](crate::shell::Shell)
//! understands.  Keybind-driven actions and compositor events both travel as
//! commands, so the shell has exactly one input path.
//!
//! The client forwards raw arguments; the daemon parses shell modes
//! (e.g. "focus", "Nothing") and monitor indices (number or numeric string).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Compositor-assigned workspace id.
///
/// Hyprland uses negative ids for special workspaces, so this is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(pub i32);

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 0-based monitor index: accepts a number or a numeric string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonitorIndex(pub usize);

impl fmt::Display for MonitorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for MonitorIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = MonitorIndex;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "non-negative integer or string")
            }
            fn visit_u64<E>(self, n: u64) -> Result<MonitorIndex, E>
            where
                E: DeError,
            {
                usize::try_from(n)
                    .map(MonitorIndex)
                    .map_err(|_| DeError::custom("monitor index out of range"))
            }
            fn visit_i64<E>(self, n: i64) -> Result<MonitorIndex, E>
            where
                E: DeError,
            {
                usize::try_from(n)
                    .map(MonitorIndex)
                    .map_err(|_| DeError::custom("monitor index must be non-negative"))
            }
            fn visit_str<E>(self, s: &str) -> Result<MonitorIndex, E>
            where
                E: DeError,
            {
                let n: usize = s
                    .trim()
                    .parse()
                    .map_err(|_| DeError::custom("monitor index: expected non-negative integer"))?;
                Ok(MonitorIndex(n))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// Which bar variant a monitor renders.
///
/// The cycle order is `Normal → Focus → Nothing → Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellMode {
    #[default]
    Normal,
    Focus,
    Nothing,
}

impl ShellMode {
    /// Every mode, in cycle order.
    pub const ALL: [ShellMode; 3] = [ShellMode::Normal, ShellMode::Focus, ShellMode::Nothing];

    /// The mode that follows `self` in the cycle.
    pub fn next(self) -> Self {
        match self {
            ShellMode::Normal => ShellMode::Focus,
            ShellMode::Focus => ShellMode::Nothing,
            ShellMode::Nothing => ShellMode::Normal,
        }
    }
}

impl fmt::Display for ShellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellMode::Normal => write!(f, "normal"),
            ShellMode::Focus => write!(f, "focus"),
            ShellMode::Nothing => write!(f, "nothing"),
        }
    }
}

/// Parse a shell mode (case-insensitive, surrounding whitespace ignored).
pub fn parse_shell_mode(s: &str) -> Option<ShellMode> {
    match s.trim().to_lowercase().as_str() {
        "normal" => Some(ShellMode::Normal),
        "focus" => Some(ShellMode::Focus),
        "nothing" => Some(ShellMode::Nothing),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ShellMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_shell_mode(&s).ok_or_else(|| DeError::custom(format!("invalid shell mode: {:?}", s)))
    }
}

/// Every action the shell can perform.
///
/// Commands are produced by [`CommandSource`](crate::traits::CommandSource)
/// implementations and consumed by the [`Shell`](crate::shell::Shell).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Flip the global "bar shown by default" intent.
    ToggleBarDefault,

    /// Flip the bar for the active workspace only.  Ignored while the
    /// default is off.
    ToggleBarForActiveWorkspace,

    /// Advance the shell mode of the compositor's active monitor.
    CycleMode,

    /// Advance the shell mode of a specific monitor.
    CycleModeOn(MonitorIndex),

    /// Open `<name><i>` for every monitor index `i`.
    OpenOnAll(String),

    /// Close `<name><i>` for every monitor index `i`.
    CloseOnAll(String),

    /// Toggle `<name><i>` for every monitor index `i`.
    ToggleOnAll(String),

    /// Close every overlay and side panel, whatever their current state.
    CloseEverything,

    /// Flip the music controls overlay flag.
    ToggleMusicControls,

    /// Flip the color scheme overlay flag.
    ToggleColorScheme,

    //  Compositor events (forwarded by the Hyprland event source)

    /// The compositor's active workspace changed.
    WorkspaceChanged(WorkspaceId),

    /// A monitor was added or removed.
    MonitorsChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_mode_display() {
        assert_eq!(ShellMode::Normal.to_string(), "normal");
        assert_eq!(ShellMode::Focus.to_string(), "focus");
        assert_eq!(ShellMode::Nothing.to_string(), "nothing");
    }

    #[test]
    fn shell_mode_cycle_wraps() {
        assert_eq!(ShellMode::Normal.next(), ShellMode::Focus);
        assert_eq!(ShellMode::Focus.next(), ShellMode::Nothing);
        assert_eq!(ShellMode::Nothing.next(), ShellMode::Normal);
    }

    #[test]
    fn shell_mode_cycle_visits_each_once() {
        for start in ShellMode::ALL {
            let mut seen = vec![start];
            let mut m = start.next();
            while m != start {
                assert!(!seen.contains(&m));
                seen.push(m);
                m = m.next();
            }
            assert_eq!(seen.len(), ShellMode::ALL.len());
        }
    }

    #[test]
    fn parse_shell_mode_is_case_insensitive() {
        assert_eq!(parse_shell_mode("Focus"), Some(ShellMode::Focus));
        assert_eq!(parse_shell_mode(" NOTHING "), Some(ShellMode::Nothing));
        assert_eq!(parse_shell_mode("normal"), Some(ShellMode::Normal));
        assert_eq!(parse_shell_mode("zen"), None);
    }

    #[test]
    fn unit_commands_are_bare_strings() {
        let cmd: Command = serde_json::from_str(r#""ToggleBarDefault""#).unwrap();
        assert_eq!(cmd, Command::ToggleBarDefault);
        let cmd: Command = serde_json::from_str(r#""CloseEverything""#).unwrap();
        assert_eq!(cmd, Command::CloseEverything);
        assert_eq!(
            serde_json::to_string(&Command::CycleMode).unwrap(),
            r#""CycleMode""#
        );
    }

    #[test]
    fn window_commands_carry_the_name() {
        let cmd: Command = serde_json::from_str(r#"{"CloseOnAll":"session"}"#).unwrap();
        assert_eq!(cmd, Command::CloseOnAll("session".into()));
        let cmd: Command = serde_json::from_str(r#"{"ToggleOnAll":"cheatsheet"}"#).unwrap();
        assert_eq!(cmd, Command::ToggleOnAll("cheatsheet".into()));
    }

    #[test]
    fn cycle_mode_on_accepts_number_or_string() {
        let a: Command = serde_json::from_str(r#"{"CycleModeOn":1}"#).unwrap();
        let b: Command = serde_json::from_str(r#"{"CycleModeOn":" 1 "}"#).unwrap();
        assert_eq!(a, Command::CycleModeOn(MonitorIndex(1)));
        assert_eq!(a, b);
        assert!(serde_json::from_str::<Command>(r#"{"CycleModeOn":-1}"#).is_err());
        assert!(serde_json::from_str::<Command>(r#"{"CycleModeOn":"left"}"#).is_err());
    }

    #[test]
    fn workspace_changed_accepts_negative_ids() {
        let cmd: Command = serde_json::from_str(r#"{"WorkspaceChanged":-98}"#).unwrap();
        assert_eq!(cmd, Command::WorkspaceChanged(WorkspaceId(-98)));
    }

    #[test]
    fn shell_mode_serializes_lowercase() {
        let json = serde_json::to_string(&[ShellMode::Normal, ShellMode::Nothing]).unwrap();
        assert_eq!(json, r#"["normal","nothing"]"#);
        let modes: Vec<ShellMode> = serde_json::from_str(r#"["Focus","normal"]"#).unwrap();
        assert_eq!(modes, vec![ShellMode::Focus, ShellMode::Normal]);
    }
}
