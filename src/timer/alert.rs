// ============================================================
// Timer — Completion Alerts
// ============================================================
// Plays a short sound when a stopwatch stops. Several players
// are tried in order until one succeeds:
//
//   macOS    → afplay <file>
//   Linux    → paplay <file>, ffplay <file>, aplay <file>
//   Windows  → PowerShell Media.SoundPlayer <file>
//   anywhere → terminal bell (BEL on stdout)
//
// The chain is picked once at construction from the target OS.
// The stopwatch swallows whatever error the chain returns.

use anyhow::{bail, Context};
use std::{
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

use crate::domain::traits::AlertPlayer;

/// Sound files shipped in the media directory, relative to it
pub struct AlertSounds;

impl AlertSounds {
    pub const BEE5: &'static str = "bee5.mp3";
    pub const DORE: &'static str = "dore.mp3";
}

// ─── CommandPlayer ────────────────────────────────────────────────────────────
/// Plays a sound file by running an external program with the
/// file path as its last argument.
pub struct CommandPlayer {
    program: String,
    args:    Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args:    args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl AlertPlayer for CommandPlayer {
    fn name(&self) -> &str {
        &self.program
    }

    fn play(&self, sound: Option<&Path>) -> anyhow::Result<()> {
        let Some(sound) = sound else {
            bail!("{} needs a sound file", self.program);
        };

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(sound)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("cannot run '{}'", self.program))?;

        if !status.success() {
            bail!("'{}' exited with {}", self.program, status);
        }
        Ok(())
    }
}

// ─── PowerShellPlayer ─────────────────────────────────────────────────────────
/// Windows player: Media.SoundPlayer via PowerShell (WAV files only).
pub struct PowerShellPlayer;

impl AlertPlayer for PowerShellPlayer {
    fn name(&self) -> &str {
        "powershell"
    }

    fn play(&self, sound: Option<&Path>) -> anyhow::Result<()> {
        let Some(sound) = sound else {
            bail!("powershell player needs a sound file");
        };

        let script = format!(
            "(New-Object Media.SoundPlayer '{}').PlaySync()",
            sound.display().to_string().replace('\'', "''")
        );
        let status = Command::new("powershell")
            .args(["-NoProfile", "-Command", &script])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .context("cannot run powershell")?;

        if !status.success() {
            bail!("powershell exited with {status}");
        }
        Ok(())
    }
}

// ─── TerminalBell ─────────────────────────────────────────────────────────────
/// Last resort: ring the terminal bell. Ignores the sound file.
pub struct TerminalBell;

impl AlertPlayer for TerminalBell {
    fn name(&self) -> &str {
        "terminal-bell"
    }

    fn play(&self, _sound: Option<&Path>) -> anyhow::Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

// ─── AlertChain ───────────────────────────────────────────────────────────────
/// Ordered list of players; `play` stops at the first success.
pub struct AlertChain {
    players: Vec<Box<dyn AlertPlayer>>,
}

impl AlertChain {
    pub fn new(players: Vec<Box<dyn AlertPlayer>>) -> Self {
        Self { players }
    }

    /// A chain that never makes a sound
    pub fn empty() -> Self {
        Self { players: Vec::new() }
    }

    /// Players available on the current OS, bell last
    pub fn platform_default() -> Self {
        let mut players: Vec<Box<dyn AlertPlayer>> = Vec::new();

        if cfg!(target_os = "macos") {
            players.push(Box::new(CommandPlayer::new("afplay", &[])));
        } else if cfg!(target_os = "windows") {
            players.push(Box::new(PowerShellPlayer));
        } else {
            players.push(Box::new(CommandPlayer::new("paplay", &[])));
            players.push(Box::new(CommandPlayer::new(
                "ffplay",
                &["-nodisp", "-autoexit", "-loglevel", "quiet"],
            )));
            players.push(Box::new(CommandPlayer::new("aplay", &["-q"])));
        }
        players.push(Box::new(TerminalBell));

        Self { players }
    }

    pub fn player_names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name()).collect()
    }

    /// Try each player in order. Returns the name of the player
    /// that succeeded, or an error naming every failure.
    pub fn play(&self, sound: Option<&Path>) -> anyhow::Result<String> {
        let mut failures = Vec::new();

        for player in &self.players {
            match player.play(sound) {
                Ok(()) => {
                    tracing::debug!("Alert played with {}", player.name());
                    return Ok(player.name().to_string());
                }
                Err(e) => failures.push(format!("{}: {e:#}", player.name())),
            }
        }

        if failures.is_empty() {
            bail!("no alert players configured");
        }
        bail!("all alert players failed ({})", failures.join("; "))
    }
}

impl Default for AlertChain {
    fn default() -> Self {
        Self::platform_default()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call; succeeds or fails as configured
    struct FakePlayer {
        name:    &'static str,
        succeed: bool,
        calls:   Rc<RefCell<Vec<&'static str>>>,
    }

    impl AlertPlayer for FakePlayer {
        fn name(&self) -> &str {
            self.name
        }

        fn play(&self, _sound: Option<&Path>) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(self.name);
            if self.succeed { Ok(()) } else { bail!("{} is broken", self.name) }
        }
    }

    fn chain(setup: &[(&'static str, bool)]) -> (AlertChain, Rc<RefCell<Vec<&'static str>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let players = setup
            .iter()
            .map(|&(name, succeed)| {
                Box::new(FakePlayer { name, succeed, calls: Rc::clone(&calls) }) as Box<dyn AlertPlayer>
            })
            .collect();
        (AlertChain::new(players), calls)
    }

    #[test]
    fn test_first_success_wins() {
        let (chain, calls) = chain(&[("a", false), ("b", true), ("c", true)]);
        assert_eq!(chain.play(None).unwrap(), "b");
        assert_eq!(*calls.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_all_failures_reported() {
        let (chain, calls) = chain(&[("a", false), ("b", false)]);
        let err = chain.play(None).unwrap_err().to_string();
        assert!(err.contains("a is broken"), "{err}");
        assert!(err.contains("b is broken"), "{err}");
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_empty_chain_is_an_error() {
        assert!(AlertChain::empty().play(None).is_err());
    }

    #[test]
    fn test_command_player_needs_a_file() {
        let player = CommandPlayer::new("afplay", &[]);
        assert!(player.play(None).is_err());
    }

    #[test]
    fn test_platform_default_ends_with_bell() {
        let chain = AlertChain::platform_default();
        assert_eq!(chain.player_names().last(), Some(&"terminal-bell"));
    }
}
