// ============================================================
// Timer — Stopwatch
// ============================================================
// Measures how long a long-running task (usually a fit call)
// takes. Prints the wall-clock start time on start(), then the
// end time and elapsed duration on stop():
//
//   Start Time: Wed Jan 31 15:45:02 2024
//   End Time:   Wed Jan 31 15:52:40 2024
//   Elapsed seconds: 458.1207 (7.64 minutes)
//
// Each start() arms the stopwatch for exactly one stop(). A stop()
// without a matching start() is caller misuse and fails with
// PtmError::InvalidState.
//
// Unless silenced, stop() then plays a completion sound. Audio
// problems are logged and never turn into an error.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::error::{PtmError, Result};
use crate::infra::clock::display_time;
use crate::timer::alert::{AlertChain, AlertSounds};

/// Where the stopwatch looks for sound files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwatchConfig {
    /// Directory that relative sound paths are resolved against
    pub media_dir: PathBuf,
    /// Sound used when the caller does not pass one, relative to
    /// `media_dir` unless absolute
    pub default_sound: PathBuf,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            media_dir:     PathBuf::from("media"),
            default_sound: PathBuf::from(AlertSounds::BEE5),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Started {
    instant: Instant,
    at:      DateTime<Local>,
}

pub struct Stopwatch {
    config:  StopwatchConfig,
    alerts:  AlertChain,
    started: Option<Started>,
}

impl Stopwatch {
    /// Stopwatch with default media paths and the platform alert chain
    pub fn new() -> Self {
        Self::with_config(StopwatchConfig::default())
    }

    pub fn with_config(config: StopwatchConfig) -> Self {
        Self { config, alerts: AlertChain::platform_default(), started: None }
    }

    /// Replace the alert chain (e.g. `AlertChain::empty()` for CI)
    pub fn with_alerts(mut self, alerts: AlertChain) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Start timing and print the start time
    pub fn start(&mut self) {
        let at = Local::now();
        println!("Start Time: {}", display_time(&at));
        self.started = Some(Started { instant: Instant::now(), at });
    }

    /// Stop timing, print end time and elapsed duration, and play
    /// the completion sound unless `silent`.
    ///
    /// `sound` overrides the configured default sound file.
    pub fn stop(&mut self, silent: bool, sound: Option<&Path>) -> Result<Duration> {
        // take() also resets, so the next stop() needs a new start()
        let started = self.started.take().ok_or_else(|| {
            PtmError::InvalidState(
                "start time must be set by calling start() before stop()".to_string(),
            )
        })?;

        let elapsed = started.instant.elapsed();
        println!("End Time:   {}", display_time(&Local::now()));
        println!("{}", elapsed_line(elapsed));

        tracing::debug!(
            "Stopwatch started {} ran for {:?}",
            display_time(&started.at),
            elapsed
        );

        if !silent {
            let sound = self.resolve_sound(sound);
            if let Err(e) = self.alerts.play(sound.as_deref()) {
                tracing::warn!("Stopwatch alert failed: {e:#}");
            }
        }

        Ok(elapsed)
    }

    /// Pick the sound file to play:
    ///   1. the requested path, if it exists as given
    ///   2. the requested path under the media directory
    ///   3. the default sound under the media directory
    ///   4. nothing (only file-less players can run)
    pub fn resolve_sound(&self, requested: Option<&Path>) -> Option<PathBuf> {
        let requested = requested.unwrap_or(self.config.default_sound.as_path());

        if requested.exists() {
            return Some(requested.to_path_buf());
        }

        let relative = self.config.media_dir.join(requested);
        if relative.exists() {
            return Some(relative);
        }

        let fallback = self.config.media_dir.join(&self.config.default_sound);
        if fallback.exists() {
            return Some(fallback);
        }

        tracing::debug!("No sound file found for '{}'", requested.display());
        None
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// `Elapsed seconds: 12.3456 (0.21 minutes)`
pub fn elapsed_line(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    format!("Elapsed seconds: {:.4} ({:.2} minutes)", secs, secs / 60.0)
}
