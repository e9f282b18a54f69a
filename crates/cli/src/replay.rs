// Path: crates/cli/src/replay.rs

//! Event log replay.
//!
//! A log is newline-delimited JSON. Each line is a [`CoreEvent`] with an
//! optional `at_ms` field giving the time of arrival in milliseconds since
//! the start of the recording:
//!
//! ```text
//! {"at_ms": 0, "type": "status_update", "param": {"block_height": 10, "generator_block_height": 40}}
//! {"at_ms": 1000, "type": "status_update", "param": {"block_height": 20, "generator_block_height": 40}}
//! {"type": "disconnected"}
//! ```
//!
//! A line without `at_ms` is applied at the time of the previous line.

use anyhow::{anyhow, Context, Result};
use nodestat_status::{EngineSnapshot, ManualClock, StatusEngine};
use nodestat_types::app::CoreEvent;
use nodestat_types::config::StatusConfig;
use nodestat_types::error::{ErrorCode, EventDecodeError};
use serde::Deserialize;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// One line of an event log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordedEvent {
    #[serde(default)]
    pub at_ms: Option<u64>,
    #[serde(flatten)]
    pub event: CoreEvent,
}

impl RecordedEvent {
    pub fn from_line(line: &str) -> Result<Self, EventDecodeError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(EventDecodeError::Empty);
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Print a snapshot after every event instead of only the last one.
    pub every: bool,
    /// Abort on the first malformed line.
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub applied: u64,
    pub skipped: u64,
    pub last: EngineSnapshot,
}

/// Loads a `StatusConfig` from a TOML file, or the defaults when no path is
/// given.
pub fn load_config(path: Option<&Path>) -> Result<StatusConfig> {
    let Some(path) = path else {
        return Ok(StatusConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    StatusConfig::from_toml_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

/// Folds every event of `input` and writes snapshots to `out` as JSON lines.
pub fn replay<R, W>(
    config: &StatusConfig,
    input: R,
    out: &mut W,
    options: ReplayOptions,
) -> Result<ReplayOutcome>
where
    R: BufRead,
    W: Write,
{
    let clock = ManualClock::new();
    let mut engine = StatusEngine::with_clock(config, Arc::new(clock.clone()))?;
    let mut skipped = 0u64;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let recorded = match RecordedEvent::from_line(&line) {
            Ok(recorded) => recorded,
            Err(e) => {
                nodestat_telemetry::error_metrics().inc_error("event_decode", e.code());
                if options.strict {
                    return Err(anyhow!(e).context(format!("malformed event on line {line_no}")));
                }
                tracing::warn!(
                    target: "replay",
                    event = "line_skipped",
                    line = line_no,
                    code = e.code(),
                    error = %e,
                    "Skipping malformed event"
                );
                skipped += 1;
                continue;
            }
        };

        if let Some(at_ms) = recorded.at_ms {
            clock.set(Duration::from_millis(at_ms));
        }
        let snapshot = engine.apply(&recorded.event);
        if options.every {
            write_snapshot(out, &snapshot)?;
        }
    }

    let last = engine.snapshot();
    if !options.every {
        write_snapshot(out, &last)?;
    }
    tracing::info!(
        target: "replay",
        event = "replay_finished",
        applied = engine.events_applied(),
        skipped,
        "Replay finished"
    );

    Ok(ReplayOutcome {
        applied: engine.events_applied(),
        skipped,
        last,
    })
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &EngineSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out)?;
    Ok(())
}
