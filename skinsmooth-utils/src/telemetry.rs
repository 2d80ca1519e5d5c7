//! Stage timing for optional performance tracing.
//!
//! A [`StageTimer`] measures a scoped pipeline stage and logs the duration under the
//! `skinsmooth::telemetry` target when it is dropped. Logging happens only when
//! telemetry is switched on via [`configure`] and the log filter admits the level.

use std::{
    borrow::Cow,
    sync::atomic::{AtomicU8, Ordering},
    time::{Duration, Instant},
};

use log::{Level, LevelFilter, log, log_enabled};

/// Log target used for every telemetry record.
pub const TELEMETRY_TARGET: &str = "skinsmooth::telemetry";

// 0 = disabled, otherwise the highest admitted level (1 = error ..= 5 = trace).
static TELEMETRY_THRESHOLD: AtomicU8 = AtomicU8::new(0);

/// RAII timer for one pipeline stage.
pub struct StageTimer {
    label: Cow<'static, str>,
    level: Level,
    start: Instant,
    active: bool,
}

impl StageTimer {
    /// Returns `true` when the timer will emit a log entry on drop.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop the timer without logging and return the elapsed time.
    pub fn finish(mut self) -> Duration {
        self.active = false;
        self.start.elapsed()
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        if self.active {
            log!(
                target: TELEMETRY_TARGET,
                self.level,
                "{} completed in {:.2?}",
                self.label,
                self.start.elapsed()
            );
        }
    }
}

/// Start a timer that logs at `level` when telemetry allows it.
pub fn timing_guard(label: impl Into<Cow<'static, str>>, level: Level) -> StageTimer {
    timing_guard_if(label, level, true)
}

/// Start a timer that additionally requires `enabled` to be set.
pub fn timing_guard_if(
    label: impl Into<Cow<'static, str>>,
    level: Level,
    enabled: bool,
) -> StageTimer {
    let active = enabled && telemetry_allows(level) && log_enabled!(target: TELEMETRY_TARGET, level);
    StageTimer {
        label: label.into(),
        level,
        start: Instant::now(),
        active,
    }
}

/// Configure global telemetry. `LevelFilter::Off` disables it regardless of `enabled`.
pub fn configure(enabled: bool, level: LevelFilter) {
    let threshold = if enabled { level as u8 } else { 0 };
    TELEMETRY_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Returns whether telemetry logging is currently enabled.
pub fn telemetry_enabled() -> bool {
    TELEMETRY_THRESHOLD.load(Ordering::Relaxed) > 0
}

/// Returns the maximum telemetry logging level.
pub fn telemetry_level() -> LevelFilter {
    match TELEMETRY_THRESHOLD.load(Ordering::Relaxed) {
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        5 => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Returns `true` when telemetry is enabled and `level` is within the threshold.
pub fn telemetry_allows(level: Level) -> bool {
    level <= telemetry_level()
}
