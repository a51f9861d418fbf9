//! Process-wide log setup.
//!
//! Records whose target starts with `boardscan` pass at the requested level.
//! Everything else (image decoders, `imageproc`) is capped at `warn` so that
//! `--log-level debug` shows pipeline stages without third-party chatter.
//!
//! [`init_with_level`] installs a stderr backend for the `log` facade. With
//! the `tracing` feature, [`init_tracing`] installs a `tracing-subscriber`
//! that applies the same split unless `RUST_LOG` overrides it.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_PREFIX: &str = "boardscan";
const FOREIGN_CAP: LevelFilter = LevelFilter::Warn;

fn is_own_target(target: &str) -> bool {
    target.starts_with(OWN_PREFIX)
}

/// `boardscan_grid::detector` is printed as `grid::detector`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("boardscan_")
        .or_else(|| target.strip_prefix("boardscan::"))
        .unwrap_or(target)
}

/// Filter string equivalent to the stderr logger's per-target threshold,
/// e.g. `"warn,boardscan=debug"`.
pub fn filter_directives(level: LevelFilter) -> String {
    let foreign = level.min(FOREIGN_CAP);
    format!(
        "{},{OWN_PREFIX}={}",
        foreign.to_string().to_lowercase(),
        level.to_string().to_lowercase()
    )
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    fn threshold(&self, target: &str) -> LevelFilter {
        if is_own_target(target) {
            self.level
        } else {
            self.level.min(FOREIGN_CAP)
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.threshold(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{elapsed:>8.3}s {:<5} {}: {}",
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger. Only the first call takes effect.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber.
///
/// `RUST_LOG`, when set and valid, wins; otherwise the filter is
/// [`filter_directives`]`(level)`. Span close events are reported so the
/// instrumented pipeline stages show their durations.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
