//! File logging. The terminal belongs to the TUI, so nothing is written to
//! stdout or stderr.

use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_FILE_NAME: &str = "resfeber.log";

/// Installs a non-blocking file subscriber writing to `log_dir/resfeber.log`.
///
/// The returned guard flushes pending lines on drop and must be held for the
/// life of the program.
#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn init(log_dir: &Path, level: LevelFilter) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::default()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    guard
}
