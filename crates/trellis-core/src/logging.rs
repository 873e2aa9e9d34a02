//! Tracing subscriber setup for test binaries.
//!
//! Trellis logs through `tracing`: one `info_span!` per performed action or
//! checked assertion, `debug!` events with timings, and `warn!` for
//! configuration mistakes. Test suites opt into output by calling [`init`]
//! (stderr), [`init_file`] or [`init_json`] once; repeated calls are ignored.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `trellis=debug`.
pub const LOG_ENV: &str = "TRELLIS_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr using the test writer, so output is captured per test.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_test_writer()
        .try_init();
}

/// Log to `<dir>/trellis.log` without ANSI colours.
pub fn init_file(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::never(dir, "trellis.log");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Log to `<dir>/trellis.jsonl`, one JSON object per event, for CI tooling.
pub fn init_json(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::never(dir, "trellis.jsonl");
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter())
        .with_writer(file_appender)
        .try_init();
    Ok(())
}
