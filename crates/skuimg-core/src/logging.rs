//! Tracing setup for the CLI.
//!
//! A run normally leaves its per-row diagnostics in `skuimg.log` under the
//! XDG state directory, so a long sheet sync can be inspected afterwards.
//! When that file cannot be opened the CLI calls [`init_logging_stderr`]
//! instead and the same events go to the terminal.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "skuimg.log";

const DEFAULT_FILTER: &str = "info,skuimg_core=debug,skuimg=debug";

/// Destination for one formatted event. Stderr only when the log file
/// handle could not be duplicated for this event.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// Shares one append-mode handle across events.
struct AppendLog(File);

impl<'a> MakeWriter<'a> for AppendLog {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogSink::File(f),
            Err(_) => LogSink::Stderr,
        }
    }
}

/// `$XDG_STATE_HOME/skuimg/skuimg.log`, creating the directory.
fn log_file_path() -> Result<PathBuf> {
    let dir = xdg::BaseDirectories::with_prefix("skuimg")?.get_state_home();
    fs::create_dir_all(&dir)?;
    Ok(dir.join(LOG_FILE))
}

/// Send events to the state-dir log file, appending across runs.
///
/// Errors leave no subscriber installed, so the caller may still pick
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(AppendLog(file)))
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "logging to file");
    Ok(())
}

/// Send events to stderr.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// `RUST_LOG` wins; otherwise info globally and debug for our crates, which
/// is where the per-candidate lines live.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
