//! Tracing setup with a switchable output.
//!
//! Log lines go to stderr until the terminal UI takes over the screen, then
//! to `lifecal.log` in the settings directory (or nowhere, if that file could
//! not be created) so they never draw over the alternate screen. The switch
//! happens on the fly; there is a single global subscriber.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::constants::LOG_FILE_NAME;

#[derive(Debug)]
struct Inner {
    file: Option<NonBlocking>,
    to_file: AtomicBool,
}

/// Cloneable handle deciding where log lines are written.
#[derive(Debug, Clone)]
pub struct LogRouter(Arc<Inner>);

impl LogRouter {
    /// Creates a router writing to stderr, with `file` as the TUI-time target.
    #[must_use]
    pub fn new(file: Option<NonBlocking>) -> Self {
        Self(Arc::new(Inner {
            file,
            to_file: AtomicBool::new(false),
        }))
    }

    /// Sends subsequent log lines to the log file.
    pub fn route_to_file(&self) {
        self.0.to_file.store(true, Ordering::SeqCst);
    }

    /// Sends subsequent log lines to stderr.
    pub fn route_to_stderr(&self) {
        self.0.to_file.store(false, Ordering::SeqCst);
    }

    /// Returns true while log lines go to the file side.
    #[must_use]
    pub fn is_routed_to_file(&self) -> bool {
        self.0.to_file.load(Ordering::SeqCst)
    }
}

/// Writer handed out per log line.
pub enum RoutedWriter {
    /// Terminal stderr
    Stderr(io::Stderr),
    /// Background log file writer
    File(NonBlocking),
    /// Discards everything
    Sink(io::Sink),
}

impl Write for RoutedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(w) => w.write(buf),
            Self::File(w) => w.write(buf),
            Self::Sink(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(w) => w.flush(),
            Self::File(w) => w.flush(),
            Self::Sink(w) => w.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogRouter {
    type Writer = RoutedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        if !self.is_routed_to_file() {
            return RoutedWriter::Stderr(io::stderr());
        }

        match &self.0.file {
            Some(file) => RoutedWriter::File(file.clone()),
            None => RoutedWriter::Sink(io::sink()),
        }
    }
}

/// Keeps the background log writer alive; dropping it flushes the file.
#[derive(Debug)]
pub struct LoggingGuards {
    _file_guard: Option<WorkerGuard>,
}

/// Opens `dir/lifecal.log` for appending behind a background writer thread.
pub fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Installs the global tracing subscriber and returns its router.
///
/// `RUST_LOG` overrides the level; otherwise `info`, or `debug` when
/// `verbose` is set. The returned guards must live until the program ends.
pub fn init(verbose: bool) -> (LogRouter, LoggingGuards) {
    let mut warn_msg = None;
    let (file, file_guard) = match Config::config_dir().and_then(|dir| file_writer(&dir)) {
        Ok((file, guard)) => (Some(file), Some(guard)),
        Err(e) => {
            warn_msg = Some(format!("File logging disabled: {e:#}"));
            (None, None)
        }
    };

    let router = LogRouter::new(file);

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(router.clone())
                .with_ansi(false),
        )
        .init();

    if let Some(message) = warn_msg {
        tracing::warn!("{message}");
    }

    (
        router,
        LoggingGuards {
            _file_guard: file_guard,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_router_starts_on_stderr() {
        let router = LogRouter::new(None);
        assert!(!router.is_routed_to_file());
        assert!(matches!(router.make_writer(), RoutedWriter::Stderr(_)));
    }

    #[test]
    fn test_router_without_file_discards() {
        let router = LogRouter::new(None);
        router.route_to_file();
        let mut writer = router.make_writer();
        assert!(matches!(writer, RoutedWriter::Sink(_)));
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
    }

    #[test]
    fn test_router_writes_to_file_and_back() {
        let temp = TempDir::new().unwrap();
        let (file, guard) = file_writer(temp.path()).unwrap();
        let router = LogRouter::new(Some(file));

        router.route_to_file();
        router.make_writer().write_all(b"hello log\n").unwrap();
        router.route_to_stderr();
        assert!(!router.is_routed_to_file());
        assert!(matches!(router.make_writer(), RoutedWriter::Stderr(_)));

        // Dropping the guard flushes the background writer
        drop(router);
        drop(guard);

        let content = fs::read_to_string(temp.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(content, "hello log\n");
    }

    #[test]
    fn test_file_writer_appends() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LOG_FILE_NAME), "earlier\n").unwrap();

        let (mut file, guard) = file_writer(temp.path()).unwrap();
        file.write_all(b"later\n").unwrap();
        drop(file);
        drop(guard);

        let content = fs::read_to_string(temp.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(content, "earlier\nlater\n");
    }
}
