use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Directory the per-day log files are written to
const LOG_DIR: &str = "logs";

static CONTEXT: OnceLock<LogContext> = OnceLock::new();

/// Handle to the process-wide append-only log sink, created once at startup
/// and shared by reference. Exposes the file's location and contents for the
/// interactive log panel.
#[derive(Debug, Clone)]
pub struct LogContext {
    path: PathBuf,
}

impl LogContext {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Current size of the log file in bytes
    pub fn size(&self) -> Result<u64> {
        Ok(fs_err::metadata(&self.path)?.len())
    }

    /// Most recent `count` lines of the log file
    pub fn tail(&self, count: usize) -> Result<String> {
        let content = fs_err::read_to_string(&self.path)?;
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(count);
        Ok(lines[start..].join("\n"))
    }
}

/// Initialize tracing with two sinks: an append-only per-day file capturing
/// everything down to DEBUG with source locations, and a lower-verbosity
/// console stream (INFO, or DEBUG when `verbose` is set). Repeated calls
/// return the existing context instead of registering duplicate subscribers.
pub fn init(verbose: bool) -> Result<&'static LogContext> {
    if let Some(context) = CONTEXT.get() {
        return Ok(context);
    }

    fs_err::create_dir_all(LOG_DIR).context("Failed to create log directory")?;

    let path = PathBuf::from(LOG_DIR).join(format!(
        "pronunciation_app_{}.log",
        chrono::Local::now().format("%Y%m%d")
    ));

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::DEBUG);

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(console_level);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pronunciation_converter=debug,pronounce=debug".into()),
        )
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(CONTEXT.get_or_init(|| LogContext { path }))
}
