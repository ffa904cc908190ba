//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs once per process for all transcript crates.
//! - Capture panics as sanitized, single-line log events.
//!
//! # Invariants
//! - Initialization is idempotent for identical settings.
//! - A second call with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, Level};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "transcript";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Level,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Parses a `log` level name (case-insensitive, surrounding whitespace
    /// ignored) and an absolute log directory.
    ///
    /// # Errors
    /// - Level other than trace|debug|info|warn|error.
    /// - Empty or relative directory.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = level.trim();
        let parsed_level = level.parse::<Level>().map_err(|_| {
            format!("unsupported log level `{level}`; expected trace|debug|info|warn|error")
        })?;

        let log_dir = PathBuf::from(log_dir.trim());
        if log_dir.as_os_str().is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        if log_dir.is_relative() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                log_dir.display()
            ));
        }

        Ok(Self {
            level: parsed_level,
            log_dir,
        })
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Initializes file logging with `level` under `log_dir`.
///
/// Returns a human-readable error string instead of panicking.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logger(&requested))?;
    ensure_same_settings(&active.settings, &requested)
}

/// Active `(level, log_dir)`, or `None` before initialization.
pub fn logging_status() -> Option<(Level, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.settings.level, active.settings.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: &LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.log_dir.display()
        )
    })?;

    let handle = Logger::with(settings.level.to_level_filter())
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=logging_init module=core status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        settings.level,
        settings.log_dir.display()
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

fn ensure_same_settings(active: &LogSettings, requested: &LogSettings) -> Result<(), String> {
    if active == requested {
        return Ok(());
    }
    Err(format!(
        "logging already initialized (level={} log_dir=`{}`); refusing to switch to level={} log_dir=`{}`",
        active.level,
        active.log_dir.display(),
        requested.level,
        requested.log_dir.display()
    ))
}

fn install_panic_hook_once() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            payload_summary(panic_info.payload(), MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

/// Panic payload as one log-safe line of at most `max_chars` characters
/// (plus a `...` marker when cut).
fn payload_summary(payload: &(dyn Any + Send), max_chars: usize) -> String {
    let text = match (payload.downcast_ref::<&str>(), payload.downcast_ref::<String>()) {
        (Some(message), _) => *message,
        (None, Some(message)) => message.as_str(),
        (None, None) => "non-string panic payload",
    };

    let mut chars = text.chars().map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch });
    let mut summary: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        summary.push_str("...");
    }
    summary
}
