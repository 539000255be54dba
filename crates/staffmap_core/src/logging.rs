//! Logging bootstrap for StaffMap core.
//!
//! # Responsibility
//! - Build a `LogConfig` from explicit values or the process environment.
//! - Start a size-rotated file logger exactly once per process.
//!
//! # Invariants
//! - Re-initialization with an identical config is a no-op.
//! - Re-initialization with a different level or directory is rejected.
//! - Mapper events carry ids and counts only, never field values.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub const LOG_LEVEL_ENV: &str = "STAFFMAP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STAFFMAP_LOG_DIR";

const LOG_FILE_BASENAME: &str = "staffmap";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LogConfig {
    /// Normalizes `level` and checks that `log_dir` is a non-empty absolute path.
    pub fn new(level: &str, log_dir: impl AsRef<Path>) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir.as_ref())?,
        })
    }

    /// Reads `STAFFMAP_LOG_LEVEL` and `STAFFMAP_LOG_DIR`.
    ///
    /// The level falls back to `default_log_level()`; the directory is required.
    pub fn from_env() -> Result<Self, String> {
        let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .ok_or_else(|| format!("{LOG_DIR_ENV} is not set"))?;
        Self::new(&level, PathBuf::from(log_dir))
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Starts the file logger described by `config`.
///
/// # Errors
/// - The log directory cannot be created.
/// - The logger backend fails to start.
/// - Logging is already active with a different level or directory.
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(config))?;

    if active.log_dir != config.log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.log_dir.display(),
            config.log_dir.display()
        ));
    }
    if active.level != config.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, config.level
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LogConfig) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
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

    info!(
        "event=core_init module=core status=ok level={} log_dir={} version={}",
        config.level,
        config.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level: config.level,
        log_dir: config.log_dir.clone(),
        _handle: handle,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, String> {
    if log_dir.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if !log_dir.is_absolute() {
        return Err(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        ));
    }
    Ok(log_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, init_logging, logging_status, normalize_level, LogConfig, LOG_DIR_ENV,
        LOG_LEVEL_ENV,
    };

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn log_config_rejects_relative_and_empty_dirs() {
        let relative = LogConfig::new("info", "logs/dev").unwrap_err();
        assert!(relative.contains("absolute"));

        let empty = LogConfig::new("info", "").unwrap_err();
        assert!(empty.contains("empty"));
    }

    #[test]
    fn log_config_from_env_requires_dir_and_defaults_level() {
        let dir = tempfile::tempdir().unwrap();
        std::env::remove_var(LOG_LEVEL_ENV);
        std::env::remove_var(LOG_DIR_ENV);

        let missing = LogConfig::from_env().unwrap_err();
        assert!(missing.contains(LOG_DIR_ENV));

        std::env::set_var(LOG_DIR_ENV, dir.path());
        let defaulted = LogConfig::from_env().unwrap();
        assert_eq!(defaulted.level(), default_log_level());
        assert_eq!(defaulted.log_dir(), dir.path());

        std::env::set_var(LOG_LEVEL_ENV, "WARNING");
        let explicit = LogConfig::from_env().unwrap();
        assert_eq!(explicit.level(), "warn");

        std::env::remove_var(LOG_LEVEL_ENV);
        std::env::remove_var(LOG_DIR_ENV);
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let first_dir = tempfile::tempdir().unwrap();
        let second_dir = tempfile::tempdir().unwrap();

        let config = LogConfig::new("info", first_dir.path()).unwrap();
        init_logging(&config).expect("first init should succeed");
        init_logging(&config).expect("same config should be idempotent");

        let level_conflict = LogConfig::new("debug", first_dir.path()).unwrap();
        let level_error = init_logging(&level_conflict).expect_err("level conflict should fail");
        assert!(level_error.contains("refusing to switch"));

        let dir_conflict = LogConfig::new("info", second_dir.path()).unwrap();
        let dir_error = init_logging(&dir_conflict).expect_err("directory conflict should fail");
        assert!(dir_error.contains("refusing to switch"));

        let (active_level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(active_dir, first_dir.path());
    }
}
