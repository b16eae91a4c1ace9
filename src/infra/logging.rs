use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError, storage_layout};

/// Where log output goes. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Installs the global subscriber. The returned guard flushes file output and
/// must be held for the lifetime of the process.
pub fn init(config: &LogConfig, target: &LogTarget) -> Result<Option<WorkerGuard>, AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(AppError::LoggingInit)?;
            Ok(None)
        }
        LogTarget::File(path) => {
            let (directory, file_name) = split_log_path(path)?;
            storage_layout::ensure_parent_dir(path)?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(AppError::LoggingInit)?;
            Ok(Some(guard))
        }
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), AppError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::StoragePathResolution {
            details: format!("log file path {} has no file name", path.display()),
        })?;
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((directory, PathBuf::from(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_log_path_into_directory_and_file() {
        let (directory, file) =
            split_log_path(Path::new("/tmp/rchat/rchat.log")).expect("path should split");

        assert_eq!(directory, PathBuf::from("/tmp/rchat"));
        assert_eq!(file, PathBuf::from("rchat.log"));
    }

    #[test]
    fn bare_file_name_logs_to_current_directory() {
        let (directory, _) = split_log_path(Path::new("rchat.log")).expect("path should split");

        assert_eq!(directory, PathBuf::from("."));
    }

    #[test]
    fn rejects_path_without_file_name() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
