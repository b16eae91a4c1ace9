use std::{fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "rchat";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "rchat.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = dirs::config_dir().ok_or_else(|| AppError::StoragePathResolution {
            details: "unable to resolve the user config directory".into(),
        })?;
        let cache_base = dirs::cache_dir().ok_or_else(|| AppError::StoragePathResolution {
            details: "unable to resolve the user cache directory".into(),
        })?;

        Ok(Self {
            config_dir: config_base.join(APP_DIR_NAME),
            cache_dir: cache_base.join(APP_DIR_NAME),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.cache_dir.join(LOG_FILE_NAME)
    }
}

/// Creates the parent directory of `path` when it has one.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), AppError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| AppError::LogDirCreate {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
