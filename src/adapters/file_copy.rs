// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file copying.
//!
//! Used to ship a bundled configuration file to where an application expects
//! it, for example the OS-appropriate configuration directory.

use crate::domain::{ConfigError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies the file at `from` to `to`, replacing `to` if it exists.
///
/// # Errors
///
/// Returns `ConfigError::ConfigNotFound` when `from` does not exist; `to` is
/// left untouched. Other failures surface as `ConfigError::IoError`.
///
/// # Examples
///
/// ```rust,no_run
/// use treecfg::adapters::file_copy::copy_file;
/// use std::path::Path;
///
/// copy_file(Path::new("defaults.yaml"), Path::new("/etc/myapp/config.yaml")).unwrap();
/// ```
pub fn copy_file(from: &Path, to: &Path) -> Result<bool> {
    ensure_exists(from)?;

    let bytes = fs::copy(from, to)?;
    tracing::debug!(
        from = %from.display(),
        to = %to.display(),
        bytes,
        "copied configuration file"
    );
    Ok(true)
}

/// Copies `from` into `dir` under the same file name, creating `dir` if needed.
///
/// Returns the path of the new file.
pub fn publish_to_dir(from: &Path, dir: &Path) -> Result<PathBuf> {
    ensure_exists(from)?;

    let file_name = from.file_name().ok_or_else(|| ConfigError::ConfigNotFound {
        path: from.to_path_buf(),
    })?;
    fs::create_dir_all(dir)?;

    let target = dir.join(file_name);
    copy_file(from, &target)?;
    Ok(target)
}

/// Copies `from` into the OS-appropriate configuration directory for an
/// application.
///
/// # Arguments
///
/// * `from` - The file to publish
/// * `app_name` - The application name (e.g., "myapp")
/// * `qualifier` - The organization/qualifier (e.g., "com.example")
///
/// # Errors
///
/// Returns `ConfigError::DirectoryUnavailable` when no home directory can be
/// determined.
///
/// # Examples
///
/// ```rust,no_run
/// use treecfg::adapters::file_copy::publish_to_config_dir;
/// use std::path::Path;
///
/// let installed = publish_to_config_dir(Path::new("config.yaml"), "myapp", "com.example").unwrap();
/// println!("installed {}", installed.display());
/// ```
pub fn publish_to_config_dir(from: &Path, app_name: &str, qualifier: &str) -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
        ConfigError::DirectoryUnavailable {
            app_name: app_name.to_string(),
        }
    })?;

    publish_to_dir(from, proj_dirs.config_dir())
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    tracing::warn!(path = %path.display(), "configuration file not found");
    Err(ConfigError::ConfigNotFound {
        path: path.to_path_buf(),
    })
}
