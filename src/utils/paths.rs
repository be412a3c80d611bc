use crate::utils::errors::{RelcertError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct RelcertPaths;
const PROGRAM_NAME: &str = "relcert";

impl RelcertPaths {
    /// Get the config directory: ~/.config/relcert/
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(PROGRAM_NAME))
            .ok_or_else(|| RelcertError::Config("Cannot determine config directory".to_string()))
    }

    /// Get the config file path: ~/.config/relcert/config.yaml
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Get the default download directory: ~/Downloads, falling back to the working directory
    pub fn download_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Expand a leading `~/` to the home directory
    pub fn expand_home(path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }

    /// Ensure a directory exists with proper permissions
    pub fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;

            // Downloaded certificates are personal documents (700)
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = fs::metadata(path)?.permissions();
                perms.set_mode(0o700);
                fs::set_permissions(path, perms)?;
            }
        }
        Ok(())
    }
}
