//! Path resolution for config and journal files

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "REKO_HOME";

/// Resolves standard paths under the reko data directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub home_reko: PathBuf,
}

impl Paths {
    /// `$REKO_HOME` if set, otherwise `~/.reko`
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Ok(Self::at(PathBuf::from(dir)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;
        Ok(Self::at(home.join(".reko")))
    }

    pub fn at(root: impl AsRef<Path>) -> Self {
        Self {
            home_reko: root.as_ref().to_path_buf(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.home_reko.join("config.yaml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home_reko.join("logs")
    }

    /// Rating journal, one JSON record per line
    pub fn feedback_file(&self) -> PathBuf {
        self.logs_dir().join("feedback.jsonl")
    }
}
