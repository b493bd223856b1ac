use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Session saved by `login`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub address: String,
    pub username: String,
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(rename = "expires")]
    pub expires_in: u64,
    #[serde(rename = "skip-ssl-validation", default)]
    pub skip_ssl_validation: bool,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigurationError::NotLoggedIn)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the file at `path` with these credentials
    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        let temporary = path.with_extension("json.tmp");
        write_private(&temporary, &serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&temporary, path)?;
        log::debug!("Credentials saved to {}", path.display());
        Ok(())
    }
}

/// Writes `content` to a new file only readable by its owner
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // The mode only applies when the file is created
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.sync_all()
}
