//! Bridge username issued by the link-button handshake, kept in a TOML file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use kliko_core::ports::PortError;

/// Default file name for stored credentials.
pub const DEFAULT_CREDENTIALS_FILE: &str = "kliko-hue.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Credentials granted by a paired bridge.
pub struct HueCredentials {
    /// Username (application key) used in every API path.
    pub username: String,
}

impl HueCredentials {
    /// Read stored credentials; a missing file means "not paired yet".
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Credentials`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, PortError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(PortError::Credentials(format!(
                    "reading {}: {err}",
                    path.display()
                )));
            }
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|err| PortError::Credentials(format!("parsing {}: {err}", path.display())))
    }

    /// Write the credentials, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Credentials`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PortError> {
        let contents = toml::to_string(self)
            .map_err(|err| PortError::Credentials(format!("encoding credentials: {err}")))?;
        fs::write(path, contents)
            .map_err(|err| PortError::Credentials(format!("writing {}: {err}", path.display())))
    }
}
