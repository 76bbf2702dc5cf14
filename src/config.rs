use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::json;

/// Reverse-DNS application id; names the per-user config directory.
pub const APP_ID: &str = "com.scottmmjackson.bb2todotxt";
pub const CREDENTIALS_FILE: &str = "bitbucket.json";

/// Bitbucket username and app password.
#[derive(Clone, Default, Deserialize, PartialEq)]
pub struct Credentials {
    #[serde(rename = "Username", alias = "username", default)]
    pub username: String,
    #[serde(rename = "Password", alias = "password", default)]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load credentials from `explicit` if given, otherwise from the
    /// per-user config directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => default_path()?,
        };
        debug!(path = %path.display(), "loading credentials");
        load_from(&path)
    }
}

/// `<local config dir>/com.scottmmjackson.bb2todotxt/bitbucket.json`
pub fn default_path() -> Result<PathBuf> {
    dirs::config_local_dir()
        .map(|dir| dir.join(APP_ID).join(CREDENTIALS_FILE))
        .ok_or(Error::ConfigDirUnavailable)
}

pub fn load_from(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_credentials(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_credentials(content: &str) -> std::result::Result<Credentials, serde_json::Error> {
    json::from_object_str(content)
}
