use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse error in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no per-user config directory available on this platform")]
    ConfigDirUnavailable,

    #[error("{url}: HTTP {status}")]
    Http { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode task page from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("template error: {0}")]
    Template(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
