use qboxio::workflows::convert::ConvertError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config file '{path}': {source}", path = path.display())]
    ConfigParsing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
