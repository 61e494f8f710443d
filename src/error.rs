//! Startup errors
//!
//! Gameplay itself has no failure modes; running out of lives is an ordinary
//! transition. Only configuration and display binding can fail, and both are
//! fatal before the first frame.

use thiserror::Error;

/// Invalid game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read game config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("play area must be positive, got {width}x{height}")]
    EmptyBounds { width: f32, height: f32 },
    #[error("{entity} size {width}x{height} does not fit the play area")]
    EntityTooLarge {
        entity: &'static str,
        width: f32,
        height: f32,
    },
    #[error("{what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f32 },
    #[error("initial lives must be at least 1, got {0}")]
    NoLives(i32),
}

/// Failure to bring up a session against the host page
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element #{0} is missing from the page")]
    MissingElement(&'static str),
    #[error("element #{0} is not an HTML element")]
    WrongElementType(&'static str),
    #[error("failed to create element for {0}")]
    CreateElement(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
