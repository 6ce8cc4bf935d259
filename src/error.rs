use std::fmt::Write;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavTimingError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse {}", .path.display())]
    JsonInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown locale '{0}', expected one of pt-BR, en-US, en-GB")]
    UnknownLocale(String),

    #[error("invalid UTC offset '{0}', expected whole minutes between -1439 and 1439")]
    InvalidOffset(String),

    #[error("unknown output format '{0}', expected text, json or yaml")]
    UnknownOutput(String),

    #[error("failed to serialize report as JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize report as YAML")]
    Render(#[source] serde_yaml::Error),
}

impl NavTimingError {
    /// Errors caused by user supplied settings rather than input data.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            NavTimingError::UnknownLocale(_)
                | NavTimingError::InvalidOffset(_)
                | NavTimingError::UnknownOutput(_)
        )
    }
}

/// Formats an error together with its chain of sources.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
