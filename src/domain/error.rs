//! Domain error types.

/// Top-level error type for stocklens.
#[derive(Debug, thiserror::Error)]
pub enum StocklensError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("quote fetch failed: {reason}")]
    Fetch { reason: String },

    #[error("bad quote data: {reason}")]
    Data { reason: String },

    #[error("invalid ticker: {reason}")]
    Ticker { reason: String },

    #[error("chart rendering failed: {reason}")]
    Chart { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StocklensError> for std::process::ExitCode {
    fn from(err: &StocklensError) -> Self {
        let code: u8 = match err {
            StocklensError::Io(_) => 1,
            StocklensError::ConfigParse { .. } | StocklensError::ConfigInvalid { .. } => 2,
            StocklensError::Fetch { .. } => 3,
            StocklensError::Data { .. } | StocklensError::Ticker { .. } => 4,
            StocklensError::Chart { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
