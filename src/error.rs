use thiserror::Error;

/// Every way an ingestion run can fail.
///
/// Errors are never recovered locally: they bubble up to `main`, which prints
/// the message and exits with [`AppError::exit_code`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("ENTSO-E API key not provided. Set ENTSOE_API_KEY in the environment (.env).")]
    MissingCredential,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("ENTSO-E request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("ENTSO-E request failed with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Malformed ENTSO-E document: {0}")]
    MalformedDocument(String),

    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    /// Process exit code: 2 for local input/config problems, 3 for the
    /// credential, 4 for remote or payload failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidRequest(_) | Self::Config(_) | Self::Io { .. } => 2,
            Self::MissingCredential => 3,
            Self::Transport(_)
            | Self::Remote { .. }
            | Self::MalformedDocument(_)
            | Self::UnsupportedResolution(_) => 4,
        }
    }
}
