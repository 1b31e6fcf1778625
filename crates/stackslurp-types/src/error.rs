use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlurpError {
    #[error("Search query failed for site '{site}': {cause}")]
    SourceQueryFailed { site: String, cause: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Enqueue to '{queue}' failed (status: {}): {body}", display_status(.status))]
    EnqueueFailed {
        queue: String,
        status: Option<u16>,
        body: String,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
}

impl SlurpError {
    /// Short phase label used in log lines
    pub fn phase(&self) -> &'static str {
        match self {
            SlurpError::SourceQueryFailed { .. } => "fetch",
            SlurpError::AuthenticationFailed(_) => "auth",
            SlurpError::EnqueueFailed { .. } => "enqueue",
            SlurpError::ConfigInvalid(_) => "config",
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, SlurpError>;
