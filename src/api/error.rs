use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Upstream error {code}: {text}")]
    Upstream { code: String, text: String },
    #[error("Could not find {0}")]
    NotFound(String),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short message for an error banner.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::Status { .. } => "Could not reach the journey planner",
            Self::Upstream { .. } => "The journey planner returned an error",
            Self::NotFound(_) => "Station not found",
            Self::Decode(_) => "Unexpected response from the journey planner",
        }
    }
}
