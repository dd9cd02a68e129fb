use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed proxy response: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("proxy returned {code}: {message}")]
    Remote { code: i64, message: String },
    #[error("error encoding form data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("no '{0}' link found")]
    LinkNotFound(&'static str),
    #[error("no form details found")]
    NoFormDetails,
}

impl Error {
    /// Whether the failure came from the network side rather than from page content.
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Envelope(_) | Self::Remote { .. })
    }
}
