#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[cfg(feature = "full")]
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("quote endpoint rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid quote endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, SubmissionError>;
