use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("target discovery failed ({status}): {body}")]
    DiscoveryFailed { status: u16, body: String },

    #[error("session init failed ({status}): {body}")]
    SessionInitFailed { status: u16, body: String },

    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}
