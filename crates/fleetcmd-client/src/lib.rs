mod config;
pub use config::ClientConfig;

mod errors;
pub use errors::ClientError;

mod client;
pub use client::{ApiClient, ExecClient};
