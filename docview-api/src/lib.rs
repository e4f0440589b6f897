mod client;
pub use client::{
    ApiClient,
    ApiClientBuilder,
    Info,
    DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};

pub mod error;
pub use error::{ApiClientError, RequestError};

pub mod documents;
pub mod source;
pub use source::DocumentSource;

pub mod iterate;
