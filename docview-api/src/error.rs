use std::error::Error;
use std::fmt;

use docview_lib::validation::Invalid;

#[derive(Debug)]
pub enum ApiClientError {
    BaseUrl(url::Url),
    Url(url::ParseError),
    Reqwest(reqwest::Error),
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::BaseUrl(url) => write!(f, "ApiClientError::BaseUrl cannot be a base: {}", url),
            ApiClientError::Url(_) => write!(f, "ApiClientError::Url"),
            ApiClientError::Reqwest(_) => write!(f, "ApiClientError::Reqwest"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::Url(v) => Some(v),
            ApiClientError::Reqwest(v) => Some(v),
            _ => None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("server responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Invalid(#[from] Invalid),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error)
}

impl RequestError {
    /// reads the body of an unexpected response into a status error
    pub(crate) fn from_response(res: reqwest::blocking::Response) -> Self {
        let status = res.status();
        let body = match res.text() {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("failed to read body of {} response: {}", status, err);

                String::new()
            }
        };

        RequestError::Status { status, body }
    }
}
