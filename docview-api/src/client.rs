use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::RequestBuilder;

use crate::error::ApiClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("docview/", env!("CARGO_PKG_VERSION"));

pub struct Info {
    pub url: Url
}

/// blocking client for the document service.
///
/// every request path is resolved relative to the base url so a base url
/// with a path prefix keeps it.
pub struct ApiClient {
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) info: Info
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            url: None,
            agent: None,
            timeout: None,
        }
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub(crate) fn url<U>(&self, path: U) -> Result<Url, url::ParseError>
    where
        U: AsRef<str>
    {
        self.info.url.join(path.as_ref().trim_start_matches('/'))
    }

    pub(crate) fn get<U>(&self, path: U) -> Result<RequestBuilder, url::ParseError>
    where
        U: AsRef<str>,
    {
        Ok(self.client.get(self.url(path)?))
    }

    pub(crate) fn post<U>(&self, path: U) -> Result<RequestBuilder, url::ParseError>
    where
        U: AsRef<str>
    {
        Ok(self.client.post(self.url(path)?))
    }
}

pub struct ApiClientBuilder {
    url: Option<Url>,
    agent: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    pub fn base_url(&mut self, url: Url) -> &mut Self {
        self.url = Some(url);
        self
    }

    pub fn user_agent<U>(&mut self, user_agent: U) -> &mut Self
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let mut url = match self.url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(ApiClientError::Url)?
        };

        if url.cannot_be_a_base() {
            return Err(ApiClientError::BaseUrl(url));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let user_agent = self.agent.unwrap_or_else(|| DEFAULT_USER_AGENT.into());

        tracing::debug!(
            base_url = %url,
            user_agent = %user_agent,
            "building api client"
        );

        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(ApiClientError::Reqwest)?;

        Ok(ApiClient {
            client,
            info: Info {
                url
            }
        })
    }
}
