//! Direct-then-proxy HTTP fetching
//!
//! A GET goes to the target first. Any transport error or non-2xx status sends
//! exactly one retry through the pass-through proxy, with the target URL
//! percent-encoded into the proxy's query string. Bodies are decoded with
//! [`Payload::decode`] on both paths.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{error, info, warn};

use crate::config::{EndpointsConfig, HttpConfig};
use crate::error::FetchError;
use crate::payload::{Payload, Via};

/// Successful fetch: which path answered and what it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub via: Via,
    pub payload: Payload,
}

pub type FetchOutcome = std::result::Result<Fetched, FetchError>;

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_with_fallback(&self, url: &str) -> FetchOutcome;
}

#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    client: Client,
    proxy_base: String,
    proxy_param: String,
}

impl ResilientFetcher {
    pub fn new(client: Client, proxy_base: impl Into<String>, proxy_param: impl Into<String>) -> Self {
        Self {
            client,
            proxy_base: proxy_base.into(),
            proxy_param: proxy_param.into(),
        }
    }

    pub fn from_config(endpoints: &EndpointsConfig, http: &HttpConfig) -> crate::error::Result<Self> {
        let mut builder = Client::builder().user_agent(http.user_agent.clone());
        if let Some(ms) = http.timeout_ms.filter(|&ms| ms > 0) {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;
        Ok(Self::new(
            client,
            endpoints.proxy_base.clone(),
            endpoints.proxy_param.clone(),
        ))
    }

    /// Fallback URL: the proxy base with `target` as its query parameter.
    ///
    /// `target` is form-urlencoded, so the proxy decodes it back byte for byte.
    pub fn proxy_url(&self, target: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.proxy_base, &[(self.proxy_param.as_str(), target)]).map_err(
            |e| FetchError::InvalidUrl {
                url: self.proxy_base.clone(),
                message: e.to_string(),
            },
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, GetError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GetError::Transport(FetchError::transport(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GetError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| GetError::Transport(FetchError::transport(e)))
    }

    async fn fetch_via_proxy(&self, url: &str) -> FetchOutcome {
        let proxy_url = self.proxy_url(url).map_err(|e| FetchError::ProxyFailure {
            message: e.to_string(),
        })?;
        info!("[fetch] proxy -> {}", proxy_url);

        match self.get_text(proxy_url.as_str()).await {
            Ok(text) => Ok(Fetched {
                via: Via::Proxy,
                payload: Payload::decode(text),
            }),
            Err(GetError::Status(status)) => Err(FetchError::ProxyFailure {
                message: format!("proxy {}", status),
            }),
            Err(GetError::Transport(e)) => Err(FetchError::ProxyFailure {
                message: e.to_string(),
            }),
        }
    }
}

/// Primary-attempt failure, before it is mapped to a [`FetchError`].
enum GetError {
    Status(u16),
    Transport(FetchError),
}

impl GetError {
    fn into_fetch_error(self) -> FetchError {
        match self {
            GetError::Status(status) => FetchError::Network { status },
            GetError::Transport(e) => e,
        }
    }
}

#[async_trait]
impl Fetch for ResilientFetcher {
    async fn fetch_with_fallback(&self, url: &str) -> FetchOutcome {
        if url.is_empty() {
            return Err(FetchError::EmptyUrl);
        }

        info!("[fetch] direct -> {}", url);
        let primary_err = match self.get_text(url).await {
            Ok(text) => {
                return Ok(Fetched {
                    via: Via::Direct,
                    payload: Payload::decode(text),
                });
            }
            Err(e) => e.into_fetch_error(),
        };
        warn!("[fetch] direct failed, trying proxy -> {}", primary_err);

        let outcome = self.fetch_via_proxy(url).await;
        if let Err(ref e) = outcome {
            error!("[fetch] proxy failed -> {}", e);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> ResilientFetcher {
        ResilientFetcher::new(Client::new(), base, "url")
    }

    #[test]
    fn test_proxy_url_percent_encodes_target() {
        let url = fetcher("https://api.allorigins.win/raw")
            .proxy_url("https://example.com/api/motivation?category=Work%20%26%20Career")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fexample.com%2Fapi%2Fmotivation%3Fcategory%3DWork%2520%2526%2520Career"
        );
    }

    #[test]
    fn test_proxy_url_round_trips_target() {
        let target = "https://example.com/funfact?theme=random&x=1";
        let url = fetcher("http://127.0.0.1:9/raw").proxy_url(target).unwrap();
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, target);
    }

    #[test]
    fn test_invalid_proxy_base() {
        let err = fetcher("not a url").proxy_url("https://example.com").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_empty_url_fails_without_request() {
        let outcome = fetcher("http://127.0.0.1:9/raw").fetch_with_fallback("").await;
        assert_eq!(outcome, Err(FetchError::EmptyUrl));
    }
}
