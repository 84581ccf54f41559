//! Dashboard API client
//!
//! `Fetcher` is the transport seam: `HttpFetcher` talks to the real backend
//! with reqwest, tests substitute scripted fetchers. `Api` layers the typed
//! endpoints and shape normalization on top.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::HubConfig;
use crate::error::{ConfigError, FetchError, FetchResult};
use crate::model::{Driver, DriverDetail, Event, EventLists};
use crate::normalize::{normalize_list, normalize_record};

/// GET endpoints served by the dashboard backend
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /drivers`
    Drivers,
    /// `GET /drivers/{id}`
    Driver(String),
    /// `GET /events/upcoming`
    UpcomingEvents,
    /// `GET /events/recent`
    RecentEvents,
}

impl Endpoint {
    /// Unencoded path segments
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Drivers => vec!["drivers"],
            Endpoint::Driver(id) => vec!["drivers", id.as_str()],
            Endpoint::UpcomingEvents => vec!["events", "upcoming"],
            Endpoint::RecentEvents => vec!["events", "recent"],
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

/// Issues a GET and returns the parsed JSON body
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get_json(&self, endpoint: &Endpoint) -> FetchResult<Value>;
}

/// reqwest-backed fetcher bound to the configured API base
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(config: &HubConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(config.api_base())
            .map_err(|e| ConfigError::invalid_url(config.api_base(), e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::invalid_url(
                config.api_base(),
                "URL cannot carry a path",
            ));
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    /// Full URL for an endpoint, with each segment percent-encoded
    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, endpoint: &Endpoint) -> FetchResult<Value> {
        let path = endpoint.path();
        let url = self.url_for(endpoint);
        debug!(url = %url, "issuing request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(&path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), path));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(&path, e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::malformed(path, e.to_string()))
    }
}

/// Typed access to the dashboard endpoints
///
/// Cheap to clone; request futures own a clone so they can outlive the
/// view that issued them until they are aborted.
#[derive(Clone)]
pub struct Api {
    fetcher: Arc<dyn Fetcher>,
}

impl Api {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Api over HTTP against the configured base URL
    pub fn http(config: &HubConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    pub async fn drivers(&self) -> FetchResult<Vec<Driver>> {
        let body = self.fetcher.get_json(&Endpoint::Drivers).await?;
        normalize_list(body)
    }

    pub async fn driver_detail(&self, id: &str) -> FetchResult<DriverDetail> {
        let body = self
            .fetcher
            .get_json(&Endpoint::Driver(id.to_string()))
            .await?;
        normalize_record(body)
    }

    pub async fn upcoming_events(&self) -> FetchResult<Vec<Event>> {
        let body = self.fetcher.get_json(&Endpoint::UpcomingEvents).await?;
        normalize_list(body)
    }

    pub async fn recent_events(&self) -> FetchResult<Vec<Event>> {
        let body = self.fetcher.get_json(&Endpoint::RecentEvents).await?;
        normalize_list(body)
    }

    /// Both event lists, fetched concurrently; either failure fails both
    pub async fn schedule(&self) -> FetchResult<EventLists> {
        let (upcoming, recent) = tokio::try_join!(self.upcoming_events(), self.recent_events())?;
        Ok(EventLists { upcoming, recent })
    }
}
