use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use thiserror::Error;
use url::form_urlencoded;

/// Body fragments that mark a response as a block page rather than content.
const BLOCK_SIGNATURES: [&str; 3] = ["access denied", "403 forbidden", "rate limit exceeded"];

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// One intermediary fetch endpoint. The template must contain a `{url}`
/// placeholder which is filled with the percent-encoded target URL.
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    pub name: String,
    pub template: String,
}

impl ProxyRoute {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        ProxyRoute {
            name: name.into(),
            template: template.into(),
        }
    }

    /// The public CORS relays used when no custom routes are configured.
    pub fn defaults() -> Vec<ProxyRoute> {
        vec![
            ProxyRoute::new(
                "allorigins",
                "https://api.allorigins.win/raw?url={url}",
            ),
            ProxyRoute::new("corsproxy", "https://corsproxy.io/?{url}"),
            ProxyRoute::new(
                "codetabs",
                "https://api.codetabs.com/v1/proxy?quest={url}",
            ),
        ]
    }

    fn request_url(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.template.replace("{url}", &encoded)
    }
}

/// Why a single proxy route was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteFailureKind {
    /// Connection, TLS or body-read error; `timed_out` when the request
    /// exceeded the per-request ceiling
    Transport { timed_out: bool },
    /// Response status outside the success range
    BadStatus(u16),
    /// Response body was empty after trimming
    EmptyBody,
    /// Response body matched a known block-page signature
    Blocked { signature: &'static str },
}

/// Per-route diagnostic record, aggregated into [`FetchError`] when every
/// route fails. Only lives for the duration of one fetch call.
#[derive(Debug, Clone)]
pub struct RouteFailure {
    pub route: String,
    pub kind: RouteFailureKind,
    pub detail: String,
}

impl RouteFailure {
    pub fn timed_out(&self) -> bool {
        matches!(self.kind, RouteFailureKind::Transport { timed_out: true })
    }

    pub fn rate_limited(&self) -> bool {
        matches!(
            self.kind,
            RouteFailureKind::Blocked {
                signature: "rate limit exceeded"
            } | RouteFailureKind::BadStatus(429)
        )
    }
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.route, self.detail)
    }
}

/// Every configured route failed for one logical fetch.
#[derive(Debug, Error)]
#[error("all {} proxy services failed: {}", .failures.len(), summarize(.failures))]
pub struct FetchError {
    pub failures: Vec<RouteFailure>,
}

fn summarize(failures: &[RouteFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Retrieves page content through an ordered list of proxy routes.
///
/// Routes are tried strictly in list order, one request each; the first body
/// that passes the block-page checks wins. Retrying is not this layer's job,
/// see [`super::with_retry`].
pub struct ProxyFetcher {
    client: Client,
    routes: Vec<ProxyRoute>,
}

impl ProxyFetcher {
    pub fn new(routes: Vec<ProxyRoute>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        ProxyFetcher { client, routes }
    }

    pub fn routes(&self) -> &[ProxyRoute] {
        &self.routes
    }

    /// Fetch `target` through the first route that produces usable content.
    pub async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let mut failures = Vec::new();

        for route in &self.routes {
            match self.try_route(route, target).await {
                Ok(body) => {
                    debug!("route {} served {} bytes for {}", route.name, body.len(), target);
                    return Ok(body);
                }
                Err(failure) => {
                    warn!("route failed: {}", failure);
                    failures.push(failure);
                }
            }
        }

        Err(FetchError { failures })
    }

    async fn try_route(&self, route: &ProxyRoute, target: &str) -> Result<String, RouteFailure> {
        let request_url = route.request_url(target);
        debug!("fetching {} via {}", target, route.name);

        let response = self
            .client
            .get(&request_url)
            .send()
            .await
            .map_err(|err| transport_failure(route, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteFailure {
                route: route.name.clone(),
                kind: RouteFailureKind::BadStatus(status.as_u16()),
                detail: format!("HTTP {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| transport_failure(route, &err))?;

        if body.trim().is_empty() {
            return Err(RouteFailure {
                route: route.name.clone(),
                kind: RouteFailureKind::EmptyBody,
                detail: "empty response body".to_string(),
            });
        }

        if let Some(signature) = block_signature(&body) {
            return Err(RouteFailure {
                route: route.name.clone(),
                kind: RouteFailureKind::Blocked { signature },
                detail: format!("block page detected (\"{}\")", signature),
            });
        }

        Ok(body)
    }
}

fn transport_failure(route: &ProxyRoute, err: &reqwest::Error) -> RouteFailure {
    RouteFailure {
        route: route.name.clone(),
        kind: RouteFailureKind::Transport {
            timed_out: err.is_timeout(),
        },
        detail: err.to_string(),
    }
}

fn block_signature(body: &str) -> Option<&'static str> {
    let lowered = body.to_lowercase();
    BLOCK_SIGNATURES
        .into_iter()
        .find(|signature| lowered.contains(signature))
}
