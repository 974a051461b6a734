use std::{
    fmt::{Debug, Formatter},
    sync::atomic::{AtomicBool, Ordering},
};
use hickory_resolver::ResolveError;
use reqwest::{header::{HeaderMap, USER_AGENT}, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};
use crate::{
    config::{Config, ConfigError},
    record::{record_name, SystemResolver, TxtResolver},
    request::{Operation, UpdateRequest},
};

pub const DEFAULT_BASE_URL: &str = "https://www.duckdns.org";
pub const DEFAULT_USER_AGENT: &str = concat!("duckdns-rs/", env!("CARGO_PKG_VERSION"));

/// Client for one DuckDNS account.
///
/// Requests go through the shared `reqwest::Client`, so a `Client` can be used
/// from several tasks at once. Every operation is a single GET with no retries
/// and no timeout of its own; drop the future (e.g. with `tokio::time::timeout`)
/// to abandon a call.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    user_agent: String,

    config: Config,
    verbose: AtomicBool,

    resolver: Box<dyn TxtResolver>,
}

impl Client {
    /// Fails if `config` has no token or no domains.
    pub fn new(http: reqwest::Client, config: Config) -> Result<Self, ClientError> {
        config.validate()?;

        Ok(Self {
            http,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            verbose: AtomicBool::new(config.verbose),
            config,
            resolver: Box::new(SystemResolver::new()),
        })
    }

    pub fn with_base_url<U: AsRef<str>>(mut self, url: U) -> Result<Self, ClientError> {
        let base_url = Url::parse(url.as_ref())?;

        if base_url.cannot_be_a_base() {
            Err(ClientError::BadBaseUrl)
        } else {
            self.base_url = base_url;
            Ok(self)
        }
    }

    pub fn with_resolver<R: TxtResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    pub fn user_agent(&self) -> &str { &self.user_agent }
    pub fn user_agent_mut(&mut self) -> &mut String { &mut self.user_agent }

    pub fn config(&self) -> &Config { &self.config }

    pub fn verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Ask the provider for a verbose body on subsequent calls. Safe to call
    /// while other requests are in flight.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    /// Points the domains at the address the provider sees the request from.
    #[tracing::instrument(skip(self))]
    pub async fn update_ip(&self) -> Result<Response, ClientError> {
        self.execute(&Operation::UpdateIp).await
    }

    /// An empty `ipv6` leaves the AAAA record alone.
    #[tracing::instrument(skip(self))]
    pub async fn update_ip_with_values(
        &self,
        ipv4: &str,
        ipv6: &str,
    ) -> Result<Response, ClientError> {
        self.execute(&Operation::UpdateIpWithValues {
            ipv4: ipv4.to_owned(),
            ipv6: ipv6.to_owned(),
        }).await
    }

    /// Uses the addresses from the config, falling back to [`Client::update_ip`]
    /// when none are set.
    pub async fn update_configured_ip(&self) -> Result<Response, ClientError> {
        if self.config.ipv4.is_empty() && self.config.ipv6.is_empty() {
            self.update_ip().await
        } else {
            self.update_ip_with_values(&self.config.ipv4, &self.config.ipv6).await
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_ip(&self) -> Result<Response, ClientError> {
        self.execute(&Operation::ClearIp).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_record(&self, record: &str) -> Result<Response, ClientError> {
        self.execute(&Operation::UpdateRecord(record.to_owned())).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_record(&self, record: &str) -> Result<Response, ClientError> {
        self.execute(&Operation::ClearRecord(record.to_owned())).await
    }

    /// Sends one request and reads the whole body.
    ///
    /// The provider reports rejections in the body (`KO`), so any status and
    /// body come back as `Ok`. Only a failed send or a failed read is an error.
    pub async fn execute(&self, operation: &Operation) -> Result<Response, ClientError> {
        let request = UpdateRequest::new(
            &self.config.domain_names,
            &self.config.token,
            operation,
            self.verbose(),
        );
        // Appended rather than joined so a path prefix on the base URL survives.
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}{}", base, request.path()))?;

        info!("sending request to {}{}", base, request);

        // reqwest errors carry the request URL, which holds the token.
        let response = self.http.get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.without_url()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text()
            .await
            .map_err(|e| ClientError::Read(e.without_url()))?;

        debug!(%status, body = %body.trim(), "provider responded");

        Ok(Response { status, headers, body })
    }

    /// Current TXT value of the first configured domain.
    ///
    /// Returns an empty string when the name resolves without TXT data. Only
    /// the first entry is returned; the provider keeps one per domain.
    #[tracing::instrument(skip(self))]
    pub async fn get_record(&self) -> Result<String, ClientError> {
        let domain = self.config.domain_names.first().ok_or(ConfigError::NoDomains)?;
        let name = record_name(domain);

        let records = self.resolver.lookup_txt(&name).await?;
        debug!(?records, "looked up {}", name);

        Ok(records.into_iter().next().unwrap_or_default())
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("config", &self.config)
            .field("verbose", &self.verbose())
            .finish_non_exhaustive()
    }
}

/// What the provider sent back, uninterpreted.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &str { &self.body }
    pub fn into_body(self) -> String { self.body }

    /// Whether the body reports success. Verbose bodies start with the same
    /// `OK`/`KO` line followed by details.
    pub fn is_ok(&self) -> bool {
        self.body.starts_with("OK")
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("bad base url")]
    BadBaseUrl,
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("failed to read response body: {0}")]
    Read(reqwest::Error),
    #[error("unable to get txt record: {0}")]
    Lookup(#[from] ResolveError),
}

impl ClientError {
    /// True when DNS answered that the name or its TXT data doesn't exist
    /// (yet), as opposed to the lookup itself failing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::Lookup(e) => e.is_nx_domain() || e.is_no_records_found(),
            _ => false,
        }
    }
}
