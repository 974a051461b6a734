use std::net::IpAddr;
use hickory_resolver::{
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    ResolveError,
    TokioResolver,
};
use tracing::{debug, warn};

pub const ROOT_DOMAIN: &str = "duckdns.org";

/// Fully qualified name to query for a configured domain.
///
/// Bare subdomain labels get the provider's root domain appended, anything
/// already mentioning it is used as given.
pub fn record_name(domain: &str) -> String {
    if domain.contains(ROOT_DOMAIN) {
        domain.to_owned()
    } else {
        format!("{}.{}", domain, ROOT_DOMAIN)
    }
}

/// Looks up the TXT strings published for a name.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TxtResolver: Send + Sync {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError>;
}

/// [`TxtResolver`] backed by hickory.
#[derive(Clone)]
pub struct SystemResolver {
    resolver: TokioResolver,
}

impl SystemResolver {
    /// Uses the host's resolver configuration, or hickory's default public
    /// upstreams when that can't be read.
    pub fn new() -> Self {
        let resolver = match TokioResolver::builder_tokio() {
            Ok(builder) => builder.build(),
            Err(e) => {
                warn!("failed to load system DNS configuration, falling back to defaults: {}", e);
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                ).build()
            }
        };

        Self { resolver }
    }

    /// Sends every query to a single nameserver.
    pub fn with_nameserver(ip: IpAddr) -> Self {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ip], 53, true),
        );
        let resolver = TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(ResolverOpts::default())
            .build();

        Self { resolver }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TxtResolver for SystemResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        let lookup = self.resolver.txt_lookup(name).await?;

        // A TXT record may be split into several character-strings.
        let records: Vec<String> = lookup.iter()
            .map(|txt| txt.iter()
                .map(|data| String::from_utf8_lossy(data))
                .collect())
            .collect();

        debug!(?records, "got {} TXT records for {}", records.len(), name);
        Ok(records)
    }
}
