use std::fmt::{Debug, Formatter};
use serde::Deserialize;
use thiserror::Error;
use crate::request::REDACTED_TOKEN;

#[derive(Clone, Default, Deserialize)]
pub struct Config {
    pub domain_names: Vec<String>,
    pub token: String,
    #[serde(default)]
    pub ipv4: String,
    #[serde(default)]
    pub ipv6: String,
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    pub fn new<I, S>(domain_names: I, token: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain_names: domain_names.into_iter().map(Into::into).collect(),
            token: token.into(),
            ..Default::default()
        }
    }

    /// A config is usable only with a token and at least one domain.
    pub fn valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_empty() {
            Err(ConfigError::MissingToken)
        } else if self.domain_names.is_empty() {
            Err(ConfigError::NoDomains)
        } else {
            Ok(())
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("domain_names", &self.domain_names)
            .field("token", &REDACTED_TOKEN)
            .field("ipv4", &self.ipv4)
            .field("ipv6", &self.ipv6)
            .field("verbose", &self.verbose)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("token is empty")]
    MissingToken,
    #[error("no domain names configured")]
    NoDomains,
}
