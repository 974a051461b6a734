use std::time::Duration;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    UpdateIp,
    ClearIp,
    UpdateRecord { record: String },
    ClearRecord { record: String },
    GetRecord,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct WaitSettings {
    pub interval: String,
    pub timeout: String,
}

impl WaitSettings {
    pub fn interval(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.interval)
    }

    pub fn timeout(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.timeout)
    }
}

// No Debug: holds the token.
#[derive(Deserialize)]
pub struct Settings {
    pub domains: Vec<String>,
    pub token: String,
    #[serde(default)]
    pub ipv4: String,
    #[serde(default)]
    pub ipv6: String,
    #[serde(default)]
    pub verbose: bool,

    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    #[serde(default)]
    pub log_format: LogFormat,

    pub action: Action,
    pub wait: Option<WaitSettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let home = shellexpand::tilde("~/.config/duckdns/config");

        Self::from_builder(Config::builder()
            .add_source(File::with_name("duckdns").required(false))
            .add_source(File::with_name(&home).required(false)))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .add_source(Environment::with_prefix("DUCKDNS")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("domains")
                .try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn client_config(&self) -> duckdns::Config {
        duckdns::Config {
            domain_names: self.domains.clone(),
            token: self.token.clone(),
            ipv4: self.ipv4.clone(),
            ipv6: self.ipv6.clone(),
            verbose: self.verbose,
        }
    }
}
