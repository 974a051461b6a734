//! Client for the DuckDNS update API, with TXT lookups to confirm that a
//! record change has reached public DNS.

pub mod client;
pub mod config;
pub mod record;
pub mod request;

pub use crate::{
    client::{Client, ClientError, Response},
    config::{Config, ConfigError},
    record::{record_name, SystemResolver, TxtResolver},
    request::{Operation, UpdateRequest},
};
