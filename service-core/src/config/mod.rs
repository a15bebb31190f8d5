//! Listener settings shared by every service binary.
//!
//! Read from an optional `configuration.*` file and `APP__`-prefixed
//! environment variables (`APP__HOST`, `APP__PORT`), after `.env` is loaded.

use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Address the HTTP listener binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listens_on_all_interfaces_port_3000_by_default() {
        let config: Config = Cfg::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.socket_addr(), "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn host_and_port_can_be_overridden() {
        let config: Config = Cfg::builder()
            .set_override("host", "127.0.0.1")
            .and_then(|b| b.set_override("port", 8080))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn unparsable_host_is_a_config_error() {
        let result: Result<Config, _> = Cfg::builder()
            .set_override("host", "not-an-address")
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize());
        assert!(result.is_err());
    }
}
