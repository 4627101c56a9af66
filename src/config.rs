//! Configuration for GNTP
//!
//! Centralized configuration with sensible defaults. Nothing in the codec
//! reads global state; callers pass a `Config` wherever origin metadata or
//! the default password hash is needed.

use crate::protocol::HashAlgorithm;
use crate::PROTOCOL_VERSION;

/// Main configuration for building outgoing messages
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Version written into the info line (`GNTP/<version>`)
    pub protocol_version: String,

    /// Hash used when a password is attached through the config
    pub hash_algorithm: HashAlgorithm,

    // -------------------------------------------------------------------------
    // Origin Configuration
    // -------------------------------------------------------------------------
    /// Metadata describing the sending machine and software
    pub origin: Origin,
}

/// Values for the `Origin-*` headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Host name of the sender (`Origin-Machine-Name`)
    pub machine_name: String,

    /// Sending application or library (`Origin-Software-Name`)
    pub software_name: String,

    /// Version of the sending software (`Origin-Software-Version`)
    pub software_version: String,

    /// Operating system name (`Origin-Platform-Name`)
    pub platform_name: String,

    /// Operating system detail (`Origin-Platform-Version`)
    pub platform_version: String,
}

impl Default for Origin {
    fn default() -> Self {
        let machine_name = hostname::get()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "localhost".to_string());

        Self {
            machine_name,
            software_name: env!("CARGO_PKG_NAME").to_string(),
            software_version: crate::VERSION.to_string(),
            platform_name: std::env::consts::OS.to_string(),
            platform_version: format!(
                "{}-{}-{}",
                std::env::consts::OS,
                std::env::consts::ARCH,
                std::env::consts::FAMILY
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            hash_algorithm: HashAlgorithm::Md5,
            origin: Origin::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the protocol version written into the info line
    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.config.protocol_version = version.into();
        self
    }

    /// Set the hash algorithm used for passwords
    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.hash_algorithm = algorithm;
        self
    }

    /// Set the machine name reported in `Origin-Machine-Name`
    pub fn machine_name(mut self, name: impl Into<String>) -> Self {
        self.config.origin.machine_name = name.into();
        self
    }

    /// Set the software name and version reported in the origin headers
    pub fn software(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.origin.software_name = name.into();
        self.config.origin.software_version = version.into();
        self
    }

    /// Set the platform name and version reported in the origin headers
    pub fn platform(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.origin.platform_name = name.into();
        self.config.origin.platform_version = version.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
