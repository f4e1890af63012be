//! Credential resolution
//!
//! Explicit arguments win over configuration; configuration wins over
//! nothing. Empty strings are treated as absent at both levels.

use std::fmt;

use crate::config::{keys, lookup, non_empty, ConfigSource};
use crate::error::{Error, Result};

/// Resolved connection string and target container
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    connection_string: String,
    container: String,
}

impl Credentials {
    /// Build credentials directly, bypassing configuration
    pub fn new(connection_string: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            container: container.into(),
        }
    }

    /// Resolve credentials from explicit arguments and a configuration source
    ///
    /// Fails with `Error::Config` naming the first missing field.
    pub fn resolve(
        connection_string: Option<&str>,
        container: Option<&str>,
        source: &dyn ConfigSource,
    ) -> Result<Self> {
        let connection_string = non_empty(connection_string.map(str::to_owned))
            .or_else(|| lookup(source, keys::CONNECTION_STRING))
            .ok_or_else(|| missing("connection string", keys::CONNECTION_STRING.name))?;

        let container = non_empty(container.map(str::to_owned))
            .or_else(|| lookup(source, keys::CONTAINER))
            .ok_or_else(|| missing("container name", keys::CONTAINER.name))?;

        Ok(Self {
            connection_string,
            container,
        })
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn container(&self) -> &str {
        &self.container
    }
}

fn missing(field: &str, env_key: &str) -> Error {
    Error::Config(format!(
        "Missing {field}. Pass it as an argument or set {env_key} in the environment or .env file"
    ))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("connection_string", &"<redacted>")
            .field("container", &self.container)
            .finish()
    }
}

/// Default list filters, resolved once when the facade is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDefaults {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl ListDefaults {
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            prefix: lookup(source, keys::PREFIX),
            suffix: lookup(source, keys::SUFFIX),
        }
    }
}
