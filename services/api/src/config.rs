//! Service configuration read from the environment

use anyhow::{Result, bail};
use std::{env, fmt, str::FromStr};

/// Catalog seeded when `APPOINTMENT_TYPES` is not set
pub const DEFAULT_APPOINTMENT_TYPES: &[&str] = &[
    "General Consultation",
    "Follow-up",
    "Vaccination",
    "Health Screening",
];

/// Where appointments and users are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("Unknown storage backend: {}", other),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Names seeded into the appointment type catalog
    pub appointment_types: Vec<String>,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SERVER_HOST`: Interface to bind (default: 0.0.0.0)
    /// - `SERVER_PORT`: Port to bind (default: 9898)
    /// - `STORAGE_BACKEND`: `memory` or `postgres` (default: memory)
    /// - `APPOINTMENT_TYPES`: Comma-separated catalog names
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("SERVER_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT {}: {}", port, e))?,
            Err(_) => 9898,
        };

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(backend) => backend.parse::<StorageBackend>()?,
            Err(_) => StorageBackend::Memory,
        };

        let appointment_types = match env::var("APPOINTMENT_TYPES") {
            Ok(names) => parse_type_names(&names),
            Err(_) => DEFAULT_APPOINTMENT_TYPES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        };

        if appointment_types.is_empty() {
            bail!("APPOINTMENT_TYPES must name at least one appointment type");
        }

        Ok(ServerConfig {
            host,
            port,
            storage,
            appointment_types,
        })
    }

    /// Address to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_type_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            env::remove_var("SERVER_HOST");
            env::remove_var("SERVER_PORT");
            env::remove_var("STORAGE_BACKEND");
            env::remove_var("APPOINTMENT_TYPES");
        }
    }

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        clear_env();

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9898");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.appointment_types.len(), DEFAULT_APPOINTMENT_TYPES.len());
    }

    #[test]
    #[serial]
    fn test_server_config_from_env_with_custom_values() {
        clear_env();
        unsafe {
            env::set_var("SERVER_HOST", "127.0.0.1");
            env::set_var("SERVER_PORT", "8080");
            env::set_var("STORAGE_BACKEND", "Postgres");
            env::set_var("APPOINTMENT_TYPES", " Dental , ,Physiotherapy");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.appointment_types, vec!["Dental", "Physiotherapy"]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_server_config_rejects_bad_values() {
        clear_env();

        unsafe { env::set_var("SERVER_PORT", "not-a-port") };
        assert!(ServerConfig::from_env().is_err());
        clear_env();

        unsafe { env::set_var("STORAGE_BACKEND", "mongo") };
        assert!(ServerConfig::from_env().is_err());
        clear_env();

        unsafe { env::set_var("APPOINTMENT_TYPES", " , ") };
        assert!(ServerConfig::from_env().is_err());
        clear_env();
    }
}
