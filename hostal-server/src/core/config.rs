use crate::auth::JwtConfig;
use crate::core::error::ConfigError;

/// Inventory policy switches.
#[derive(Debug, Clone, Copy)]
pub struct InventoryPolicy {
    /// Whether a manual OUT adjustment may drive a product's stock cache
    /// negative. Sales are always rejected on insufficient stock; this
    /// switch only covers standalone corrections registered through the
    /// kardex endpoint.
    pub allow_negative_adjustment: bool,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self {
            allow_negative_adjustment: true,
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | DATA_DIR | *(required)* | embedded database location |
/// | JWT_SECRET | *(required)* | token signing secret, >= 32 bytes |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | *(unset)* | daily rolling log files when set |
/// | ALLOW_NEGATIVE_ADJUSTMENT | true | manual OUT movements may overdraw stock |
///
/// `DATA_DIR` and `JWT_SECRET` have no defaults on purpose: the process
/// refuses to start without them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedded database directory
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
    /// Token signing configuration
    pub jwt: JwtConfig,
    /// Inventory policy switches
    pub inventory: InventoryPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var("DATA_DIR").map_err(|_| ConfigError::Missing("DATA_DIR"))?;

        let http_port = match std::env::var("HTTP_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "HTTP_PORT",
                reason: format!("'{raw}' is not a valid port"),
            })?,
            Err(_) => 3000,
        };

        let allow_negative_adjustment = match std::env::var("ALLOW_NEGATIVE_ADJUSTMENT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "ALLOW_NEGATIVE_ADJUSTMENT",
                reason: format!("'{raw}' is not a boolean"),
            })?,
            Err(_) => true,
        };

        Ok(Self {
            data_dir,
            http_port,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::from_env()?,
            inventory: InventoryPolicy {
                allow_negative_adjustment,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
