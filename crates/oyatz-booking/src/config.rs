// ABOUTME: Configuration loading and validation for the booking flow.
// ABOUTME: Supports TOML config files with environment variable expansion.

use crate::error::{BookingError, Result};
use crate::form::looks_like_email;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Top-level configuration structure for the booking flow.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    /// Primary transport. Absent, or present with an empty key, means unavailable.
    #[serde(default)]
    pub relay: Option<RelayConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
}

/// Who the site belongs to and where booking requests go.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Short slug used for file names, e.g. the color token download.
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Name shown in subjects and message headers.
    #[serde(default = "default_business_name")]
    pub business_name: String,
    /// Inbox that receives booking requests.
    pub owner_email: String,
    /// Number offered when delivery fails.
    #[serde(default)]
    pub phone_number: String,
}

/// Transactional-email relay credentials.
#[derive(Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Access key sent with every request.
    #[serde(default)]
    pub access_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Booking dialog behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Delay between a successful submission and the dialog resetting.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,

    /// Send an acknowledgement to the requester when they gave an email.
    #[serde(default = "default_send_confirmation")]
    pub send_confirmation: bool,

    /// Hand off to the mail client when the relay rejects a booking, instead of showing an error.
    #[serde(default)]
    pub fallback_on_failure: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: default_reset_delay_ms(),
            send_confirmation: default_send_confirmation(),
            fallback_on_failure: false,
        }
    }
}

fn default_site_name() -> String {
    "oyatz".to_string()
}

fn default_business_name() -> String {
    "OYATZ Hair".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_RELAY_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_reset_delay_ms() -> u64 {
    2000
}

fn default_send_confirmation() -> bool {
    true
}

impl Config {
    /// Mail-compose only configuration for a given owner inbox.
    pub fn for_owner(owner_email: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                name: default_site_name(),
                business_name: default_business_name(),
                owner_email: owner_email.into(),
                phone_number: String::new(),
            },
            relay: None,
            booking: BookingConfig::default(),
        }
    }

    /// Default location: `~/.config/oyatz/booking.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("oyatz").join("booking.toml"))
    }

    /// Load configuration from the specified path or default location.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = path
            .or_else(Self::default_path)
            .ok_or_else(|| BookingError::Config("Could not determine config path".into()))?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BookingError::Config(format!("Failed to read config from {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML text, expanding `${VAR}` references and validating the result.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        // Expand environment variables, warning on undefined vars.
        let contents = shellexpand::env_with_context_no_errors(contents, |var: &str| {
            match std::env::var(var) {
                Ok(val) => Some(val),
                Err(_) => {
                    warn!(
                        variable = %var,
                        "Environment variable not defined, using empty string"
                    );
                    Some(String::new())
                }
            }
        });

        let config: Config = toml::from_str(&contents)
            .map_err(|e| BookingError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate that required fields are present and properly formatted.
    pub fn validate(&self) -> Result<()> {
        if self.site.owner_email.trim().is_empty() {
            return Err(BookingError::Config("site.owner_email is required".into()));
        }
        if !looks_like_email(self.site.owner_email.trim()) {
            return Err(BookingError::Config(format!(
                "site.owner_email '{}' is not an email address",
                self.site.owner_email
            )));
        }
        if let Some(relay) = self.relay_enabled() {
            let url = url::Url::parse(&relay.endpoint).map_err(|e| {
                BookingError::Config(format!("relay.endpoint is not a valid URL: {}", e))
            })?;
            if url.scheme() != "https" && url.scheme() != "http" {
                return Err(BookingError::Config(
                    "relay.endpoint must use http or https".into(),
                ));
            }
            if relay.timeout_secs == 0 {
                return Err(BookingError::Config(
                    "relay.timeout_secs must be greater than zero".into(),
                ));
            }
        }
        Ok(())
    }

    /// The relay settings, when a usable access key is configured.
    pub fn relay_enabled(&self) -> Option<&RelayConfig> {
        self.relay
            .as_ref()
            .filter(|r| !r.access_key.trim().is_empty())
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.booking.reset_delay_ms)
    }
}
