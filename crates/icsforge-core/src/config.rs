use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{
    CALSCALE_GREGORIAN, CONFIG_FILE_NAME, DEFAULT_FOLD_LIMIT, ENV_PREFIX, ICAL_VERSION,
    METHOD_PUBLISH, PRODUCT_ID,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Calendar-level metadata applied to every generated calendar.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub product_id: String,
    pub version: String,
    pub calscale: String,
    /// Publish method; an empty value omits `METHOD`.
    pub method: Option<String>,
    /// Display name emitted as `X-WR-CALNAME`.
    pub name: Option<String>,
    pub default_timezone: Option<String>,
    /// Embed static `VTIMEZONE` blocks for referenced zones.
    pub include_vtimezone: bool,
    /// Line folding limit in octets. `0` disables folding.
    pub fold_limit: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            product_id: PRODUCT_ID.to_string(),
            version: ICAL_VERSION.to_string(),
            calscale: CALSCALE_GREGORIAN.to_string(),
            method: Some(METHOD_PUBLISH.to_string()),
            name: None,
            default_timezone: None,
            include_vtimezone: false,
            fold_limit: DEFAULT_FOLD_LIMIT,
        }
    }
}

impl CalendarConfig {
    /// ## Summary
    /// Checks that the envelope properties required by RFC 5545 are present.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first blank field.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value) in [
            ("product_id", &self.product_id),
            ("version", &self.version),
            ("calscale", &self.calscale),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "calendar.{field} must not be blank"
                )));
            }
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder seeded with the built-in defaults.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be registered.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("calendar.product_id", PRODUCT_ID)?
            .set_default("calendar.version", ICAL_VERSION)?
            .set_default("calendar.calscale", CALSCALE_GREGORIAN)?
            .set_default("calendar.method", METHOD_PUBLISH)?
            .set_default("calendar.include_vtimezone", false)?)
    }

    /// ## Summary
    /// Loads configuration from the optional `icsforge.toml` file and
    /// `ICSFORGE__*` environment variables into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings
            .calendar
            .validate()
            .map_err(|e| CoreError::ConfigError(e.to_string()))?;

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}
