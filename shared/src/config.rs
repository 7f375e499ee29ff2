//! Public client configuration.
//!
//! These settings are shipped to the browser as `window.__TIMEFUL_CONFIG__` and
//! toggle the optional integrations. Every key is optional; an absent or empty
//! value disables the integration it guards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prefix for environment variables holding public config keys
pub const ENV_PREFIX: &str = "TIMEFUL_";

/// Global the browser bundle reads its config from
pub const SCRIPT_GLOBAL: &str = "window.__TIMEFUL_CONFIG__";

const DEFAULT_BLOG_BUTTON_TEXT: &str = "Blog";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a boolean, got {value:?}")]
    InvalidBool { var: String, value: String },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicConfig {
    /// Google OAuth client id, required for login and calendar features
    pub google_client_id: String,
    /// Microsoft OAuth client id for Outlook calendar integration
    pub microsoft_client_id: String,
    pub posthog_api_key: String,
    /// Turns off every analytics integration, even when a key is present
    pub disable_analytics: bool,
    pub enable_advertising: bool,
    /// Load DM Sans from the Google Fonts CDN instead of the system font stack
    pub enable_google_fonts: bool,
    /// Mapbox key for address autocomplete
    pub mapbox_api_key: String,
    pub blog_url: String,
    pub blog_button_text: String,
    pub blog_enabled: bool,
}

/// Target of the header blog button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogLink {
    pub url: String,
    pub text: String,
}

/// Resolved view of which optional integrations are on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub google_login: bool,
    pub outlook_calendar: bool,
    pub analytics: bool,
    pub advertising: bool,
    pub google_fonts: bool,
    pub address_autocomplete: bool,
    pub blog: Option<BlogLink>,
}

fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

impl PublicConfig {
    /// The values shipped in the deployment template.
    pub fn example() -> Self {
        Self {
            blog_url: "https://schej-blog.vercel.app/blog/".to_string(),
            blog_button_text: DEFAULT_BLOG_BUTTON_TEXT.to_string(),
            blog_enabled: true,
            ..Self::default()
        }
    }

    /// Load from `TIMEFUL_*` environment variables.
    ///
    /// Unset variables keep their defaults, e.g. `TIMEFUL_MAPBOX_API_KEY`
    /// populates `mapbox_api_key`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup, keyed by full variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str| lookup(&format!("{ENV_PREFIX}{key}")).unwrap_or_default();
        let flag = |key: &str| -> Result<bool, ConfigError> {
            let var = format!("{ENV_PREFIX}{key}");
            match lookup(&var) {
                Some(value) => parse_bool(&var, &value),
                None => Ok(false),
            }
        };

        Ok(Self {
            google_client_id: string("GOOGLE_CLIENT_ID"),
            microsoft_client_id: string("MICROSOFT_CLIENT_ID"),
            posthog_api_key: string("POSTHOG_API_KEY"),
            disable_analytics: flag("DISABLE_ANALYTICS")?,
            enable_advertising: flag("ENABLE_ADVERTISING")?,
            enable_google_fonts: flag("ENABLE_GOOGLE_FONTS")?,
            mapbox_api_key: string("MAPBOX_API_KEY"),
            blog_url: string("BLOG_URL"),
            blog_button_text: string("BLOG_BUTTON_TEXT"),
            blog_enabled: flag("BLOG_ENABLED")?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn google_login_enabled(&self) -> bool {
        is_set(&self.google_client_id)
    }

    pub fn outlook_calendar_enabled(&self) -> bool {
        is_set(&self.microsoft_client_id)
    }

    pub fn analytics_enabled(&self) -> bool {
        !self.disable_analytics && is_set(&self.posthog_api_key)
    }

    pub fn advertising_enabled(&self) -> bool {
        self.enable_advertising
    }

    pub fn google_fonts_enabled(&self) -> bool {
        self.enable_google_fonts
    }

    pub fn address_autocomplete_enabled(&self) -> bool {
        is_set(&self.mapbox_api_key)
    }

    pub fn blog_link(&self) -> Option<BlogLink> {
        if !self.blog_enabled || !is_set(&self.blog_url) {
            return None;
        }

        let text = if is_set(&self.blog_button_text) {
            self.blog_button_text.trim().to_string()
        } else {
            DEFAULT_BLOG_BUTTON_TEXT.to_string()
        };

        Some(BlogLink {
            url: self.blog_url.trim().to_string(),
            text,
        })
    }

    pub fn features(&self) -> FeatureFlags {
        FeatureFlags {
            google_login: self.google_login_enabled(),
            outlook_calendar: self.outlook_calendar_enabled(),
            analytics: self.analytics_enabled(),
            advertising: self.advertising_enabled(),
            google_fonts: self.google_fonts_enabled(),
            address_autocomplete: self.address_autocomplete_enabled(),
            blog: self.blog_link(),
        }
    }

    /// Render as the script the browser bundle loads before booting.
    pub fn to_script(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(format!("{SCRIPT_GLOBAL} = {json};\n"))
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
