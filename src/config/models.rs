//! Configuration data structures for the sdapi-venice bridge.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream Venice connection, the translation behaviour of the
//! gateway and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Venice API settings.
    #[serde(default)]
    pub venice: VeniceConfig,

    /// Request/response translation behaviour.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `9900`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body in bytes.
    /// Default: 10 MiB
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for the upstream Venice API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeniceConfig {
    /// Base URL of the Venice REST API.
    /// Default: `https://api.venice.ai/api/v1`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model checkpoint selected at startup.
    /// Default: `fluently-xl`
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in seconds. Unset leaves reqwest's defaults in place.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Name of the environment variable holding the bearer token.
    /// Default: `VENICE_KEY`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Translation behaviour of the gateway.
///
/// The defaults describe the full-featured shim. [`GatewayConfig::legacy`]
/// describes the older variant that forwarded dimensions untouched and knew
/// nothing about style presets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// Cap `width`/`height` at `max_dimension`.
    #[serde(default = "default_true")]
    pub enforce_dimension_cutout: bool,

    /// Forward `override_settings.sd_vae` as a style preset and serve `/sdapi/v1/sd-vae`.
    #[serde(default = "default_true")]
    pub support_style_preset: bool,

    /// Ask Venice for image models only (`?type=image`).
    #[serde(default = "default_true")]
    pub filter_model_listing: bool,

    /// Default: `1280`
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Maximum prompt length in characters.
    /// Default: `1024`
    #[serde(default = "default_prompt_cutout")]
    pub prompt_cutout: usize,

    /// Steps used when a txt2img request does not carry any.
    #[serde(default = "default_steps")]
    pub default_steps: u32,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl GatewayConfig {
    /// Minimal shim: no dimension cap, no style presets, unfiltered model listing.
    pub fn legacy() -> Self {
        let mut gateway = Self::default();
        gateway.switch_to_legacy();
        gateway
    }

    /// Flip the variant switches to the minimal shim, keeping limits such as
    /// `max_dimension` and `prompt_cutout` as configured.
    pub fn switch_to_legacy(&mut self) {
        self.enforce_dimension_cutout = false;
        self.support_style_preset = false;
        self.filter_model_listing = false;
        self.default_steps = 25;
    }
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for VeniceConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_model: default_model(),
            timeout_seconds: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enforce_dimension_cutout: true,
            support_style_preset: true,
            filter_model_listing: true,
            max_dimension: default_max_dimension(),
            prompt_cutout: default_prompt_cutout(),
            default_steps: default_steps(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9900
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_api_base_url() -> String {
    "https://api.venice.ai/api/v1".to_string()
}

fn default_model() -> String {
    "fluently-xl".to_string()
}

fn default_api_key_env() -> String {
    "VENICE_KEY".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_dimension() -> u32 {
    1280
}

fn default_prompt_cutout() -> usize {
    1024
}

fn default_steps() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
