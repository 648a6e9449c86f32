// CLI module for sdapi-venice
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// sdapi-venice - Stable Diffusion WebUI API compatible proxy for Venice
#[derive(Parser, Debug)]
#[command(name = "sdapi-venice", version, about, long_about = None)]
pub struct Args {
    /// Config file (TOML). Defaults to ~/.sdapi-venice/config.toml when present
    #[arg(long, short, env = "SDAPI_VENICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Env file loaded before reading the API key. Defaults to ./.env when present
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Behave like the minimal shim: no dimension cap, no style presets, no /sd-vae.
    /// Other gateway limits from the config file are kept
    #[arg(long)]
    pub legacy: bool,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.legacy {
            config.gateway.switch_to_legacy();
        }
    }
}
