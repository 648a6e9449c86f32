// sdapi-venice - Stable Diffusion WebUI API compatible proxy for Venice
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod settings;
pub mod translation;
pub mod utils;
pub mod venice;
