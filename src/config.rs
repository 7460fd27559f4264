use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::gemini;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Deserialize, Debug)]
pub struct Server {
    #[serde(default = "default_listen_host")]
    pub listen_host: String,

    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_listen_host() -> String {
    "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

pub struct Config {
    pub server: Server,
    pub gemini: gemini::Setting,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: envy::from_env()?,
            gemini: envy::from_env()?,
        })
    }
}

pub fn init() -> Result<()> {
    if CONFIG.set(Config::from_env()?).is_err() {
        return Err(anyhow!("Failed to set CONFIG"));
    }

    Ok(())
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("config::init was not called")
}
