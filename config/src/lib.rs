//! Load configuration from XDG `config.toml` and project `.env`, apply it to the process
//! environment with priority **existing env > .env > XDG**, and resolve typed [`Settings`].

mod dotenv;
mod settings;
mod xdg_toml;

pub use settings::Settings;

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Application name used for the XDG config directory (`~/.config/relay/config.toml`).
pub const APP_NAME: &str = "relay";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads `.env` and the XDG `[env]` table, then sets only those variables that are **not**
/// already present in the process environment.
///
/// For a key missing from the environment, the `.env` value (current directory, or
/// `override_dir` when given) wins over the XDG value.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let keys: HashSet<&String> = xdg_map.keys().chain(dotenv_map.keys()).collect();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) {
            std::env::set_var(key, v);
        }
    }
    Ok(())
}

/// Applies `.env`/XDG config for [`APP_NAME`] and reads [`Settings`] from the environment.
pub fn load_settings(override_dir: Option<&Path>) -> Result<Settings, LoadError> {
    load_and_apply(APP_NAME, override_dir)?;
    Ok(Settings::from_env())
}

#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
