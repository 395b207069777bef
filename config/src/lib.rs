//! Configuration loading for credo: project `.env` and XDG `config.toml`, applied to
//! the process environment with priority **existing env > .env > XDG**.
//!
//! The CLI calls [`load_and_apply`] once at startup so `GROQ_API_KEY` and friends can
//! live in `~/.config/credo/config.toml` or a project `.env` instead of the shell.

mod sources;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read config.toml: {0}")]
    ConfigRead(std::io::Error),
    #[error("parse config.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads the `[env]` table from `$XDG_CONFIG_HOME/<app_name>/config.toml` and the
/// project `.env`, then sets each key that is **not** already present in the process
/// environment. `.env` shadows the XDG table; existing env shadows both.
///
/// * `app_name`: XDG subdirectory, e.g. `"credo"` for `~/.config/credo/config.toml`.
/// * `override_dir`: where to look for `.env`; defaults to the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let mut merged: HashMap<String, String> = sources::xdg_env_table(app_name)?;
    merged.extend(sources::dotenv_table(override_dir)?);

    for (key, value) in merged {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}
