//! The two config sources: project `.env` and the `[env]` table of the XDG `config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

fn xdg_config_path(app_name: &str) -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    let path = base.join(app_name).join("config.toml");
    path.is_file().then_some(path)
}

/// Key-value pairs from the `[env]` table of `$XDG_CONFIG_HOME/<app>/config.toml`.
/// A missing file or empty table yields an empty map.
pub(crate) fn xdg_env_table(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = xdg_config_path(app_name) else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(&path).map_err(LoadError::ConfigRead)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file.env)
}

/// Key-value pairs from `.env` in `override_dir` (or the current directory).
/// A missing file yields an empty map.
pub(crate) fn dotenv_table(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(d) => d,
            Err(_) => return Ok(HashMap::new()),
        },
    };
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::DotenvRead)?;
    Ok(parse_dotenv(&content))
}

/// Minimal `.env` parser: `KEY=VALUE` per line, `#` comment lines and blanks skipped,
/// key and value trimmed, matching surrounding quotes stripped. No multiline values.
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut table = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        table.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    table
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
