use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use steno_config::Config;

/// Config shipped next to the binary's working directory
const LOCAL_CONFIG: &str = "config.json";

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Explicit config file, else `config.json` if present, else environment
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        load_config_file(local)
    } else {
        tracing::debug!("No {LOCAL_CONFIG} found, using environment");
        Ok(Config::new())
    }
}

/// Write `config` to `path` unless a file is already there
pub fn write_config(config: &Config, path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        tracing::warn!("Config {} already exists, leaving it alone", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    tracing::info!("Created config at {}", path.display());
    Ok(true)
}
