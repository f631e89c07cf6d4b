//! Configuration command.

use std::path::Path;

use anyhow::Context;

use crate::config::{self, Config};

/// Print the effective configuration, or write defaults with `--init`.
pub fn cmd_config(config: &Config, path: Option<&Path>, init: bool) -> anyhow::Result<()> {
    if init {
        let defaults = Config::default();
        let written = match path {
            Some(path) => config::save_to(&defaults, path).map(|()| path.to_path_buf()),
            None => config::save(&defaults),
        }
        .context("Failed to write config file")?;
        println!("Wrote default configuration to {}", written.display());
        return Ok(());
    }

    let location = path
        .map(Path::to_path_buf)
        .or_else(config::config_path);
    if let Some(location) = location {
        println!("# {}", location.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
