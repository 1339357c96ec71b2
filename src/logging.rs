use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "hostpulse=info";

/// Installs the global subscriber writing to `path`. The terminal belongs to
/// the dashboard, so nothing is logged unless a file is given.
pub fn init_file(path: &Path, json: bool) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::options().create(true).append(true).open(path)?;

    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file));

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
