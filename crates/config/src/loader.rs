//! RON loading for [`Config`].

use std::{fs, path::Path};

use tracing::debug;

use crate::{Config, Error, Result};

/// Parse a configuration from a RON string and validate it.
pub fn from_str(ron: &str) -> Result<Config> {
    let cfg: Config = ron::from_str(ron)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load a configuration from a RON file and validate it.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = from_str(&text)?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}
