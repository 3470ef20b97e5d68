use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::{ConfigFile, PurityConfig};
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".puritycheck.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse the TOML contents of a config file and normalize the result
pub fn parse_and_validate_config(contents: &str) -> Result<PurityConfig> {
    let file = toml::from_str::<ConfigFile>(contents).map_err(|e| {
        Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })?;
    let mut config = file.purity;
    config.normalize();
    Ok(config)
}

/// Load a config file the user named explicitly; any failure is an error
pub fn load_config_from_path(path: &Path) -> Result<PurityConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(path: &Path) -> Option<PurityConfig> {
    let contents = match read_config_file(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, path.display());
            Some(PurityConfig::default())
        }
    }
}

/// `start` followed by its parents, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.puritycheck.toml` from `start` upwards.
///
/// The nearest file wins, even when it fails to parse: a broken config
/// falls back to defaults with a warning rather than silently picking up a
/// file further up.
pub fn load_config_from(start: PathBuf) -> PurityConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PurityConfig::default()
        })
}

/// Discover the config from the working directory
pub fn load_config() -> PurityConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            PurityConfig::default()
        }
    }
}
