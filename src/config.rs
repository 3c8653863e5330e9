use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::ImportPolicy;
use crate::storage::schema::DATABASE_FILE_NAME;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MovieStoreConfig {
    pub database: Option<String>,
    pub import_policy: Option<ImportPolicy>,
    /// Seed file imported by `moviestore import` when `--file` is omitted
    pub seed: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("moviestore.toml")
}

/// Application-local storage directory under `base`
pub fn default_storage_dir_in(base: &Path) -> PathBuf {
    base.join(".moviestore")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    default_storage_dir_in(base).join(DATABASE_FILE_NAME)
}

/// Pick the database path: explicit flag, then config, then the default under `base`.
pub fn resolve_database_path(
    explicit: Option<&Path>,
    config: Option<&MovieStoreConfig>,
    base: &Path,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_database_path_in(base))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<MovieStoreConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: MovieStoreConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &MovieStoreConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
