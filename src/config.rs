use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "arenagen.toml";

/// Everything a generation run reads besides its command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub data: DataPaths,
    pub dungeon: DungeonDefaults,
    pub wild: WildDefaults,
}

/// JSON data-pack locations, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataPaths {
    pub exe_tables: PathBuf,
    pub names: PathBuf,
    pub inf: PathBuf,
    pub prefabs: PathBuf,
    pub city: PathBuf,
    /// The city's premade skeleton MIF.
    pub city_skeleton: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            exe_tables: PathBuf::from("data/exe_tables.json"),
            names: PathBuf::from("data/names.json"),
            inf: PathBuf::from("data/city.inf.json"),
            prefabs: PathBuf::from("data/prefabs.json"),
            city: PathBuf::from("data/city.json"),
            city_skeleton: PathBuf::from("data/city_skeleton.json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DungeonDefaults {
    pub seed: u32,
    pub width_chunks: usize,
    pub depth_chunks: usize,
    pub is_artifact: bool,
}

impl Default for DungeonDefaults {
    fn default() -> Self {
        Self {
            seed: 0,
            width_chunks: 2,
            depth_chunks: 2,
            is_artifact: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WildDefaults {
    /// Falls back to the city definition's wild seed.
    pub seed: Option<u32>,
}

impl GenerationConfig {
    /// Load from `path`. A missing file at the default location yields the defaults; any
    /// other read or parse failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("failed to parse {}", path.display())),
            Err(err)
                if err.kind() == std::io::ErrorKind::NotFound
                    && path == Path::new(DEFAULT_CONFIG_PATH) =>
            {
                warn!("config not found at {}. Using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = GenerationConfig::parse(
            r#"
            [data]
            prefabs = "packs/prefabs.json"

            [dungeon]
            seed = 42
            is_artifact = true
            "#,
        )
        .unwrap();
        assert_eq!(config.data.prefabs, PathBuf::from("packs/prefabs.json"));
        assert_eq!(config.data.names, PathBuf::from("data/names.json"));
        assert_eq!(config.dungeon.seed, 42);
        assert!(config.dungeon.is_artifact);
        assert_eq!(config.dungeon.width_chunks, 2);
        assert_eq!(config.wild.seed, None);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = GenerationConfig::default();
        config.wild.seed = Some(7);
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(GenerationConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = GenerationConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = GenerationConfig::load(&path).unwrap();
        assert_eq!(config.dungeon.width_chunks, 2);
    }
}
