use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::AssetError;

/// A JSON data pack with optional consistency checks.
pub trait DataPack: DeserializeOwned {
    /// Validate contents after parsing.
    fn validate(&self) -> Result<(), AssetError> {
        Ok(())
    }
}

/// Parse and validate a pack from an in-memory JSON string.
pub fn parse_pack<T: DataPack>(input: &str) -> Result<T, AssetError> {
    let pack: T = serde_json::from_str(input)?;
    pack.validate()?;
    Ok(pack)
}

/// Load and validate a pack from the provided JSON file path.
pub fn load_pack<T: DataPack>(path: &Path) -> Result<T, AssetError> {
    let data = fs::read_to_string(path)?;
    let pack = parse_pack(&data)?;
    tracing::debug!(path = %path.display(), "loaded data pack");
    Ok(pack)
}
