//! NPC name chunk lists and per-race construction rules.

use serde::{Deserialize, Serialize};

use crate::loader::DataPack;
use crate::AssetError;

/// One step of a name construction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NameRule {
    /// Append a random entry of a chunk list.
    Index {
        /// Chunk list index.
        chunk: usize,
    },
    /// Append a literal.
    String {
        /// Literal text.
        text: String,
    },
    /// Append a random chunk entry when `next() % 100 <= chance`.
    IndexChance {
        /// Chunk list index.
        chunk: usize,
        /// Percentage threshold.
        chance: u32,
    },
    /// Like [`NameRule::IndexChance`], followed by a literal when it fires.
    IndexStringChance {
        /// Chunk list index.
        chunk: usize,
        /// Literal appended after the chunk entry.
        text: String,
        /// Percentage threshold.
        chance: u32,
    },
}

impl NameRule {
    fn chunk(&self) -> Option<usize> {
        match self {
            Self::Index { chunk }
            | Self::IndexChance { chunk, .. }
            | Self::IndexStringChance { chunk, .. } => Some(*chunk),
            Self::String { .. } => None,
        }
    }
}

/// Name chunk lists plus the rule list for each `(race, sex)` pair.
///
/// Rules are indexed by `race * 2 + (female as usize)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameTables {
    /// Chunk lists rules draw from.
    pub chunks: Vec<Vec<String>>,
    /// Rule lists.
    pub rules: Vec<Vec<NameRule>>,
}

impl NameTables {
    /// Rule list for a race and sex.
    pub fn rules_for(&self, race: usize, is_male: bool) -> Option<&[NameRule]> {
        let index = race * 2 + usize::from(!is_male);
        self.rules.get(index).map(Vec::as_slice)
    }
}

impl DataPack for NameTables {
    fn validate(&self) -> Result<(), AssetError> {
        for (rule_list, rules) in self.rules.iter().enumerate() {
            for rule in rules {
                let Some(chunk) = rule.chunk() else {
                    continue;
                };
                match self.chunks.get(chunk) {
                    Some(list) if !list.is_empty() => {}
                    Some(_) => {
                        return Err(AssetError::Invalid(format!(
                            "rule list {rule_list} draws from empty chunk list {chunk}"
                        )))
                    }
                    None => {
                        return Err(AssetError::Invalid(format!(
                            "rule list {rule_list} references missing chunk list {chunk}"
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}
