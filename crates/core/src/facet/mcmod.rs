use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the legacy Forge mod descriptor file
pub const MCMOD_INFO: &str = "mcmod.info";

/// One mod entry in `mcmod.info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McmodEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The legacy Forge descriptor. Two formats exist in the wild: a bare array
/// of mod entries, and an object wrapping the array under `modList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McmodInfo {
    pub mods: Vec<McmodEntry>,
}

#[derive(Deserialize)]
struct McmodInfoV2 {
    #[serde(default, rename = "modList")]
    mod_list: Vec<McmodEntry>,
}

impl McmodInfo {
    pub fn from_str(text: &str) -> Result<Self> {
        if let Ok(mods) = serde_json::from_str::<Vec<McmodEntry>>(text) {
            return Ok(Self { mods });
        }
        serde_json::from_str::<McmodInfoV2>(text)
            .map(|v2| Self { mods: v2.mod_list })
            .map_err(|e| Error::DescriptorError(format!("invalid {MCMOD_INFO}: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}
