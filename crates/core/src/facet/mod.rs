//! Modding-platform facet detection.
//!
//! A module qualifies for side analysis only when it belongs to a supported
//! platform; the facet also supplies the module's ambient side (from the
//! Fabric descriptor) and the annotation vocabulary the platform uses.

pub mod detector;
pub mod fabric;
pub mod mcmod;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sideonly::AnnotationFamily;
use crate::types::Side;

pub use detector::FacetDetector;
pub use fabric::{EntryPointValue, Environment, FabricModJson, FABRIC_MOD_JSON};
pub use mcmod::{McmodEntry, McmodInfo, MCMOD_INFO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Forge,
    Fabric,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Forge => "forge",
            Platform::Fabric => "fabric",
        })
    }
}

/// The detected platform of a module together with its companion descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinecraftFacet {
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_json: Option<FabricModJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_json_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcmod_info: Option<McmodInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcmod_info_path: Option<PathBuf>,
}

impl MinecraftFacet {
    pub fn fabric(descriptor: Option<FabricModJson>, path: Option<PathBuf>) -> Self {
        Self {
            platform: Platform::Fabric,
            fabric_json: descriptor,
            fabric_json_path: path,
            mcmod_info: None,
            mcmod_info_path: None,
        }
    }

    pub fn forge(mcmod: Option<(McmodInfo, PathBuf)>) -> Self {
        let (mcmod_info, mcmod_info_path) = match mcmod {
            Some((info, path)) => (Some(info), Some(path)),
            None => (None, None),
        };
        Self {
            platform: Platform::Forge,
            fabric_json: None,
            fabric_json_path: None,
            mcmod_info,
            mcmod_info_path,
        }
    }

    /// The eligibility gate for side analysis: Fabric modules always qualify,
    /// Forge modules only with a legacy `mcmod.info` descriptor present.
    pub fn eligible_for_side_checks(&self) -> bool {
        match self.platform {
            Platform::Fabric => true,
            Platform::Forge => self.mcmod_info.is_some(),
        }
    }

    /// The Fabric environment declared in the descriptor, if any
    pub fn environment(&self) -> Option<Environment> {
        self.fabric_json
            .as_ref()
            .and_then(FabricModJson::declared_environment)
    }

    /// The side implied for unannotated code by the module itself. Forge
    /// carries no module-level restriction; Fabric maps the descriptor's
    /// `environment` field.
    pub fn ambient_side(&self) -> Side {
        match self.platform {
            Platform::Forge => Side::None,
            Platform::Fabric => self.environment().map_or(Side::None, Environment::to_side),
        }
    }

    /// The annotation vocabulary used when suggesting or writing restriction
    /// annotations for this module
    pub fn annotation_family(&self) -> AnnotationFamily {
        match self.platform {
            Platform::Forge => {
                if self.mcmod_info.is_some() {
                    AnnotationFamily::SideOnly
                } else {
                    AnnotationFamily::OnlyIn
                }
            }
            Platform::Fabric => AnnotationFamily::Environment,
        }
    }
}
