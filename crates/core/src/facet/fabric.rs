use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Side;

/// Name of the Fabric mod descriptor file
pub const FABRIC_MOD_JSON: &str = "fabric.mod.json";

pub const MOD_INITIALIZER: &str = "net.fabricmc.api.ModInitializer";
pub const CLIENT_MOD_INITIALIZER: &str = "net.fabricmc.api.ClientModInitializer";

/// The environment a Fabric mod declares in its descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Both,
    Client,
    Server,
}

impl Environment {
    /// The descriptor spelling: `*`, `client` or `server`
    pub fn pattern(self) -> &'static str {
        match self {
            Environment::Both => "*",
            Environment::Client => "client",
            Environment::Server => "server",
        }
    }

    pub fn allow_client(self) -> bool {
        self != Environment::Server
    }

    pub fn allow_server(self) -> bool {
        self != Environment::Client
    }

    pub fn from_pattern(pattern: &str) -> Option<Self> {
        match pattern {
            "*" => Some(Environment::Both),
            "client" => Some(Environment::Client),
            "server" => Some(Environment::Server),
            _ => None,
        }
    }

    /// The side restriction this environment implies for code in the module.
    /// `Both` restricts nothing.
    pub fn to_side(self) -> Side {
        match self {
            Environment::Client => Side::Client,
            Environment::Server => Side::Server,
            Environment::Both => Side::None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// An entrypoint entry in `fabric.mod.json`: either a plain class reference
/// or the object form carrying a language adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPointValue {
    Reference(String),
    Adapted {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        adapter: Option<String>,
        value: String,
    },
}

impl EntryPointValue {
    pub fn reference(&self) -> &str {
        match self {
            EntryPointValue::Reference(s) => s,
            EntryPointValue::Adapted { value, .. } => value,
        }
    }
}

/// The subset of `fabric.mod.json` sidelint consumes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FabricModJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub entrypoints: BTreeMap<String, Vec<EntryPointValue>>,
    /// Mixin config file names, relative to the resource root
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
}

impl FabricModJson {
    pub fn from_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::DescriptorError(format!("invalid {FABRIC_MOD_JSON}: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }

    /// The declared environment, if it is one of the recognized patterns
    pub fn declared_environment(&self) -> Option<Environment> {
        self.environment.as_deref().and_then(Environment::from_pattern)
    }
}
