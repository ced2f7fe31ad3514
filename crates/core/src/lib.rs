//! sidelint-core - analysis of Minecraft mod sources for side/environment
//! correctness
//!
//! This crate provides functionality to:
//! - Parse Java source files into an element model (classes, members,
//!   annotations, supertype references)
//! - Detect which modding platform a module belongs to (Forge, Fabric) from
//!   its descriptor files
//! - Resolve the execution side (client/server) of classes, methods and
//!   fields from restriction annotations, the module's ambient environment
//!   and the class hierarchy
//! - Check mixin classes against mixin configurations and validate Fabric
//!   entrypoint declarations

pub mod analyzer;
pub mod cache;
pub mod error;
pub mod facet;
pub mod inspection;
pub mod mixin;
pub mod model;
pub mod parser;
pub mod sideonly;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use analyzer::ModuleAnalyzer;
pub use inspection::{CheckId, Diagnostic, Severity};
pub use model::ModuleModel;
pub use sideonly::{beginning_check, SideResolver};
