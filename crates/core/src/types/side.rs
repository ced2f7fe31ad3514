use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sideonly::AnnotationFamily;

/// The execution side a piece of code is restricted to.
///
/// `None` means no restriction applies (or none could be determined);
/// `Invalid` means a restriction annotation exists but is malformed. Both are
/// ordinary values, never errors: callers surface `Invalid` to the user as a
/// diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
    None,
    Invalid,
}

impl Side {
    /// The member spelling used when writing an annotation of the given
    /// family, e.g. `Side::Server` in the `OnlyIn` family is spelled
    /// `Dist.DEDICATED_SERVER`.
    pub fn annotation_member(self, family: AnnotationFamily) -> &'static str {
        match (self, family) {
            (Side::Client, AnnotationFamily::SideOnly) => "Side.CLIENT",
            (Side::Client, AnnotationFamily::OnlyIn) => "Dist.CLIENT",
            (Side::Client, AnnotationFamily::Environment) => "EnvType.CLIENT",
            (Side::Server, AnnotationFamily::SideOnly) => "Side.SERVER",
            (Side::Server, AnnotationFamily::OnlyIn) => "Dist.DEDICATED_SERVER",
            (Side::Server, AnnotationFamily::Environment) => "EnvType.SERVER",
            (Side::None, _) => "NONE",
            (Side::Invalid, _) => "INVALID",
        }
    }

    /// True for `Client` and `Server`, the two sides that actually restrict
    /// where code may run.
    pub fn is_restricted(self) -> bool {
        matches!(self, Side::Client | Side::Server)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Client => "client",
            Side::Server => "server",
            Side::None => "none",
            Side::Invalid => "invalid",
        };
        f.write_str(name)
    }
}
