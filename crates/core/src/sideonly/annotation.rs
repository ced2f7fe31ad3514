use serde::{Deserialize, Serialize};

use crate::model::Annotation;
use crate::types::Side;

/// The three restriction-annotation vocabularies, as tagged dispatch: each
/// family knows its annotation's qualified name, its value enum and the
/// member spellings that map to a side. Keeping the tables here avoids
/// string-prefix handling at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationFamily {
    /// Legacy Forge: `@SideOnly(Side.CLIENT)`
    SideOnly,
    /// Modern Forge: `@OnlyIn(Dist.DEDICATED_SERVER)`
    OnlyIn,
    /// Fabric: `@Environment(EnvType.CLIENT)`
    Environment,
}

impl AnnotationFamily {
    pub const ALL: [AnnotationFamily; 3] = [
        AnnotationFamily::SideOnly,
        AnnotationFamily::OnlyIn,
        AnnotationFamily::Environment,
    ];

    /// Qualified name of the annotation type
    pub fn annotation_name(self) -> &'static str {
        match self {
            AnnotationFamily::SideOnly => "net.minecraftforge.fml.relauncher.SideOnly",
            AnnotationFamily::OnlyIn => "net.minecraftforge.api.distmarker.OnlyIn",
            AnnotationFamily::Environment => "net.fabricmc.api.Environment",
        }
    }

    /// Qualified name of the enum used as the annotation's `value`
    pub fn value_enum(self) -> &'static str {
        match self {
            AnnotationFamily::SideOnly => "net.minecraftforge.fml.relauncher.Side",
            AnnotationFamily::OnlyIn => "net.minecraftforge.api.distmarker.Dist",
            AnnotationFamily::Environment => "net.fabricmc.api.EnvType",
        }
    }

    pub fn simple_name(self) -> &'static str {
        match self {
            AnnotationFamily::SideOnly => "SideOnly",
            AnnotationFamily::OnlyIn => "OnlyIn",
            AnnotationFamily::Environment => "Environment",
        }
    }

    fn side_of_member(self, member: &str) -> Side {
        match (self, member) {
            (AnnotationFamily::SideOnly, "Side.SERVER") => Side::Server,
            (AnnotationFamily::SideOnly, "Side.CLIENT") => Side::Client,
            (AnnotationFamily::OnlyIn, "Dist.DEDICATED_SERVER") => Side::Server,
            (AnnotationFamily::OnlyIn, "Dist.CLIENT") => Side::Client,
            (AnnotationFamily::Environment, "EnvType.SERVER") => Side::Server,
            (AnnotationFamily::Environment, "EnvType.CLIENT") => Side::Client,
            _ => Side::Invalid,
        }
    }
}

/// Strip the package from a value written with its full enum path, so
/// `net.fabricmc.api.EnvType.SERVER` compares as `EnvType.SERVER`
fn normalize(text: &str) -> &str {
    for family in AnnotationFamily::ALL {
        let value_enum = family.value_enum();
        if text.starts_with(value_enum) {
            let package_end = value_enum.rfind('.').map_or(0, |i| i + 1);
            return &text[package_end..];
        }
    }
    text
}

/// Map a restriction annotation's value text to a side. Any spelling outside
/// the three recognized families is `Invalid`.
pub fn resolve_annotation_side(text: &str) -> Side {
    let normalized = normalize(text.trim());
    for family in AnnotationFamily::ALL {
        let side = family.side_of_member(normalized);
        if side != Side::Invalid {
            return side;
        }
    }
    Side::Invalid
}

/// Which family an annotation belongs to, if any. Resolved qualified names
/// are matched exactly; an unresolved annotation falls back to its simple
/// name, so sources without imports are still recognized.
pub fn family_of(annotation: &Annotation) -> Option<AnnotationFamily> {
    AnnotationFamily::ALL.into_iter().find(|family| {
        match annotation.qualified_name.as_deref() {
            Some(qualified) => qualified == family.annotation_name(),
            None => annotation.simple_name() == family.simple_name(),
        }
    })
}

/// The first restriction annotation in a declaration's annotation list,
/// checking the families in their historical order
pub fn find_side_annotation(annotations: &[Annotation]) -> Option<&Annotation> {
    AnnotationFamily::ALL
        .into_iter()
        .find_map(|family| {
            annotations.iter().find(|a| match a.qualified_name.as_deref() {
                Some(qualified) => qualified == family.annotation_name(),
                None => a.simple_name() == family.simple_name(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testutil::{marker, with_value};

    #[test]
    fn test_server_spellings_resolve_to_server() {
        for member in ["Side.SERVER", "Dist.DEDICATED_SERVER", "EnvType.SERVER"] {
            assert_eq!(resolve_annotation_side(member), Side::Server, "{member}");
        }
    }

    #[test]
    fn test_client_spellings_resolve_to_client() {
        for member in ["Side.CLIENT", "Dist.CLIENT", "EnvType.CLIENT"] {
            assert_eq!(resolve_annotation_side(member), Side::Client, "{member}");
        }
    }

    #[test]
    fn test_qualified_spellings_are_normalized() {
        assert_eq!(
            resolve_annotation_side("net.minecraftforge.fml.relauncher.Side.SERVER"),
            Side::Server
        );
        assert_eq!(
            resolve_annotation_side("net.minecraftforge.api.distmarker.Dist.CLIENT"),
            Side::Client
        );
        assert_eq!(
            resolve_annotation_side("net.fabricmc.api.EnvType.SERVER"),
            Side::Server
        );
    }

    #[test]
    fn test_unrecognized_spellings_are_invalid() {
        for member in ["Side.BOTH", "Dist.SERVER", "EnvType.BOTH", "CLIENT", ""] {
            assert_eq!(resolve_annotation_side(member), Side::Invalid, "{member}");
        }
    }

    #[test]
    fn test_family_matching() {
        let env = with_value("Environment", "net.fabricmc.api.Environment", "EnvType.CLIENT");
        assert_eq!(family_of(&env), Some(AnnotationFamily::Environment));

        // Unresolved annotations match by simple name
        let mut bare = env.clone();
        bare.qualified_name = None;
        assert_eq!(family_of(&bare), Some(AnnotationFamily::Environment));

        // A same-named annotation from another package does not match
        let mut foreign = env;
        foreign.qualified_name = Some("com.example.Environment".to_string());
        assert_eq!(family_of(&foreign), None);

        let unrelated = marker("Override", "java.lang.Override");
        assert_eq!(family_of(&unrelated), None);
    }

    #[test]
    fn test_find_side_annotation_prefers_family_order() {
        let only_in = with_value(
            "OnlyIn",
            "net.minecraftforge.api.distmarker.OnlyIn",
            "Dist.CLIENT",
        );
        let env = with_value("Environment", "net.fabricmc.api.Environment", "EnvType.SERVER");
        let annotations = vec![env.clone(), only_in.clone()];

        let found = find_side_annotation(&annotations).expect("annotation");
        assert_eq!(found.name, "OnlyIn");

        assert!(find_side_annotation(&[marker("Override", "java.lang.Override")]).is_none());
    }
}
