use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Annotation, JavaClass};

/// Qualified name of the `@Mixin` annotation
pub const MIXIN_ANNOTATION: &str = "org.spongepowered.asm.mixin.Mixin";

/// Qualified name of the `@Invoker` accessor annotation
pub const INVOKER_ANNOTATION: &str = "org.spongepowered.asm.mixin.gen.Invoker";

/// The subset of a mixin configuration (`*.mixins.json`) sidelint consumes.
/// Unknown keys are carried through `extra` so a config can round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixinConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub client: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MixinConfig {
    pub fn from_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::DescriptorError(format!("invalid mixin config: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }

    /// Whether any of the `mixins`/`client`/`server` arrays references the
    /// class with the given qualified name. Entries are relative to the
    /// config's `package`.
    pub fn references_class(&self, qualified: &str) -> bool {
        [&self.mixins, &self.client, &self.server]
            .into_iter()
            .any(|list| list.iter().any(|entry| self.entry_matches(entry, qualified)))
    }

    fn entry_matches(&self, entry: &str, qualified: &str) -> bool {
        match self.package.as_deref() {
            Some(pkg) => qualified == format!("{pkg}.{entry}"),
            None => qualified == entry,
        }
    }
}

/// A mixin config together with where it was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinConfigFile {
    pub path: PathBuf,
    pub config: MixinConfig,
}

fn mixin_annotation(class: &JavaClass) -> Option<&Annotation> {
    class
        .annotations
        .iter()
        .find(|a| match a.qualified_name.as_deref() {
            Some(qualified) => qualified == MIXIN_ANNOTATION,
            None => a.simple_name() == "Mixin",
        })
}

/// Whether a class is a mixin, i.e. carries `@Mixin`
pub fn is_mixin(class: &JavaClass) -> bool {
    mixin_annotation(class).is_some()
}

/// Target class names declared on a class's `@Mixin` annotation, from both
/// the class-literal `value` and the string-based `targets` attribute
pub fn mixin_targets(class: &JavaClass) -> Vec<String> {
    let Some(annotation) = mixin_annotation(class) else {
        return Vec::new();
    };
    let mut targets = Vec::new();
    if let Some(value) = annotation.value() {
        for item in split_array_text(value) {
            if let Some(name) = item.strip_suffix(".class") {
                targets.push(name.to_string());
            }
        }
    }
    if let Some(value) = annotation.attribute("targets") {
        for item in split_array_text(value) {
            let name = item.trim_matches('"');
            if !name.is_empty() {
                targets.push(name.to_string());
            }
        }
    }
    targets
}

/// Split `X` or `{X, Y}` attribute text into trimmed items
fn split_array_text(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testutil::{marker, with_value, ModelBuilder};

    #[test]
    fn test_references_class() {
        let config = MixinConfig {
            package: Some("com.example.mixin".to_string()),
            mixins: vec!["WorldMixin".to_string()],
            client: vec!["render.ScreenMixin".to_string()],
            ..MixinConfig::default()
        };
        assert!(config.references_class("com.example.mixin.WorldMixin"));
        assert!(config.references_class("com.example.mixin.render.ScreenMixin"));
        assert!(!config.references_class("com.example.mixin.OtherMixin"));
        assert!(!config.references_class("WorldMixin"));
    }

    #[test]
    fn test_parse_config_keeps_unknown_keys() {
        let config = MixinConfig::from_str(
            r#"{
                "required": true,
                "package": "com.example.mixin",
                "compatibilityLevel": "JAVA_8",
                "mixins": ["WorldMixin"],
                "injectors": {"defaultRequire": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(config.package.as_deref(), Some("com.example.mixin"));
        assert_eq!(config.mixins, vec!["WorldMixin"]);
        assert!(config.extra.contains_key("required"));
        assert!(config.extra.contains_key("injectors"));
    }

    #[test]
    fn test_mixin_detection_and_targets() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/example/WorldMixin.java", Some("com.example"));
        let single = b.class(
            file,
            "WorldMixin",
            &[with_value("Mixin", MIXIN_ANNOTATION, "World.class")],
        );
        let multi = b.class(
            file,
            "MultiMixin",
            &[with_value("Mixin", MIXIN_ANNOTATION, "{World.class, Chunk.class}")],
        );
        let plain = b.class(file, "Plain", &[marker("Override", "java.lang.Override")]);
        let model = b.finish();

        assert!(is_mixin(model.class(single)));
        assert!(!is_mixin(model.class(plain)));
        assert_eq!(mixin_targets(model.class(single)), vec!["World"]);
        assert_eq!(mixin_targets(model.class(multi)), vec!["World", "Chunk"]);
    }

    #[test]
    fn test_mixin_string_targets() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/example/M.java", Some("com.example"));
        let mut annotation = with_value("Mixin", MIXIN_ANNOTATION, "World.class");
        annotation.values.push((
            "targets".to_string(),
            "{\"net.minecraft.world.chunk.ChunkGenerator\"}".to_string(),
        ));
        let class = b.class(file, "M", std::slice::from_ref(&annotation));
        let model = b.finish();

        assert_eq!(
            mixin_targets(model.class(class)),
            vec!["World", "net.minecraft.world.chunk.ChunkGenerator"]
        );
    }
}
