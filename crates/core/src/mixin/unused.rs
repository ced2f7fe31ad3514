use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ClassId, JavaClass, ModuleModel};
use crate::sideonly::SideResolver;
use crate::types::Side;

use super::config::{self, MixinConfigFile};

/// A structured edit registering a mixin class in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinConfigEdit {
    pub config_path: PathBuf,
    /// Target array: `mixins`, `client` or `server`
    pub key: String,
    /// Class name relative to the config's `package`
    pub entry: String,
}

/// A mixin class no config references, with the edit that would register it
#[derive(Debug, Clone)]
pub struct UnusedMixin {
    pub class: ClassId,
    pub quick_fix: Option<MixinConfigEdit>,
}

/// Find mixin classes that appear in none of the module's mixin configs
pub fn find_unused_mixins(module: &ModuleModel, resolver: &mut SideResolver) -> Vec<UnusedMixin> {
    let mut unused = Vec::new();
    for (id, class) in module.classes() {
        if !config::is_mixin(class) {
            continue;
        }
        if module
            .mixin_configs
            .iter()
            .any(|c| c.config.references_class(&class.qualified_name))
        {
            continue;
        }
        tracing::debug!("Mixin {} not referenced by any config", class.qualified_name);
        unused.push(UnusedMixin {
            class: id,
            quick_fix: select_quick_fix(module, resolver, id, class),
        });
    }
    unused
}

/// Pick the config whose `package` is the longest prefix of the class's
/// qualified name, and the target array matching the class's resolved side
fn select_quick_fix(
    module: &ModuleModel,
    resolver: &mut SideResolver,
    id: ClassId,
    class: &JavaClass,
) -> Option<MixinConfigEdit> {
    let mut best: Option<(&MixinConfigFile, &str)> = None;
    for candidate in &module.mixin_configs {
        let Some(pkg) = candidate.config.package.as_deref() else {
            continue;
        };
        if !class.qualified_name.starts_with(&format!("{pkg}.")) {
            continue;
        }
        if best.is_none_or(|(_, current)| pkg.len() > current.len()) {
            best = Some((candidate, pkg));
        }
    }
    let (config, pkg) = best?;

    let key = match resolver.side_for_class(id) {
        Side::Client => "client",
        Side::Server => "server",
        _ => "mixins",
    };
    Some(MixinConfigEdit {
        config_path: config.path.clone(),
        key: key.to_string(),
        entry: class.qualified_name[pkg.len() + 1..].to_string(),
    })
}

/// Apply an edit to the config file on disk, creating the target array when
/// missing. Key order of the existing config is preserved.
pub fn apply_edit(edit: &MixinConfigEdit) -> Result<()> {
    let text = fs::read_to_string(&edit.config_path)?;
    let mut value: serde_json::Value = serde_json::from_str(&text)?;
    let object = value.as_object_mut().ok_or_else(|| {
        Error::DescriptorError(format!("{:?} is not a JSON object", edit.config_path))
    })?;
    let array = object
        .entry(edit.key.clone())
        .or_insert_with(|| serde_json::Value::Array(Vec::new()));
    let items = array.as_array_mut().ok_or_else(|| {
        Error::DescriptorError(format!(
            "{:?}: `{}` is not an array",
            edit.config_path, edit.key
        ))
    })?;
    if !items.iter().any(|v| v.as_str() == Some(edit.entry.as_str())) {
        items.push(serde_json::Value::String(edit.entry.clone()));
    }
    fs::write(
        &edit.config_path,
        format!("{}\n", serde_json::to_string_pretty(&value)?),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixin::config::{MixinConfig, MIXIN_ANNOTATION};
    use crate::model::testutil::{with_value, ModelBuilder};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENVIRONMENT: &str = "net.fabricmc.api.Environment";

    fn config_file(path: &str, package: &str, mixins: &[&str]) -> MixinConfigFile {
        MixinConfigFile {
            path: PathBuf::from(path),
            config: MixinConfig {
                package: Some(package.to_string()),
                mixins: mixins.iter().map(|s| (*s).to_string()).collect(),
                ..MixinConfig::default()
            },
        }
    }

    #[test]
    fn test_referenced_mixin_is_not_reported() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/example/mixin/WorldMixin.java", Some("com.example.mixin"));
        b.class(
            file,
            "WorldMixin",
            &[with_value("Mixin", MIXIN_ANNOTATION, "World.class")],
        );
        let mut model = b.finish();
        model.mixin_configs = vec![config_file(
            "mod.mixins.json",
            "com.example.mixin",
            &["WorldMixin"],
        )];

        let mut resolver = SideResolver::new(&model);
        assert!(find_unused_mixins(&model, &mut resolver).is_empty());
    }

    #[test]
    fn test_unreferenced_mixin_gets_longest_package_quick_fix() {
        let mut b = ModelBuilder::new();
        let file = b.file(
            "src/com/example/mixin/render/ScreenMixin.java",
            Some("com.example.mixin.render"),
        );
        let class = b.class(
            file,
            "ScreenMixin",
            &[
                with_value("Mixin", MIXIN_ANNOTATION, "Screen.class"),
                with_value("Environment", ENVIRONMENT, "EnvType.CLIENT"),
            ],
        );
        let mut model = b.finish();
        model.mixin_configs = vec![
            config_file("broad.mixins.json", "com.example.mixin", &[]),
            config_file("render.mixins.json", "com.example.mixin.render", &[]),
        ];

        let mut resolver = SideResolver::new(&model);
        let unused = find_unused_mixins(&model, &mut resolver);
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].class, class);

        let fix = unused[0].quick_fix.as_ref().expect("quick fix");
        assert_eq!(fix.config_path, PathBuf::from("render.mixins.json"));
        assert_eq!(fix.entry, "ScreenMixin");
        // The class is client-only, so it belongs in the client array
        assert_eq!(fix.key, "client");
    }

    #[test]
    fn test_quick_fix_defaults_to_mixins_array() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/example/mixin/WorldMixin.java", Some("com.example.mixin"));
        b.class(
            file,
            "WorldMixin",
            &[with_value("Mixin", MIXIN_ANNOTATION, "World.class")],
        );
        let mut model = b.finish();
        model.mixin_configs = vec![config_file("mod.mixins.json", "com.example.mixin", &[])];

        let mut resolver = SideResolver::new(&model);
        let unused = find_unused_mixins(&model, &mut resolver);
        assert_eq!(unused[0].quick_fix.as_ref().unwrap().key, "mixins");
    }

    #[test]
    fn test_no_quick_fix_outside_config_packages() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/org/other/Mixin.java", Some("org.other"));
        b.class(
            file,
            "StrayMixin",
            &[with_value("Mixin", MIXIN_ANNOTATION, "World.class")],
        );
        let mut model = b.finish();
        model.mixin_configs = vec![config_file("mod.mixins.json", "com.example.mixin", &[])];

        let mut resolver = SideResolver::new(&model);
        let unused = find_unused_mixins(&model, &mut resolver);
        assert_eq!(unused.len(), 1);
        assert!(unused[0].quick_fix.is_none());
    }

    #[test]
    fn test_apply_edit() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"required": true, "package": "com.example.mixin", "mixins": ["WorldMixin"]}}"#
        )?;

        let edit = MixinConfigEdit {
            config_path: file.path().to_path_buf(),
            key: "client".to_string(),
            entry: "ScreenMixin".to_string(),
        };
        apply_edit(&edit)?;

        let written = fs::read_to_string(file.path())?;
        let reparsed = MixinConfig::from_str(&written)?;
        assert_eq!(reparsed.client, vec!["ScreenMixin"]);
        assert_eq!(reparsed.mixins, vec!["WorldMixin"]);
        // Existing key order survives the rewrite
        assert!(written.find("required").unwrap() < written.find("package").unwrap());

        // Applying the same edit twice does not duplicate the entry
        apply_edit(&edit)?;
        let reparsed = MixinConfig::from_str(&fs::read_to_string(file.path())?)?;
        assert_eq!(reparsed.client, vec!["ScreenMixin"]);
        Ok(())
    }
}
