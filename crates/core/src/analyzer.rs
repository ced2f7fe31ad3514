use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::ParseCache;
use crate::error::Result;
use crate::facet::{FacetDetector, MinecraftFacet};
use crate::inspection::{self, Diagnostic};
use crate::mixin::{MixinConfig, MixinConfigFile};
use crate::model::ModuleModel;
use crate::parser::{ElementExtractor, JavaParser};
use crate::sideonly::beginning_check;

const PARSE_CACHE_CAPACITY: usize = 256;

/// Top-level entry point: loads a mod module into a [`ModuleModel`] and runs
/// the inspections over it.
pub struct ModuleAnalyzer {
    parser: JavaParser,
    extractor: ElementExtractor,
    cache: ParseCache,
}

impl ModuleAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: JavaParser::new()?,
            extractor: ElementExtractor::new(),
            cache: ParseCache::new(PARSE_CACHE_CAPACITY),
        })
    }

    /// Build the module model: detect the platform facet, parse the given
    /// Java sources and discover mixin configs under the resource roots
    pub fn load_module(&mut self, root: &Path, java_files: &[PathBuf]) -> Result<ModuleModel> {
        let mut module = ModuleModel::new(root.to_path_buf());
        module.facet = FacetDetector::detect(root)?;

        for path in java_files {
            let source = fs::read_to_string(path)?;
            let tree = self.cache.get_or_parse(&mut self.parser, path, &source)?;
            self.extractor.extract_file(&tree, &source, path, &mut module);
        }

        module.mixin_configs = discover_mixin_configs(root, module.facet.as_ref())?;
        tracing::debug!(
            "Loaded module {:?}: {} files, {} mixin configs",
            root,
            java_files.len(),
            module.mixin_configs.len()
        );
        Ok(module)
    }

    /// Run all inspections. Modules without a recognized platform facet are
    /// never inspected; side checks additionally require the eligibility
    /// gate.
    pub fn inspect(&self, module: &ModuleModel) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if module.facet.is_none() {
            tracing::debug!("No platform facet detected for {:?}; skipping", module.root);
            return diagnostics;
        }

        if beginning_check(module) {
            inspection::side_annotation::check_module(module, &mut diagnostics);
        } else {
            tracing::debug!("Module {:?} not eligible for side checks", module.root);
        }
        inspection::unused_mixin::check_module(module, &mut diagnostics);
        inspection::entrypoints::check_module(module, &mut diagnostics);

        inspection::sort_diagnostics(&mut diagnostics);
        diagnostics
    }
}

/// Mixin configs named by the Fabric descriptor, plus any `*.mixins.json`
/// found in a resource root
fn discover_mixin_configs(
    root: &Path,
    facet: Option<&MinecraftFacet>,
) -> Result<Vec<MixinConfigFile>> {
    let mut configs = Vec::new();
    let mut seen = HashSet::new();
    let resource_roots = FacetDetector::resource_roots(root);

    if let Some(descriptor) = facet.and_then(|f| f.fabric_json.as_ref()) {
        for name in &descriptor.mixins {
            for dir in &resource_roots {
                let path = dir.join(name);
                if path.is_file() && seen.insert(path.clone()) {
                    configs.push(MixinConfigFile {
                        config: MixinConfig::from_path(&path)?,
                        path,
                    });
                }
            }
        }
    }

    for dir in &resource_roots {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".mixins.json"))
            })
            .collect();
        paths.sort();
        for path in paths {
            if seen.insert(path.clone()) {
                configs.push(MixinConfigFile {
                    config: MixinConfig::from_path(&path)?,
                    path,
                });
            }
        }
    }

    Ok(configs)
}
