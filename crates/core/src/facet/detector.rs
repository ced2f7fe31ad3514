use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::fabric::{FabricModJson, FABRIC_MOD_JSON};
use super::mcmod::{McmodInfo, MCMOD_INFO};
use super::MinecraftFacet;

/// Directories probed for descriptor files, relative to the module root.
/// Gradle-convention layouts first, then the root itself.
const RESOURCE_ROOTS: &[&str] = &["src/main/resources", "src/resources", "resources", ""];

/// Detects which modding platform a module root belongs to by probing for
/// descriptor files, falling back to build-script contents when a Forge or
/// Fabric module ships no descriptor.
pub struct FacetDetector;

impl FacetDetector {
    /// Resource directories that exist under `root`, in probe order
    pub fn resource_roots(root: &Path) -> Vec<PathBuf> {
        RESOURCE_ROOTS
            .iter()
            .map(|dir| {
                if dir.is_empty() {
                    root.to_path_buf()
                } else {
                    root.join(dir)
                }
            })
            .filter(|p| p.is_dir())
            .collect()
    }

    pub fn detect(root: &Path) -> Result<Option<MinecraftFacet>> {
        tracing::trace!("Detecting facet for module root: {:?}", root);

        for dir in Self::resource_roots(root) {
            let fabric_path = dir.join(FABRIC_MOD_JSON);
            if fabric_path.is_file() {
                tracing::debug!("Detected Fabric module via {:?}", fabric_path);
                let descriptor = FabricModJson::from_path(&fabric_path)?;
                return Ok(Some(MinecraftFacet::fabric(Some(descriptor), Some(fabric_path))));
            }

            let mcmod_path = dir.join(MCMOD_INFO);
            if mcmod_path.is_file() {
                tracing::debug!("Detected Forge module via {:?}", mcmod_path);
                let info = McmodInfo::from_path(&mcmod_path)?;
                return Ok(Some(MinecraftFacet::forge(Some((info, mcmod_path)))));
            }
        }

        // No descriptor; look at the build script to classify the module
        for script in ["build.gradle", "build.gradle.kts"] {
            let path = root.join(script);
            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };
            if contents.contains("net.minecraftforge") || contents.contains("minecraftforge.gradle")
            {
                tracing::debug!("Detected Forge module via {:?}", path);
                return Ok(Some(MinecraftFacet::forge(None)));
            }
            if contents.contains("fabric-loom") || contents.contains("net.fabricmc") {
                tracing::debug!("Detected Fabric module via {:?}", path);
                return Ok(Some(MinecraftFacet::fabric(None, None)));
            }
        }

        tracing::trace!("No facet detected for {:?}", root);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::Platform;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_fabric_module() -> Result<()> {
        let dir = TempDir::new()?;
        let resources = dir.path().join("src/main/resources");
        fs::create_dir_all(&resources)?;
        fs::write(
            resources.join(FABRIC_MOD_JSON),
            r#"{"id": "testmod", "environment": "client"}"#,
        )?;

        let facet = FacetDetector::detect(dir.path())?.expect("facet");
        assert_eq!(facet.platform, Platform::Fabric);
        assert!(facet.eligible_for_side_checks());
        assert_eq!(
            facet.fabric_json.as_ref().unwrap().id.as_deref(),
            Some("testmod")
        );
        Ok(())
    }

    #[test]
    fn test_detect_forge_module_with_mcmod() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join(MCMOD_INFO), r#"[{"modid": "testmod"}]"#)?;

        let facet = FacetDetector::detect(dir.path())?.expect("facet");
        assert_eq!(facet.platform, Platform::Forge);
        assert!(facet.eligible_for_side_checks());
        Ok(())
    }

    #[test]
    fn test_detect_forge_module_from_build_script() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(
            dir.path().join("build.gradle"),
            "dependencies { minecraft 'net.minecraftforge:forge:1.16.5' }",
        )?;

        let facet = FacetDetector::detect(dir.path())?.expect("facet");
        assert_eq!(facet.platform, Platform::Forge);
        assert!(!facet.eligible_for_side_checks());
        Ok(())
    }

    #[test]
    fn test_detect_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        assert!(FacetDetector::detect(dir.path())?.is_none());
        Ok(())
    }
}
