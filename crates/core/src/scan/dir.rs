//! Directory-tree discovery strategy.

use registrar_api::{ARTIFACT_SUFFIX, ArtifactLocator, LocationKind, ResourceLocation, Result};
use walkdir::WalkDir;

/// Recursively walks a directory tree of loose compiled artifacts.
///
/// Names are computed from the path relative to the resolved root:
/// separators become dots, the artifact suffix is stripped, and the
/// originating namespace is prefixed.
pub struct DirectoryLocator;

impl ArtifactLocator for DirectoryLocator {
    fn supports(&self, location: &ResourceLocation) -> bool {
        location.kind() == LocationKind::Directory
    }

    fn enumerate(&self, location: &ResourceLocation) -> Result<Vec<String>> {
        let Some(root) = location.directory_path() else {
            return Ok(Vec::new());
        };
        let namespace = location.namespace();

        let mut names = Vec::new();
        for entry in WalkDir::new(&root) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !file_name.ends_with(ARTIFACT_SUFFIX) {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let dotted = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join(".");
            // ends_with checked above, so the suffix is always present
            let stem = dotted.strip_suffix(ARTIFACT_SUFFIX).unwrap_or(&dotted);
            names.push(format!("{namespace}.{stem}"));
        }
        Ok(names)
    }

    fn name(&self) -> &str {
        "directory walk"
    }
}
