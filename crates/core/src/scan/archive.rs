//! Archive-container discovery strategy.

use registrar_api::{ARTIFACT_SUFFIX, ArtifactLocator, LocationKind, ResourceLocation, Result};
use std::fs::File;
use tracing::debug;
use zip::ZipArchive;

/// Enumerates compiled artifacts packed inside an archive container.
///
/// Entry names already carry the full package path with `/` separators,
/// so names are computed by stripping the suffix and swapping separators
/// for dots; no namespace prefix is applied.
pub struct ArchiveLocator;

impl ArtifactLocator for ArchiveLocator {
    fn supports(&self, location: &ResourceLocation) -> bool {
        location.kind() == LocationKind::Archive
    }

    fn enumerate(&self, location: &ResourceLocation) -> Result<Vec<String>> {
        let Some((archive_path, _)) = location.archive_parts() else {
            return Ok(Vec::new());
        };

        let file = File::open(&archive_path)?;
        let archive = ZipArchive::new(file)?;
        debug!(
            "enumerating {} entries in {}",
            archive.len(),
            archive_path.display()
        );

        let names = archive
            .file_names()
            .filter(|entry| entry.ends_with(ARTIFACT_SUFFIX))
            .map(|entry| entry[..entry.len() - ARTIFACT_SUFFIX.len()].replace('/', "."))
            .collect();
        Ok(names)
    }

    fn name(&self) -> &str {
        "archive enumeration"
    }
}
