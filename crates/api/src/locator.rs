//! Artifact locator boundary.

use crate::error::Result;
use crate::location::ResourceLocation;

/// One discovery strategy for one storage representation.
///
/// The scanner picks the first locator supporting a resolved location's
/// kind; new storage kinds plug in by implementing this trait, not by
/// branching inside the scanner.
pub trait ArtifactLocator: Send + Sync {
    /// Check whether this locator can enumerate the given location.
    fn supports(&self, location: &ResourceLocation) -> bool;

    /// Enumerate candidate fully-qualified type names under the location.
    /// Duplicates are allowed; the scanner deduplicates.
    fn enumerate(&self, location: &ResourceLocation) -> Result<Vec<String>>;

    /// Locator name (for logging/debugging)
    fn name(&self) -> &str;
}
