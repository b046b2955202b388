//! URL-form resource locations resolved from namespaces.
//!
//! A location carries the originating namespace plus a URL whose scheme
//! discriminates the storage kind: `file` for a plain directory tree,
//! `jar` for an archive container. Archive locations use the nested form
//! `jar:file:///path/to/app.jar!/pkg/sub`.

use std::path::{Path, PathBuf};
use url::Url;

/// URL scheme marking a plain directory location
pub const FILE_PROTOCOL: &str = "file";

/// URL scheme marking an archive container location
pub const ARCHIVE_PROTOCOL: &str = "jar";

/// Suffix identifying a compiled artifact inside either storage kind
pub const ARTIFACT_SUFFIX: &str = ".class";

/// Storage kind behind a resolved location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Directory tree of loose compiled artifacts
    Directory,
    /// Single archive container holding many artifacts
    Archive,
    /// Anything else; discovery yields an empty result for these
    Other,
}

/// A namespace resolved to a single storage location.
///
/// Transient: built during one discovery call and dropped afterwards.
#[derive(Debug, Clone)]
pub struct ResourceLocation {
    url: Url,
    namespace: String,
}

impl ResourceLocation {
    /// Location for a directory tree rooted at `root`. `None` when the
    /// path cannot be expressed as a file URL (relative or non-absolute
    /// paths); callers treat that root as a non-match.
    pub fn directory(namespace: impl Into<String>, root: &Path) -> Option<Self> {
        let url = Url::from_file_path(root).ok()?;
        Some(Self {
            url,
            namespace: namespace.into(),
        })
    }

    /// Location for the entries below `entry_prefix` inside `archive`.
    pub fn archive(
        namespace: impl Into<String>,
        archive: &Path,
        entry_prefix: &str,
    ) -> Option<Self> {
        let inner = Url::from_file_path(archive).ok()?;
        let url = Url::parse(&format!("{ARCHIVE_PROTOCOL}:{inner}!/{entry_prefix}")).ok()?;
        Some(Self {
            url,
            namespace: namespace.into(),
        })
    }

    /// Wrap an already-built URL, e.g. from a custom loader backend.
    pub fn from_url(url: Url, namespace: impl Into<String>) -> Self {
        Self {
            url,
            namespace: namespace.into(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The namespace this location was resolved from.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> LocationKind {
        match self.url.scheme() {
            FILE_PROTOCOL => LocationKind::Directory,
            ARCHIVE_PROTOCOL => LocationKind::Archive,
            _ => LocationKind::Other,
        }
    }

    /// Filesystem root for a directory location.
    pub fn directory_path(&self) -> Option<PathBuf> {
        if self.kind() != LocationKind::Directory {
            return None;
        }
        self.url.to_file_path().ok()
    }

    /// Archive path and internal entry prefix for an archive location.
    pub fn archive_parts(&self) -> Option<(PathBuf, String)> {
        if self.kind() != LocationKind::Archive {
            return None;
        }
        // Nested form: the jar URL's body is `<file-url>!/<entry-prefix>`.
        let body = self.url.path();
        let (file_part, entry_prefix) = body.split_once("!/")?;
        let inner = Url::parse(file_part).ok()?;
        Some((inner.to_file_path().ok()?, entry_prefix.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_location_round_trips_the_root() {
        let root = if cfg!(windows) {
            PathBuf::from(r"C:\workspace\classes\pkg")
        } else {
            PathBuf::from("/workspace/classes/pkg")
        };
        let location = ResourceLocation::directory("pkg", &root).expect("absolute path");

        assert_eq!(location.kind(), LocationKind::Directory);
        assert_eq!(location.namespace(), "pkg");
        assert_eq!(location.directory_path(), Some(root));
        assert!(location.archive_parts().is_none());
    }

    #[test]
    fn archive_location_splits_into_path_and_prefix() {
        let archive = if cfg!(windows) {
            PathBuf::from(r"C:\libs\app.jar")
        } else {
            PathBuf::from("/libs/app.jar")
        };
        let location =
            ResourceLocation::archive("pkg.sub", &archive, "pkg/sub").expect("absolute path");

        assert_eq!(location.kind(), LocationKind::Archive);
        let (path, prefix) = location.archive_parts().expect("archive parts");
        assert_eq!(path, archive);
        assert_eq!(prefix, "pkg/sub");
        assert!(location.directory_path().is_none());
    }

    #[test]
    fn unrecognized_scheme_is_other() {
        let url = Url::parse("https://example.com/pkg").unwrap();
        let location = ResourceLocation::from_url(url, "pkg");
        assert_eq!(location.kind(), LocationKind::Other);
        assert!(location.directory_path().is_none());
        assert!(location.archive_parts().is_none());
    }

    #[test]
    fn relative_root_is_not_a_location() {
        assert!(ResourceLocation::directory("pkg", Path::new("relative/classes")).is_none());
    }
}
