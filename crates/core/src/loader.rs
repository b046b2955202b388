//! Manifest-backed implementation of the type loader boundary.
//!
//! There is no runtime reflection to scan, so loadable types declare
//! themselves: each registers a [`TypeSpec`] at process start and the
//! loader keeps the resulting descriptors in a concurrent table.
//! Namespace resolution walks classpath-style roots - plain directories
//! and archive files - and maps the namespace onto the first root that
//! contains it.

use dashmap::DashMap;
use registrar_api::{
    RegistrarError, ResourceLocation, Result, TypeDescriptor, TypeLoader, TypeSpec,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use zip::ZipArchive;

/// Type loader over self-registered descriptors and classpath-style roots.
pub struct ManifestLoader {
    descriptors: DashMap<String, Arc<TypeDescriptor>>,
    roots: Vec<PathBuf>,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            descriptors: DashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Add a resolution root: a directory of loose artifacts or an
    /// archive file. Roots are probed in insertion order.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Register a type declaration. A second registration under the same
    /// FQN replaces the first.
    pub fn register(&self, spec: TypeSpec) -> Arc<TypeDescriptor> {
        let descriptor = Arc::new(spec.build());
        self.descriptors
            .insert(descriptor.fqn().to_string(), Arc::clone(&descriptor));
        descriptor
    }

    pub fn is_registered(&self, fqn: &str) -> bool {
        self.descriptors.contains_key(fqn)
    }

    /// Whether the archive holds at least one entry below `prefix`.
    fn archive_contains(archive: &Path, prefix: &str) -> Result<bool> {
        let file = File::open(archive)?;
        let archive = ZipArchive::new(file)?;
        let prefix = format!("{prefix}/");
        Ok(archive.file_names().any(|name| name.starts_with(&prefix)))
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeLoader for ManifestLoader {
    fn resolve_namespace(&self, namespace: &str) -> Result<ResourceLocation> {
        let rel = namespace.replace('.', "/");

        for root in &self.roots {
            if root.is_dir() {
                let candidate = root.join(&rel);
                if !candidate.is_dir() {
                    continue;
                }
                let candidate = candidate.canonicalize().unwrap_or(candidate);
                if let Some(location) = ResourceLocation::directory(namespace, &candidate) {
                    return Ok(location);
                }
            } else if root.is_file() {
                match Self::archive_contains(root, &rel) {
                    Ok(true) => {
                        let root = root.canonicalize().unwrap_or_else(|_| root.clone());
                        if let Some(location) = ResourceLocation::archive(namespace, &root, &rel) {
                            return Ok(location);
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        // Not an archive, or unreadable: this root cannot
                        // serve any namespace, keep probing the rest.
                        debug!("skipping root {}: {err}", root.display());
                    }
                }
            }
        }

        Err(RegistrarError::NamespaceNotFound {
            namespace: namespace.to_string(),
        })
    }

    fn load(&self, fqn: &str) -> Result<Arc<TypeDescriptor>> {
        self.descriptors
            .get(fqn)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistrarError::NotLoadable {
                fqn: fqn.to_string(),
                source: "no descriptor registered under this name".into(),
            })
    }
}
