//! Type discovery scanner.
//!
//! The scanner normalizes both packaging shapes for compiled code -
//! loose directory trees and archive containers - to the same output: a
//! flat set of loaded type descriptors. Storage kinds are handled by
//! pluggable [`ArtifactLocator`]s selected on the resolved location, so
//! downstream code never needs storage-format awareness.

pub mod archive;
pub mod dir;

pub use archive::ArchiveLocator;
pub use dir::DirectoryLocator;

use registrar_api::{
    ArtifactLocator, FieldHandle, Instance, RegistrarError, Result, TypeDescriptor, TypeLoader,
};
use std::any::Any;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Discovers, loads, and instantiates types under a namespace.
///
/// Holds no mutable state across calls; concurrent `discover` calls are
/// independent.
pub struct TypeScanner {
    loader: Arc<dyn TypeLoader>,
    locators: Vec<Box<dyn ArtifactLocator>>,
}

impl TypeScanner {
    /// Scanner with the two built-in locators (directory walk, archive
    /// enumeration).
    pub fn new(loader: Arc<dyn TypeLoader>) -> Self {
        Self {
            loader,
            locators: vec![Box::new(DirectoryLocator), Box::new(ArchiveLocator)],
        }
    }

    /// Scanner with no locators; combine with [`TypeScanner::with_locator`].
    pub fn bare(loader: Arc<dyn TypeLoader>) -> Self {
        Self {
            loader,
            locators: Vec::new(),
        }
    }

    /// Add a locator. Locators are consulted in insertion order; the
    /// first one supporting the resolved location wins.
    pub fn with_locator(mut self, locator: Box<dyn ArtifactLocator>) -> Self {
        self.locators.push(locator);
        self
    }

    /// Discover every loadable type under `namespace`.
    ///
    /// Resolution failures and I/O failures surface as errors; a location
    /// kind no locator supports yields an empty set. Discovery is strictly
    /// all-or-nothing: if any candidate name fails to load, the whole call
    /// fails rather than returning a partial set.
    pub fn discover(&self, namespace: &str) -> Result<HashSet<Arc<TypeDescriptor>>> {
        let start = Instant::now();
        let location = self.loader.resolve_namespace(namespace)?;

        let Some(locator) = self.locators.iter().find(|l| l.supports(&location)) else {
            debug!(
                "no locator supports {} for namespace `{namespace}`, yielding empty set",
                location.url()
            );
            return Ok(HashSet::new());
        };

        // Duplicate artifacts collapse before loading.
        let names: BTreeSet<String> = locator.enumerate(&location)?.into_iter().collect();

        let mut descriptors = HashSet::with_capacity(names.len());
        for name in &names {
            descriptors.insert(self.loader.load(name)?);
        }

        info!(
            "discovered {} types under `{namespace}` via {} in {:?}",
            descriptors.len(),
            locator.name(),
            start.elapsed()
        );
        Ok(descriptors)
    }

    /// Load a type and default-construct it through its constructor hook.
    pub fn instantiate(&self, fqn: &str) -> Result<Instance> {
        let descriptor = self.loader.load(fqn)?;
        let constructor =
            descriptor
                .constructor()
                .ok_or_else(|| RegistrarError::Instantiation {
                    fqn: fqn.to_string(),
                    source: "type declares no default constructor".into(),
                })?;
        constructor().map_err(|source| RegistrarError::Instantiation {
            fqn: fqn.to_string(),
            source,
        })
    }

    /// Assign a value to a declared field on a not-yet-shared instance.
    ///
    /// Non-accessible fields are rejected unless `force_accessible` is
    /// set; a rejection by the setter itself (e.g. a type mismatch)
    /// surfaces as [`RegistrarError::FieldAccess`] even when forced.
    pub fn assign_field(
        &self,
        field: &FieldHandle,
        target: &mut dyn Any,
        value: Box<dyn Any>,
        force_accessible: bool,
    ) -> Result<()> {
        if !field.is_accessible() && !force_accessible {
            return Err(RegistrarError::FieldAccess {
                field: field.name().to_string(),
                source: "field is not accessible".into(),
            });
        }
        field
            .apply(target, value)
            .map_err(|source| RegistrarError::FieldAccess {
                field: field.name().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_api::{ResourceLocation, TypeSpec};
    use url::Url;

    /// Loader serving a fixed location and a fixed descriptor table.
    struct MockLoader {
        location: ResourceLocation,
        known: Vec<Arc<TypeDescriptor>>,
    }

    impl MockLoader {
        fn new(location: ResourceLocation, specs: Vec<TypeSpec>) -> Self {
            Self {
                location,
                known: specs.into_iter().map(|s| Arc::new(s.build())).collect(),
            }
        }
    }

    impl TypeLoader for MockLoader {
        fn resolve_namespace(&self, _namespace: &str) -> Result<ResourceLocation> {
            Ok(self.location.clone())
        }

        fn load(&self, fqn: &str) -> Result<Arc<TypeDescriptor>> {
            self.known
                .iter()
                .find(|d| d.fqn() == fqn)
                .cloned()
                .ok_or_else(|| RegistrarError::NotLoadable {
                    fqn: fqn.to_string(),
                    source: "unknown to mock loader".into(),
                })
        }
    }

    /// Locator claiming every location and yielding fixed names.
    struct MockLocator {
        names: Vec<String>,
    }

    impl ArtifactLocator for MockLocator {
        fn supports(&self, _location: &ResourceLocation) -> bool {
            true
        }

        fn enumerate(&self, _location: &ResourceLocation) -> Result<Vec<String>> {
            Ok(self.names.clone())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn other_location() -> ResourceLocation {
        ResourceLocation::from_url(Url::parse("https://example.com/pkg").unwrap(), "pkg")
    }

    #[test]
    fn unsupported_location_kind_yields_empty_set() {
        let loader = Arc::new(MockLoader::new(other_location(), vec![TypeSpec::new("pkg.A")]));
        let scanner = TypeScanner::new(loader);

        let found = scanner.discover("pkg").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn duplicate_candidate_names_collapse() {
        let loader = Arc::new(MockLoader::new(other_location(), vec![TypeSpec::new("pkg.A")]));
        let scanner = TypeScanner::bare(loader).with_locator(Box::new(MockLocator {
            names: vec!["pkg.A".into(), "pkg.A".into()],
        }));

        let found = scanner.discover("pkg").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn one_unloadable_candidate_fails_the_whole_discovery() {
        let loader = Arc::new(MockLoader::new(other_location(), vec![TypeSpec::new("pkg.A")]));
        let scanner = TypeScanner::bare(loader).with_locator(Box::new(MockLocator {
            names: vec!["pkg.A".into(), "pkg.Missing".into()],
        }));

        let err = scanner.discover("pkg").unwrap_err();
        assert!(matches!(err, RegistrarError::NotLoadable { .. }));
    }

    #[test]
    fn first_supporting_locator_wins() {
        let loader = Arc::new(MockLoader::new(
            other_location(),
            vec![TypeSpec::new("pkg.A"), TypeSpec::new("pkg.B")],
        ));
        let scanner = TypeScanner::bare(loader)
            .with_locator(Box::new(MockLocator {
                names: vec!["pkg.A".into()],
            }))
            .with_locator(Box::new(MockLocator {
                names: vec!["pkg.B".into()],
            }));

        let found = scanner.discover("pkg").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.iter().any(|d| d.fqn() == "pkg.A"));
    }

    #[test]
    fn instantiate_invokes_the_constructor_hook() {
        #[derive(Default)]
        struct Service;

        let loader = Arc::new(MockLoader::new(
            other_location(),
            vec![TypeSpec::new("pkg.Service").with_default_constructor::<Service>()],
        ));
        let scanner = TypeScanner::new(loader);

        let instance = scanner.instantiate("pkg.Service").unwrap();
        assert!(instance.downcast_ref::<Service>().is_some());
    }

    #[test]
    fn instantiate_without_constructor_fails() {
        let loader = Arc::new(MockLoader::new(
            other_location(),
            vec![TypeSpec::new("pkg.Abstract")],
        ));
        let scanner = TypeScanner::new(loader);

        let err = scanner.instantiate("pkg.Abstract").unwrap_err();
        assert!(matches!(err, RegistrarError::Instantiation { .. }));
    }

    #[test]
    fn field_assignment_respects_accessibility() {
        #[derive(Default)]
        struct Config {
            secret: String,
        }

        let descriptor = TypeSpec::new("pkg.Config")
            .with_typed_field("secret", false, |c: &mut Config, v: String| c.secret = v)
            .build();
        let field = descriptor.field("secret").unwrap();

        let loader = Arc::new(MockLoader::new(other_location(), Vec::new()));
        let scanner = TypeScanner::new(loader);
        let mut config = Config::default();

        let err = scanner
            .assign_field(field, &mut config, Box::new("hush".to_string()), false)
            .unwrap_err();
        assert!(matches!(err, RegistrarError::FieldAccess { .. }));

        scanner
            .assign_field(field, &mut config, Box::new("hush".to_string()), true)
            .unwrap();
        assert_eq!(config.secret, "hush");

        // Rejected even when forced: the value is of the wrong type.
        let err = scanner
            .assign_field(field, &mut config, Box::new(1_u8), true)
            .unwrap_err();
        assert!(matches!(err, RegistrarError::FieldAccess { .. }));
    }
}
