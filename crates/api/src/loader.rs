//! Type loader boundary.

use crate::error::Result;
use crate::location::ResourceLocation;
use crate::model::TypeDescriptor;
use std::sync::Arc;

/// Externally supplied type-loading facility.
///
/// The scanner treats this as given: it resolves namespaces to storage
/// locations and fully-qualified names to live descriptors, however the
/// backend chooses to (the built-in backend keeps a table of
/// self-registered declarations plus classpath-style roots).
pub trait TypeLoader: Send + Sync {
    /// Map a namespace to a single URL-form resource location.
    ///
    /// Errors with [`RegistrarError::NamespaceNotFound`] when no backing
    /// resource exists for the namespace.
    ///
    /// [`RegistrarError::NamespaceNotFound`]: crate::error::RegistrarError::NamespaceNotFound
    fn resolve_namespace(&self, namespace: &str) -> Result<ResourceLocation>;

    /// Resolve a fully-qualified name to a live descriptor.
    ///
    /// Errors with [`RegistrarError::NotLoadable`] (wrapping the cause)
    /// when the name does not resolve to a known type.
    ///
    /// [`RegistrarError::NotLoadable`]: crate::error::RegistrarError::NotLoadable
    fn load(&self, fqn: &str) -> Result<Arc<TypeDescriptor>>;
}
