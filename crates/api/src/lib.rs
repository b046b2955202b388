//! Boundary traits and data model for the component registry and the
//! type discovery scanner.
//!
//! This crate defines the contracts the core implementations plug into:
//! - [`TypeLoader`] - resolves namespaces to storage locations and
//!   fully-qualified names to live [`TypeDescriptor`]s
//! - [`ArtifactLocator`] - enumerates candidate type names from one
//!   storage representation (directory tree, archive container, ...)
//!
//! Alternate storage kinds or loader backends implement these traits
//! without depending on `registrar-core`.

pub mod error;
pub mod loader;
pub mod location;
pub mod locator;
pub mod model;

pub use error::{RegistrarError, Result};
pub use loader::TypeLoader;
pub use location::{ARCHIVE_PROTOCOL, ARTIFACT_SUFFIX, FILE_PROTOCOL, LocationKind, ResourceLocation};
pub use locator::ArtifactLocator;
pub use model::{BoxError, Constructor, FieldHandle, FieldSetter, Instance, TypeDescriptor, TypeSpec};
