//! Runtime component registry with a companion type-discovery scanner.
//!
//! Given a namespace, the scanner locates every compiled artifact under
//! it - loose files in a directory tree or entries packed in an archive -
//! and resolves each to a loadable type descriptor. Descriptors and the
//! instances a caller builds from them land in a concurrent registry
//! queryable by exact type, capability tag, or supertype relationship.
//!
//! ```text
//! ┌──────────────────────┐     ┌─────────────────────────┐
//! │   ManifestLoader     │────▶│   TypeScanner           │
//! │   (namespace → URL,  │     │   (pick locator, load   │
//! │    FQN → descriptor) │     │    every candidate)     │
//! └──────────────────────┘     └────────────┬────────────┘
//!                                           │
//!              ┌───────────────────┐        ▼
//!              │ ArtifactLocator[] │   ┌───────────────────────┐
//!              │ (directory walk,  │   │   ComponentRegistry   │
//!              │  archive entries) │   │   (descriptor → inst) │
//!              └───────────────────┘   └───────────────────────┘
//! ```
//!
//! The boundary traits ([`TypeLoader`], [`ArtifactLocator`]) live in
//! `registrar-api`; this crate carries the built-in implementations.
//!
//! [`TypeLoader`]: registrar_api::TypeLoader
//! [`ArtifactLocator`]: registrar_api::ArtifactLocator

pub mod loader;
pub mod logging;
pub mod registry;
pub mod scan;
pub mod util;

pub use loader::ManifestLoader;
pub use registry::{ComponentRegistry, RegistryStats};
pub use scan::{ArchiveLocator, DirectoryLocator, TypeScanner};

pub use registrar_api::{RegistrarError, Result};
