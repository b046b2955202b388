//! Concurrent component registry.
//!
//! A keyed store of component instances, keyed by their type descriptor's
//! fully-qualified name. All operations are safe from any thread without
//! external locking; enumerations snapshot the key set at call time and
//! are not live views.

use dashmap::DashMap;
use registrar_api::{Instance, TypeDescriptor};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Clone)]
struct RegisteredComponent {
    descriptor: Arc<TypeDescriptor>,
    instance: Instance,
}

/// Thread-safe store of at most one instance per type descriptor.
///
/// Explicitly constructed and explicitly passed: process-wide effective
/// state is the caller's choice, not a hidden global. `get`/`add`/
/// `remove` define absent-on-empty-key rather than erroring, since an
/// empty key is a steady-state query, not an exceptional condition.
pub struct ComponentRegistry {
    components: DashMap<Arc<str>, RegisteredComponent>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            components: DashMap::new(),
        }
    }

    /// Instance registered for the descriptor, if any.
    pub fn get(&self, descriptor: &TypeDescriptor) -> Option<Instance> {
        if descriptor.fqn().is_empty() {
            return None;
        }
        self.components
            .get(descriptor.fqn())
            .map(|entry| Arc::clone(&entry.instance))
    }

    /// Snapshot of all registered instances.
    pub fn get_all(&self) -> Vec<Instance> {
        self.components
            .iter()
            .map(|entry| Arc::clone(&entry.instance))
            .collect()
    }

    /// Insert or replace the instance for a descriptor, returning what was
    /// previously registered. Last writer wins under contention. An empty
    /// descriptor key registers nothing and returns `None`.
    pub fn add(&self, descriptor: Arc<TypeDescriptor>, instance: Instance) -> Option<Instance> {
        if descriptor.fqn().is_empty() {
            return None;
        }
        let key: Arc<str> = descriptor.fqn().into();
        self.components
            .insert(
                key,
                RegisteredComponent {
                    descriptor,
                    instance,
                },
            )
            .map(|prev| prev.instance)
    }

    pub fn remove(&self, descriptor: &TypeDescriptor) -> Option<Instance> {
        if descriptor.fqn().is_empty() {
            return None;
        }
        self.components
            .remove(descriptor.fqn())
            .map(|(_, prev)| prev.instance)
    }

    /// Current key count. Advisory under concurrent mutation: it may be
    /// stale by the time the caller acts on it.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Snapshot of all registered descriptors.
    pub fn descriptors(&self) -> HashSet<Arc<TypeDescriptor>> {
        self.components
            .iter()
            .map(|entry| Arc::clone(&entry.descriptor))
            .collect()
    }

    /// Registered descriptors carrying the given capability tag.
    pub fn descriptors_by_tag(&self, tag: &str) -> HashSet<Arc<TypeDescriptor>> {
        self.components
            .iter()
            .filter(|entry| entry.descriptor.has_tag(tag))
            .map(|entry| Arc::clone(&entry.descriptor))
            .collect()
    }

    /// Registered descriptors assignment-compatible with `superdesc`,
    /// strictly excluding `superdesc` itself even when it is registered.
    pub fn descriptors_by_super(&self, superdesc: &TypeDescriptor) -> HashSet<Arc<TypeDescriptor>> {
        self.components
            .iter()
            .filter(|entry| {
                entry.descriptor.is_assignable_to(superdesc)
                    && entry.descriptor.as_ref() != superdesc
            })
            .map(|entry| Arc::clone(&entry.descriptor))
            .collect()
    }

    /// Counts for logging/diagnostics.
    pub fn stats(&self) -> RegistryStats {
        let mut by_tag: HashMap<String, usize> = HashMap::new();
        for entry in self.components.iter() {
            for tag in entry.descriptor.tags() {
                *by_tag.entry(tag.clone()).or_default() += 1;
            }
        }
        RegistryStats {
            total_components: self.components.len(),
            by_tag,
        }
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry statistics
#[derive(Debug, Default, Clone)]
pub struct RegistryStats {
    pub total_components: usize,
    pub by_tag: HashMap<String, usize>,
}
