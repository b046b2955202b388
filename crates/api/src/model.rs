//! Type descriptors, component instances, and field handles.
//!
//! A [`TypeDescriptor`] is the opaque, immutable handle the scanner
//! produces and the registry keys on. There is no runtime reflection to
//! lean on, so types declare themselves through a [`TypeSpec`] at process
//! start: fully-qualified name, capability tags, ancestor closure, an
//! optional default-construction hook, and settable fields.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Error type crossing the loader/locator boundary
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A registered component instance, type-erased so the registry can hold
/// arbitrary components behind a single key space.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Default-construction hook attached to a descriptor at registration time.
pub type Constructor = Arc<dyn Fn() -> Result<Instance, BoxError> + Send + Sync>;

/// Raw setter for a declared field. The target is an instance that has not
/// been shared yet (construction-time wiring), hence the exclusive borrow.
pub type FieldSetter =
    Arc<dyn Fn(&mut dyn Any, Box<dyn Any>) -> Result<(), BoxError> + Send + Sync>;

// ==================== Field Handle ====================

/// A settable field declared by a type.
///
/// Non-accessible fields model visibility restrictions: assignment is
/// rejected unless the caller explicitly forces accessibility.
#[derive(Clone)]
pub struct FieldHandle {
    name: Arc<str>,
    accessible: bool,
    setter: FieldSetter,
}

impl FieldHandle {
    pub fn new(name: impl Into<Arc<str>>, accessible: bool, setter: FieldSetter) -> Self {
        Self {
            name: name.into(),
            accessible,
            setter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    /// Invoke the setter. Accessibility is the caller's concern; this only
    /// reports whether the underlying assignment was accepted.
    pub fn apply(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), BoxError> {
        (self.setter)(target, value)
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandle")
            .field("name", &self.name)
            .field("accessible", &self.accessible)
            .field("setter", &"<function>")
            .finish()
    }
}

// ==================== Type Descriptor ====================

/// Immutable handle uniquely identifying a loadable type.
///
/// Identity is the fully-qualified name: two descriptors with the same FQN
/// compare equal and hash identically regardless of the rest of their
/// declaration. Descriptors are shared as `Arc<TypeDescriptor>` and never
/// mutated after construction.
pub struct TypeDescriptor {
    fqn: Arc<str>,
    tags: HashSet<String>,
    ancestors: HashSet<String>,
    constructor: Option<Constructor>,
    fields: Vec<FieldHandle>,
}

impl TypeDescriptor {
    /// Fully-qualified, dot-separated name.
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    /// Capability tags attached to the type (possibly empty).
    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Transitive closure of ancestor and implemented-interface names.
    pub fn ancestors(&self) -> &HashSet<String> {
        &self.ancestors
    }

    /// Whether a value of this type can stand in for `other` (`other` is
    /// this type itself or one of its ancestors).
    pub fn is_assignable_to(&self, other: &TypeDescriptor) -> bool {
        self == other || self.ancestors.contains(other.fqn())
    }

    /// Default-construction hook, if the type declared one.
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub fn fields(&self) -> &[FieldHandle] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldHandle> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.fqn == other.fqn
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fqn.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("fqn", &self.fqn)
            .field("tags", &self.tags)
            .field("ancestors", &self.ancestors)
            .field("constructible", &self.constructor.is_some())
            .field("fields", &self.fields)
            .finish()
    }
}

// ==================== Type Spec ====================

/// Declaration a type registers with a loader at process start.
///
/// Builder-style; `build` freezes it into a [`TypeDescriptor`].
pub struct TypeSpec {
    fqn: String,
    tags: HashSet<String>,
    ancestors: HashSet<String>,
    constructor: Option<Constructor>,
    fields: Vec<FieldHandle>,
}

impl TypeSpec {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            tags: HashSet::new(),
            ancestors: HashSet::new(),
            constructor: None,
            fields: Vec::new(),
        }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    /// Attach a capability tag (opaque marker, e.g. `component`).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Declare an ancestor or implemented interface by FQN. Callers are
    /// expected to list the full closure; no transitive resolution happens
    /// at query time.
    pub fn with_ancestor(mut self, fqn: impl Into<String>) -> Self {
        self.ancestors.insert(fqn.into());
        self
    }

    pub fn with_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<Instance, BoxError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Shorthand wiring `Default::default` as the construction hook.
    pub fn with_default_constructor<T>(self) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        self.with_constructor(|| Ok(Arc::new(T::default()) as Instance))
    }

    pub fn with_field<F>(mut self, name: impl Into<Arc<str>>, accessible: bool, setter: F) -> Self
    where
        F: Fn(&mut dyn Any, Box<dyn Any>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.fields
            .push(FieldHandle::new(name, accessible, Arc::new(setter)));
        self
    }

    /// Typed convenience over [`TypeSpec::with_field`]: downcasts the target
    /// and value, rejecting the assignment on any type mismatch.
    pub fn with_typed_field<T, V, F>(self, name: impl Into<Arc<str>>, accessible: bool, apply: F) -> Self
    where
        T: 'static,
        V: 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let name = name.into();
        let field_name = Arc::clone(&name);
        self.with_field(name, accessible, move |target, value| {
            let target = target
                .downcast_mut::<T>()
                .ok_or_else(|| BoxError::from(format!("field `{field_name}`: target is not of the declared type")))?;
            let value = value
                .downcast::<V>()
                .map_err(|_| BoxError::from(format!("field `{field_name}`: value is not of the declared type")))?;
            apply(target, *value);
            Ok(())
        })
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            fqn: self.fqn.into(),
            tags: self.tags,
            ancestors: self.ancestors,
            constructor: self.constructor,
            fields: self.fields,
        }
    }
}
