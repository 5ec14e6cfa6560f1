//! Runtime type registry.
//!
//! Every value variant maps to one [`Type`] descriptor. Core variants are
//! registered when the registry is created; embedders register their own
//! variants by Rust type, once, and get the same descriptor back on every
//! later call.

use std::any::TypeId;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use vesper_ir::{Name, StringInterner};

use crate::value::{Builtin, Int, Lambda, Nil, Seq, Splat, Symbol, Val};

/// Runtime type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    index: u32,
    name: Name,
}

impl Type {
    /// Position in registration order; stable for the registry's lifetime.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn name(self) -> Name {
        self.name
    }
}

/// Descriptors of the variants defined in this crate.
#[derive(Clone, Copy, Debug)]
pub struct CoreTypes {
    pub nil: Type,
    pub symbol: Type,
    pub int: Type,
    pub seq: Type,
    pub splat: Type,
    pub lambda: Type,
    pub builtin: Type,
}

#[derive(Default)]
struct Registry {
    by_rust_type: FxHashMap<TypeId, Type>,
    types: Vec<Type>,
}

impl Registry {
    fn register(&mut self, rust_type: TypeId, name: Name) -> Type {
        if let Some(ty) = self.by_rust_type.get(&rust_type) {
            return *ty;
        }
        let index = u32::try_from(self.types.len()).unwrap_or(u32::MAX);
        let ty = Type { index, name };
        self.types.push(ty);
        self.by_rust_type.insert(rust_type, ty);
        ty
    }
}

/// Registry of value types.
///
/// Guarded by a single lock; registration happens at start-up and lookups
/// afterwards only take the read side.
pub struct TypeRegistry {
    core: CoreTypes,
    inner: RwLock<Registry>,
}

impl TypeRegistry {
    pub fn new(interner: &StringInterner) -> Self {
        let mut registry = Registry::default();
        let mut add = |id: TypeId, name: &str| registry.register(id, interner.intern(name));

        let core = CoreTypes {
            nil: add(TypeId::of::<Nil>(), "Nil"),
            symbol: add(TypeId::of::<Symbol>(), "Symbol"),
            int: add(TypeId::of::<Int>(), "Int"),
            seq: add(TypeId::of::<Seq>(), "Seq"),
            splat: add(TypeId::of::<Splat>(), "Splat"),
            lambda: add(TypeId::of::<Lambda>(), "Lambda"),
            builtin: add(TypeId::of::<Builtin>(), "Builtin"),
        };

        TypeRegistry {
            core,
            inner: RwLock::new(registry),
        }
    }

    #[inline]
    pub fn core(&self) -> &CoreTypes {
        &self.core
    }

    /// Register `T` under `name`, or return its existing descriptor.
    ///
    /// The first registration wins: a later call with a different name
    /// returns the original descriptor.
    pub fn register<T: Val>(&self, name: Name) -> Type {
        let id = TypeId::of::<T>();
        if let Some(ty) = self.inner.read().by_rust_type.get(&id) {
            return *ty;
        }
        let ty = self.inner.write().register(id, name);
        tracing::debug!(index = ty.index, "registered value type");
        ty
    }

    pub fn get<T: Val>(&self) -> Option<Type> {
        self.inner.read().by_rust_type.get(&TypeId::of::<T>()).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.read().types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
