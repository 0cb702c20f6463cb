//! Service registration types.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::container::ResolverContext;
use crate::error::DiResult;
use crate::internal::Mutex;
use crate::lifetime::Lifetime;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type Ctor = Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;

/// Service registration with lifetime and constructor
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) ctor: Ctor,
    /// Concrete type name of the service, for descriptors
    pub(crate) type_name: &'static str,
    /// Singleton cache, populated on first resolution
    pub(crate) single_runtime: Option<Mutex<Option<AnyArc>>>,
}

impl Registration {
    pub(crate) fn new(lifetime: Lifetime, ctor: Ctor, type_name: &'static str) -> Self {
        let single_runtime = match lifetime {
            Lifetime::Singleton => Some(Mutex::new(None)),
            Lifetime::Transient => None,
        };

        Self { lifetime, ctor, type_name, single_runtime }
    }

    /// Registration for a value that already exists.
    pub(crate) fn instance(value: AnyArc, type_name: &'static str) -> Self {
        let cached = value.clone();
        let ctor: Ctor = Arc::new(move |_: &ResolverContext| -> DiResult<AnyArc> { Ok(cached.clone()) });
        let reg = Self::new(Lifetime::Singleton, ctor, type_name);
        if let Some(cell) = &reg.single_runtime {
            *cell.lock() = Some(value);
        }
        reg
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.single_runtime
            .as_ref()
            .map(|cell| cell.lock().is_some())
            .unwrap_or(false)
    }
}

/// Service registry holding all registrations
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) services: HashMap<String, Registration>,
    /// alias -> target id
    pub(crate) aliases: HashMap<String, String>,
    /// Ids stripped from the container at build time
    pub(crate) removed: BTreeSet<String>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a registration, replacing any previous one for `id`
    pub(crate) fn insert(&mut self, id: impl Into<String>, registration: Registration) {
        let id = id.into();
        self.aliases.remove(&id);
        self.removed.remove(&id);
        self.services.insert(id, registration);
    }

    /// Follows aliases until a concrete id is reached.
    pub(crate) fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        let mut current = id;
        // Alias chains are short; the bound guards against alias loops
        for _ in 0..=self.aliases.len() {
            match self.aliases.get(current) {
                Some(target) => current = target,
                None => return current,
            }
        }
        current
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Registration> {
        self.services.get(self.canonical(id))
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
