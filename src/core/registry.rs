//! Provider constructor registry
//!
//! The registry is an explicit value owned by the composition root, not a
//! hidden process-wide singleton, so tests can build an isolated registry
//! per case. Provider implementations plug in at startup by registering a
//! constructor under their type name.

use super::error::{DispatchError, Result};
use super::provider::Provider;
use std::collections::HashMap;

/// Constructor for a provider: takes the opaque JSON options payload and
/// returns a ready provider or a configuration error.
pub type ProviderConstructor = Box<dyn Fn(&str) -> Result<Box<dyn Provider>> + Send + Sync>;

/// Mapping from provider type name to constructor function.
pub struct ProviderRegistry {
    constructors: HashMap<String, ProviderConstructor>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in providers:
    /// `console`, `colored_console`, `file`, `multifile` and `network`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::providers::register_builtins(&mut registry);
        registry
    }

    /// Register a constructor under `name`.
    ///
    /// Re-registering the same name overwrites the previous entry; the
    /// last registration wins.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&str) -> Result<Box<dyn Provider>> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    /// Look up the constructor registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&ProviderConstructor> {
        self.constructors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Construct a provider of the given type.
    ///
    /// An unknown type name surfaces as a named configuration error,
    /// never a silent no-op.
    pub fn construct(&self, name: &str, opts: &str) -> Result<Box<dyn Provider>> {
        let constructor = self
            .lookup(name)
            .ok_or_else(|| DispatchError::unregistered(name))?;
        constructor(opts)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
