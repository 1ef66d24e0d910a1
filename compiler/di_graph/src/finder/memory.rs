//! In-memory package resolver.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use di_ir::Package;

use super::{FindError, PackageResolver};

/// Serves pre-parsed packages keyed by import path.
#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    packages: FxHashMap<String, Arc<Package>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package, replacing any previous package at the same import path.
    pub fn insert(&mut self, package: Package) {
        self.packages
            .insert(package.import.clone(), Arc::new(package));
    }

    #[must_use]
    pub fn with(mut self, package: Package) -> Self {
        self.insert(package);
        self
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageResolver for MemoryResolver {
    fn resolve(&self, import: &str) -> Result<Arc<Package>, FindError> {
        self.packages
            .get(import)
            .cloned()
            .ok_or_else(|| FindError::Resolve {
                import: import.to_string(),
                message: "package not found".to_string(),
            })
    }
}
