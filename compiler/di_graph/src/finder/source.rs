//! Finder over parsed packages.
//!
//! # Search Order
//!
//! 1. Free functions, in declaration order
//! 2. Record types, in declaration order
//! 3. Type aliases, in declaration order
//!
//! The first structural match wins. A candidate that does not fit yields
//! [`FindError::NoMatch`] and the scan continues; anything else aborts.

use std::sync::Arc;

use di_ir::ident::is_exported;
use di_ir::{AliasDecl, Field, FuncDecl, Kind, Package, StructDecl, TypeRef};

use super::{FindError, Finder};
use crate::declaration::{Declaration, FunctionDecl, RecordDecl, TypeAliasDecl};

/// Turns an import path into a parsed package.
///
/// Implementations decide where packages live: the local module, a module
/// cache, the standard library, or memory.
pub trait PackageResolver {
    fn resolve(&self, import: &str) -> Result<Arc<Package>, FindError>;
}

impl<R: PackageResolver + ?Sized> PackageResolver for &R {
    fn resolve(&self, import: &str) -> Result<Arc<Package>, FindError> {
        (**self).resolve(import)
    }
}

/// Searches resolved packages for constructors.
pub struct SourceFinder<R> {
    resolver: R,
    /// Import path of the package generated code lives in. Unexported
    /// symbols of any other package are invisible.
    from: Option<String>,
}

impl<R: PackageResolver> SourceFinder<R> {
    pub fn new(resolver: R) -> Self {
        SourceFinder {
            resolver,
            from: None,
        }
    }

    /// Only consider symbols visible from `import`.
    #[must_use]
    pub fn from_package(mut self, import: impl Into<String>) -> Self {
        self.from = Some(import.into());
        self
    }

    fn visible(&self, package: &Package, name: &str) -> bool {
        match &self.from {
            Some(from) => from == &package.import || is_exported(name),
            None => true,
        }
    }

    fn try_function(
        &self,
        package: &Package,
        func: &FuncDecl,
        ty: &TypeRef,
    ) -> Result<Declaration, FindError> {
        if func.receiver.is_some() {
            return Err(FindError::NoMatch);
        }
        let Some(output) = func.results.iter().rposition(|r| !r.is_error()) else {
            return Err(FindError::NoMatch);
        };
        let result = &func.results[output];
        if result.name != ty.name {
            return Err(FindError::NoMatch);
        }
        if result.import.is_empty() && result.kind != Kind::Builtin {
            return Err(FindError::Malformed {
                id: ty.id(),
                message: format!(
                    "unable to determine the import path of {} returned by {}",
                    result.name, func.name
                ),
            });
        }
        if result.import != ty.import || !self.visible(package, &func.name) {
            return Err(FindError::NoMatch);
        }
        // Builtin-typed parameters make ambiguous constructors.
        let params = func.params.iter().filter(|p| !p.variadic);
        if params.clone().any(|p| p.ty.is_builtin()) {
            return Err(FindError::NoMatch);
        }
        Ok(Declaration::Function(FunctionDecl {
            import: package.import.clone(),
            name: func.name.clone(),
            params: params.map(|p| p.ty.clone()).collect(),
            results: func.results.clone(),
            output,
        }))
    }

    fn try_record(
        &self,
        package: &Package,
        record: &StructDecl,
        ty: &TypeRef,
    ) -> Result<Declaration, FindError> {
        if record.name != ty.name || !self.visible(package, &record.name) {
            return Err(FindError::NoMatch);
        }
        let fields = record
            .fields
            .iter()
            .filter(|f| !f.ty.is_builtin() && self.visible(package, f.key()))
            .map(|f| Field::new(f.key(), f.ty.clone()))
            .collect();
        Ok(Declaration::Record(RecordDecl {
            ty: ty.clone().with_kind(Kind::Struct),
            fields,
        }))
    }

    fn try_alias(
        &self,
        package: &Package,
        alias: &AliasDecl,
        ty: &TypeRef,
    ) -> Result<Declaration, FindError> {
        if alias.name != ty.name || !self.visible(package, &alias.name) {
            return Err(FindError::NoMatch);
        }
        let target = if ty.pointer && !alias.target.pointer {
            alias.target.to_pointer()
        } else {
            alias.target.clone()
        };
        Ok(Declaration::Alias(TypeAliasDecl {
            import: package.import.clone(),
            name: alias.name.clone(),
            target,
        }))
    }
}

impl<R: PackageResolver> Finder for SourceFinder<R> {
    fn find(&self, ty: &TypeRef) -> Result<Declaration, FindError> {
        if ty.is_builtin() {
            return Err(FindError::NotFound {
                id: ty.id(),
                hint: Some("builtin types must be passed in as parameters".to_string()),
            });
        }
        let package = self.resolver.resolve(&ty.import)?;

        let candidates = package
            .functions
            .iter()
            .map(|func| self.try_function(&package, func, ty))
            .chain(package.structs.iter().map(|s| self.try_record(&package, s, ty)))
            .chain(package.aliases.iter().map(|a| self.try_alias(&package, a, ty)));
        for candidate in candidates {
            match candidate {
                Err(FindError::NoMatch) => continue,
                Ok(decl) => {
                    tracing::trace!(id = %ty.id(), decl = %decl.id(), "found declaration");
                    return Ok(decl);
                }
                Err(err) => return Err(err),
            }
        }

        let hint = package
            .has_interface(&ty.name)
            .then(|| "interfaces need an alias to a concrete type".to_string());
        Err(FindError::NotFound {
            id: ty.id(),
            hint,
        })
    }
}
