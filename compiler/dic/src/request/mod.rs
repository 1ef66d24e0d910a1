//! Generation requests.
//!
//! A [`Function`] describes one function to generate: where it lives, what
//! it returns, what it receives, and how dependencies are redirected. It is
//! the whole configuration surface of the compiler.

use di_codegen::{Import, ImportSet, Provider};
use di_graph::{Aliases, Externals, Finder, Loader, PackageResolver, SourceFinder, TargetDecl};
use di_ir::{ident, Dependency};

use crate::error::{Error, InvalidRequest};

/// A caller-supplied parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub dependency: Dependency,
    /// Computed once by the caller rather than passed fresh on each call.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hoist: bool,
}

/// Redirect every occurrence of `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alias {
    pub from: Dependency,
    pub to: Dependency,
}

/// A request to generate one Go function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// Name of the generated function.
    pub name: String,
    /// Import path of the package the function is generated into.
    pub target: String,
    /// Package clause; assumed from `target` when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub package: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Param>,
    /// Requested results, optionally ending in [`Dependency::Error`].
    pub results: Vec<Dependency>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<Alias>,
    /// Promote subtrees that need no per-call parameter to parameters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hoist: bool,
    /// Imports already present in the enclosing file.
    #[cfg_attr(feature = "serde", serde(default))]
    pub imports: Vec<Import>,
}

impl Function {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    #[must_use]
    pub fn param(mut self, dependency: Dependency) -> Self {
        self.params.push(Param {
            dependency,
            hoist: false,
        });
        self
    }

    /// A parameter computed once by the caller.
    #[must_use]
    pub fn hoisted_param(mut self, dependency: Dependency) -> Self {
        self.params.push(Param {
            dependency,
            hoist: true,
        });
        self
    }

    #[must_use]
    pub fn result(mut self, dependency: Dependency) -> Self {
        self.results.push(dependency);
        self
    }

    /// End the result list with `error`.
    #[must_use]
    pub fn returns_error(self) -> Self {
        self.result(Dependency::Error)
    }

    #[must_use]
    pub fn alias(mut self, from: Dependency, to: Dependency) -> Self {
        self.aliases.push(Alias { from, to });
        self
    }

    #[must_use]
    pub fn hoist(mut self, hoist: bool) -> Self {
        self.hoist = hoist;
        self
    }

    #[must_use]
    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// `"<target>".<Name>`
    pub fn id(&self) -> String {
        format!("\"{}\".{}", self.target, self.name)
    }

    /// The package clause of the generated file.
    pub fn package_name(&self) -> String {
        self.package
            .clone()
            .unwrap_or_else(|| ident::assumed_package_name(&self.target))
    }

    /// A [`SourceFinder`] that only sees symbols visible from `target`.
    pub fn finder<R: PackageResolver>(&self, resolver: R) -> SourceFinder<R> {
        SourceFinder::new(resolver).from_package(self.target.clone())
    }

    /// Check the request before any graph work.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.name.is_empty() {
            return Err(InvalidRequest::EmptyName);
        }
        if !is_identifier(&self.name) {
            return Err(InvalidRequest::InvalidName(self.name.clone()));
        }
        if let Some(package) = &self.package {
            if !is_identifier(package) {
                return Err(InvalidRequest::InvalidPackage(package.clone()));
            }
        }
        if self.target.is_empty() {
            return Err(InvalidRequest::EmptyTarget);
        }
        if !self.results.iter().any(|r| !r.is_error()) {
            return Err(InvalidRequest::NoResults);
        }
        let last = self.results.len() - 1;
        if let Some(position) = self.results[..last].iter().position(Dependency::is_error) {
            return Err(InvalidRequest::MisplacedError(position));
        }
        if self.params.iter().any(|p| p.dependency.is_error()) {
            return Err(InvalidRequest::ErrorParam);
        }
        Ok(())
    }

    /// Resolve, optionally hoist, and generate.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %self.id()))]
    pub fn generate<F: Finder + ?Sized>(&self, finder: &F) -> Result<Provider, Error> {
        self.validate()?;

        let mut aliases = Aliases::new();
        for alias in &self.aliases {
            aliases.insert(&alias.from, alias.to.clone());
        }
        let mut externals = Externals::new();
        for param in &self.params {
            externals.insert(&param.dependency, param.hoist);
        }

        let target = TargetDecl {
            import: self.target.clone(),
            name: self.name.clone(),
            package: self.package_name(),
            results: self.results.clone(),
        };
        let mut root = Loader::new(finder, &aliases, &externals)
            .load(target)
            .map_err(|source| Error::Load {
                name: self.id(),
                source,
            })?;

        if self.hoist {
            let hoisted = di_graph::hoist(&mut root);
            tracing::debug!(hoisted, "hoisted");
        }

        let imports = ImportSet::seeded(self.imports.iter().cloned());
        di_codegen::generate(&root, imports).map_err(|source| Error::Codegen {
            name: self.id(),
            source,
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !ident::is_keyword(s)
}
