//! Graph loading.
//!
//! Resolves a [`TargetDecl`] into a tree of [`Node`]s by recursive search.
//!
//! # Algorithm
//!
//! For each dependency `d`:
//!
//! 1. If `d`'s identity is aliased, replace `d` with the alias target.
//! 2. If `d`'s identity is an external, emit a terminal external node.
//! 3. Otherwise find `d`'s declaration and recurse into its dependencies.
//!
//! Aliasing is identity-scoped: every occurrence of an identity anywhere in
//! the tree is redirected, regardless of position.
//!
//! # Failure
//!
//! The first failure aborts the whole load. The error names the chain of
//! identities from the target down to the dependency that failed. A
//! dependency reappearing on its own resolution path is reported as a cycle.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use di_ir::{Dependency, Kind};

use crate::declaration::{Declaration, TargetDecl};
use crate::finder::{Discover, FindError, Finder};
use crate::node::Node;
use crate::stack::ensure_sufficient_stack;

/// Caller-declared substitutions, keyed by identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aliases {
    map: FxHashMap<String, Dependency>,
}

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect every occurrence of `from` to `to`.
    pub fn insert(&mut self, from: &Dependency, to: Dependency) {
        self.map.insert(from.id(), to);
    }

    pub fn get(&self, id: &str) -> Option<&Dependency> {
        self.map.get(id)
    }

    /// The dependency to load in place of `dep`.
    pub fn resolve<'a>(&'a self, dep: &'a Dependency) -> &'a Dependency {
        self.map.get(&dep.id()).unwrap_or(dep)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Caller-supplied parameters, keyed by identity.
///
/// The flag records whether the parameter is itself hoisted (computed once
/// upstream) rather than supplied fresh on every call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Externals {
    map: FxHashMap<String, bool>,
}

impl Externals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dep: &Dependency, hoist: bool) {
        self.map.insert(dep.id(), hoist);
    }

    /// `Some(hoist)` if `id` is an external.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.map.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Failure to load a dependency tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A dependency could not be resolved. `chain` runs from the target to
    /// the dependency whose declaration needed it.
    #[error("{}: {source}", .chain.join(" -> "))]
    Unresolved {
        chain: Vec<String>,
        #[source]
        source: FindError,
    },

    /// A dependency needs itself, directly or transitively.
    #[error("dependency cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Recursive loader state for one generation request.
pub struct Loader<'a, F: ?Sized> {
    finder: &'a F,
    aliases: &'a Aliases,
    externals: &'a Externals,
    /// Declarations already discovered, by identity.
    cache: FxHashMap<String, Declaration>,
    /// Identities on the current resolution path, outermost first.
    path: Vec<String>,
    resolving: FxHashSet<String>,
}

impl<'a, F: Finder + ?Sized> Loader<'a, F> {
    pub fn new(finder: &'a F, aliases: &'a Aliases, externals: &'a Externals) -> Self {
        Loader {
            finder,
            aliases,
            externals,
            cache: FxHashMap::default(),
            path: Vec::new(),
            resolving: FxHashSet::default(),
        }
    }

    /// Load the full tree for `target`. The returned root owns a
    /// [`Declaration::Target`] whose children are the requested results.
    #[tracing::instrument(level = "debug", skip_all, fields(target = %target.id()))]
    pub fn load(&mut self, target: TargetDecl) -> Result<Node, LoadError> {
        self.path.clear();
        self.resolving.clear();
        self.path.push(target.id());

        let mut children = Vec::with_capacity(target.results.len());
        for result in &target.results {
            children.push(self.load_dependency(result)?);
        }
        self.path.pop();

        let ty = di_ir::TypeRef::new(target.import.clone(), &target.name);
        let root = Node::declared(ty, Declaration::Target(target), children);
        tracing::debug!(
            nodes = root.count(),
            declarations = self.cache.len(),
            "dependency tree loaded"
        );
        Ok(root)
    }

    fn load_dependency(&mut self, dep: &Dependency) -> Result<Node, LoadError> {
        ensure_sufficient_stack(|| self.load_dependency_inner(dep))
    }

    fn load_dependency_inner(&mut self, dep: &Dependency) -> Result<Node, LoadError> {
        let dep = self.aliases.resolve(dep).clone();
        let id = dep.id();

        if let Some(hoist) = self.externals.get(&id) {
            tracing::trace!(%id, hoist, "external");
            return Ok(Node::external(dep.type_ref(), hoist));
        }

        if !self.resolving.insert(id.clone()) {
            let mut path = self.path.clone();
            path.push(id);
            return Err(LoadError::Cycle { path });
        }
        self.path.push(id.clone());
        let node = self.resolve(&dep, &id);
        self.path.pop();
        self.resolving.remove(&id);
        node
    }

    fn resolve(&mut self, dep: &Dependency, id: &str) -> Result<Node, LoadError> {
        let declaration = match self.cache.get(id) {
            Some(declaration) => declaration.clone(),
            None => {
                let declaration = dep.find(self.finder).map_err(|source| {
                    LoadError::Unresolved {
                        chain: self.path[..self.path.len() - 1].to_vec(),
                        source,
                    }
                })?;
                tracing::trace!(%id, declaration = %declaration.id(), "resolved");
                self.cache.insert(id.to_string(), declaration.clone());
                declaration
            }
        };

        let dependencies = declaration.dependencies();
        let mut children = Vec::with_capacity(dependencies.len());
        for child in &dependencies {
            children.push(self.load_dependency(child)?);
        }

        let mut ty = dep.type_ref();
        let kind = match &declaration {
            Declaration::Alias(_) => children.first().map_or(Kind::Unknown, |c| c.ty.kind),
            other => other.output_kind(),
        };
        if kind != Kind::Unknown {
            ty.kind = kind;
        }
        Ok(Node::declared(ty, declaration, children))
    }
}

#[cfg(test)]
mod tests;
