//! Dependency graph construction for the di compiler.
//!
//! This crate turns a generation target into a resolved tree of [`Node`]s:
//!
//! ```text
//! TargetDecl (requested results)
//!        ↓
//!     Loader      (alias substitution, external cut-off, Finder search)
//!        ↓
//!      Node       (resolved tree, one Declaration per non-external node)
//!        ↓
//!     hoist()     (optional: promote context-free subtrees to externals)
//! ```
//!
//! # Declarations
//!
//! [`Declaration`] is a closed sum type. Every way of producing a value
//! (free-function provider, record literal, type alias, error sentinel,
//! the top-level target) is one variant, and code generation matches on
//! it exhaustively.
//!
//! # Finder
//!
//! Discovery of declarations is delegated to a [`Finder`]. The bundled
//! [`SourceFinder`] searches parsed packages supplied by a
//! [`PackageResolver`]; [`MemoryResolver`] serves packages from memory.

mod declaration;
mod finder;
mod hoist;
mod loader;
mod node;
mod stack;

#[cfg(test)]
mod test_helpers;

pub use declaration::{Declaration, FunctionDecl, RecordDecl, TargetDecl, TypeAliasDecl};
pub use finder::{Discover, FindError, Finder, MemoryResolver, PackageResolver, SourceFinder};
pub use hoist::hoist;
pub use loader::{Aliases, Externals, LoadError, Loader};
pub use node::Node;
pub use stack::ensure_sufficient_stack;
