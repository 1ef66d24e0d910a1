//! Go Code Generation Backend for di
//!
//! Turns a loaded (and optionally hoisted) dependency tree into a Go
//! function that constructs the requested results.
//!
//! # Architecture
//!
//! ```text
//! Node (loaded tree)
//!        ↓
//!    ImportSet        (collect every referenced package, assign aliases)
//!        ↓
//!    Generator        (memoized post-order walk, one statement per identity)
//!        ↓
//!    Provider         (signature + body, or a complete Go file)
//! ```
//!
//! # Sharing
//!
//! Generation is memoized by node identity, so a dependency needed by many
//! consumers is instantiated once and its variable referenced by each.
//!
//! # Determinism
//!
//! Imports, parameters and identifiers are all assigned in a fixed order;
//! generating twice from the same tree yields byte-identical output.

mod generator;
mod imports;
mod provider;
mod variable;

use thiserror::Error;

pub use generator::{generate, Generator};
pub use imports::{Import, ImportSet};
pub use provider::{Provider, HEADER};
pub use variable::{External, Variable};

/// An internal invariant of the loaded tree did not hold.
///
/// None of these are expected from a tree produced by
/// [`di_graph::Loader`]; they guard hand-built trees.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A non-external node carries no declaration.
    #[error("no declaration for {id}")]
    MissingDeclaration { id: String },

    /// An identity was reached again while still being generated.
    #[error("{id} depends on itself")]
    Cycle { id: String },

    /// A target declaration below the root.
    #[error("{id} is a target and may only be the root")]
    NestedTarget { id: String },

    /// A type was rendered before its package was imported.
    #[error("package {path} was never imported")]
    MissingImport { path: String },
}
