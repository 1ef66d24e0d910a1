//! Declaration discovery.
//!
//! The [`Finder`] trait is the boundary between the graph compiler and the
//! source parser: given a type, return the [`Declaration`] that produces it.
//! [`SourceFinder`] is the stock implementation, scanning packages supplied
//! by a [`PackageResolver`].

mod memory;
mod source;

use thiserror::Error;

use di_ir::{Dependency, TypeRef};

use crate::declaration::{Declaration, RecordDecl};

pub use memory::MemoryResolver;
pub use source::{PackageResolver, SourceFinder};

/// Maps a type to the declaration that produces it.
pub trait Finder {
    fn find(&self, ty: &TypeRef) -> Result<Declaration, FindError>;
}

impl<F: Finder + ?Sized> Finder for &F {
    fn find(&self, ty: &TypeRef) -> Result<Declaration, FindError> {
        (**self).find(ty)
    }
}

/// Why a type could not be matched to a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FindError {
    /// A single candidate did not fit. Only meaningful inside a scan; the
    /// scan moves on to the next candidate.
    #[error("no match")]
    NoMatch,

    /// Every candidate was rejected.
    #[error("unclear how to provide {id}{}", hint_suffix(.hint))]
    NotFound { id: String, hint: Option<String> },

    /// A candidate matched but cannot be used as-is.
    #[error("{id}: {message}")]
    Malformed { id: String, message: String },

    /// The import path could not be turned into a package.
    #[error("unable to resolve package {import:?}: {message}")]
    Resolve { import: String, message: String },
}

impl FindError {
    pub fn not_found(ty: &TypeRef) -> Self {
        FindError::NotFound {
            id: ty.id(),
            hint: None,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" ({hint})"),
        None => String::new(),
    }
}

/// Resolve a dependency descriptor to its declaration.
///
/// Named types go through the finder. Records and the error sentinel carry
/// their own shape and never search.
pub trait Discover {
    fn find<F: Finder + ?Sized>(&self, finder: &F) -> Result<Declaration, FindError>;
}

impl Discover for Dependency {
    fn find<F: Finder + ?Sized>(&self, finder: &F) -> Result<Declaration, FindError> {
        match self {
            Dependency::Type(ty) if ty.is_error() => Ok(Declaration::Error),
            Dependency::Type(ty) => finder.find(ty),
            Dependency::Struct(record) => Ok(Declaration::Record(RecordDecl {
                ty: record.ty.clone(),
                fields: record.fields.clone(),
            })),
            Dependency::Error => Ok(Declaration::Error),
        }
    }
}
