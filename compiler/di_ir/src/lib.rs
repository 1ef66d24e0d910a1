//! di IR - Descriptors and Source Views
//!
//! This crate contains the plain data shared by every stage of the di graph
//! compiler:
//! - Dependency descriptors ([`Dependency`], [`TypeRef`], [`StructDep`]) that
//!   describe *what is wanted*
//! - The structured source view ([`Package`], [`FuncDecl`], [`StructDecl`], ...)
//!   produced by the source parser collaborator and consumed by the finder
//! - Go identifier helpers ([`ident`]) used when naming variables and imports
//!
//! # Design
//!
//! Nothing in this crate performs resolution or emits code. Descriptors are
//! constructed by the caller of a generation request; source views are
//! constructed by whatever parses Go source. Both are immutable values.
//!
//! # Identity
//!
//! A descriptor's identity is `"<import-path>".<TypeName>` with pointer-ness
//! stripped, so `*Web` and `Web` from the same package share one identity.
//! Rendering keeps the pointer.

mod dependency;
pub mod ident;
mod source;

pub use dependency::{Dependency, Field, Kind, StructDep, TypeRef};
pub use source::{
    AliasDecl, FuncDecl, InterfaceDecl, Package, Param, StructDecl, StructField,
};
