//! Structured source view.
//!
//! The shape of a parsed Go package as the finder sees it: top-level
//! functions, record types, type aliases and interfaces, in declaration
//! order. Type references are already resolved to their import paths.

use crate::dependency::TypeRef;
use crate::ident::is_exported;

/// A parsed package.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Package {
    /// Import path the package is reachable at.
    pub import: String,
    /// Declared package name (`package web`).
    pub name: String,
    pub functions: Vec<FuncDecl>,
    pub structs: Vec<StructDecl>,
    pub aliases: Vec<AliasDecl>,
    pub interfaces: Vec<InterfaceDecl>,
}

impl Package {
    pub fn new(import: impl Into<String>, name: impl Into<String>) -> Self {
        Package {
            import: import.into(),
            name: name.into(),
            ..Package::default()
        }
    }

    #[must_use]
    pub fn function(mut self, func: FuncDecl) -> Self {
        self.functions.push(func);
        self
    }

    #[must_use]
    pub fn record(mut self, record: StructDecl) -> Self {
        self.structs.push(record);
        self
    }

    #[must_use]
    pub fn alias(mut self, name: impl Into<String>, target: TypeRef) -> Self {
        self.aliases.push(AliasDecl {
            name: name.into(),
            target,
        });
        self
    }

    #[must_use]
    pub fn interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(InterfaceDecl { name: name.into() });
        self
    }

    /// True if the package declares an interface with this name.
    pub fn has_interface(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name == name)
    }
}

/// A top-level function or method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver type for methods; `None` for free functions.
    pub receiver: Option<TypeRef>,
    pub params: Vec<Param>,
    pub results: Vec<TypeRef>,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>) -> Self {
        FuncDecl {
            name: name.into(),
            receiver: None,
            params: Vec::new(),
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn receiver(mut self, ty: TypeRef) -> Self {
        self.receiver = Some(ty);
        self
    }

    #[must_use]
    pub fn param(mut self, ty: TypeRef) -> Self {
        self.params.push(Param {
            name: None,
            ty,
            variadic: false,
        });
        self
    }

    #[must_use]
    pub fn variadic(mut self, ty: TypeRef) -> Self {
        self.params.push(Param {
            name: None,
            ty,
            variadic: true,
        });
        self
    }

    #[must_use]
    pub fn result(mut self, ty: TypeRef) -> Self {
        self.results.push(ty);
        self
    }

    /// Append a trailing `error` result.
    #[must_use]
    pub fn returns_error(self) -> Self {
        self.result(TypeRef::error())
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeRef,
    /// `...T`; only ever the last parameter.
    pub variadic: bool,
}

/// A record type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl StructDecl {
    pub fn new(name: impl Into<String>) -> Self {
        StructDecl {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(StructField {
            name: Some(name.into()),
            ty,
        });
        self
    }

    /// An embedded (anonymous) field.
    #[must_use]
    pub fn embed(mut self, ty: TypeRef) -> Self {
        self.fields.push(StructField { name: None, ty });
        self
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// A record field. Embedded fields have no explicit name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructField {
    pub name: Option<String>,
    pub ty: TypeRef,
}

impl StructField {
    /// The name used in a keyed composite literal.
    ///
    /// Embedded fields are keyed by their unqualified type name.
    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.ty.name)
    }
}

/// `type Name = Target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasDecl {
    pub name: String,
    pub target: TypeRef,
}

/// An interface type declaration. Only the name matters to the finder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
}
