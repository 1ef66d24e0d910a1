//! Dependency descriptors.
//!
//! A [`Dependency`] is a request for a value: a named type, a record with an
//! explicit field list, or the trailing error sentinel.

use std::fmt;

/// Static shape of a Go type.
///
/// Drives pointer/value coercion at call sites and zero values in error
/// guards. `Unknown` is used when the producer of a descriptor did not
/// classify the type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    #[default]
    Unknown,
    /// `string`, `int`, `bool`, `error`, ...
    Builtin,
    Struct,
    Interface,
    Func,
    Map,
    Slice,
    Array,
    Chan,
}

impl Kind {
    /// Interface-shaped types accept pointer values without coercion.
    #[inline]
    pub fn is_interface(self) -> bool {
        matches!(self, Kind::Interface)
    }

    /// Types whose zero value is `nil`.
    #[inline]
    pub fn is_nilable(self) -> bool {
        matches!(
            self,
            Kind::Interface | Kind::Func | Kind::Map | Kind::Slice | Kind::Chan
        )
    }
}

/// A reference to a named Go type.
///
/// `import` is empty for builtin types (`string`, `error`, ...). `name` never
/// carries the pointer star; `pointer` does.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    pub import: String,
    pub name: String,
    pub pointer: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: Kind,
}

impl TypeRef {
    /// Create a type reference from an import path and a type name.
    ///
    /// A leading `*` on `ty` marks the reference as a pointer.
    pub fn new(import: impl Into<String>, ty: &str) -> Self {
        let (pointer, name) = match ty.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, ty),
        };
        TypeRef {
            import: import.into(),
            name: name.to_string(),
            pointer,
            kind: Kind::Unknown,
        }
    }

    /// A predeclared type such as `string` or `int`.
    pub fn builtin(name: &str) -> Self {
        TypeRef::new("", name).with_kind(Kind::Builtin)
    }

    /// The predeclared `error` interface.
    pub fn error() -> Self {
        TypeRef::builtin("error")
    }

    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Same type, pointer-to.
    #[must_use]
    pub fn to_pointer(&self) -> Self {
        TypeRef {
            pointer: true,
            ..self.clone()
        }
    }

    /// Identity string: `"<import>".<Name>`, pointer stripped.
    ///
    /// Builtins have no import path and are identified by name alone.
    pub fn id(&self) -> String {
        if self.import.is_empty() {
            self.name.clone()
        } else {
            format!("\"{}\".{}", self.import, self.name)
        }
    }

    /// Type name with the pointer star, unqualified (`*Web`).
    pub fn type_name(&self) -> String {
        if self.pointer {
            format!("*{}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// True for predeclared types.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.import.is_empty() || self.kind == Kind::Builtin
    }

    /// True for the predeclared `error` type.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.import.is_empty() && self.name == "error" && !self.pointer
    }

    /// Import path and base name match, ignoring pointer-ness.
    #[inline]
    pub fn same_type(&self, other: &TypeRef) -> bool {
        self.import == other.import && self.name == other.name
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.pointer { "*" } else { "" };
        if self.import.is_empty() {
            write!(f, "{star}{}", self.name)
        } else {
            write!(f, "{star}\"{}\".{}", self.import, self.name)
        }
    }
}

/// A named field of a record dependency.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// A record to construct from an explicit field list.
///
/// Unlike [`Dependency::Type`], a record is never searched for: the caller
/// already knows its shape, so it resolves to a composite literal directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDep {
    pub ty: TypeRef,
    pub fields: Vec<Field>,
}

impl StructDep {
    pub fn new(ty: TypeRef) -> Self {
        StructDep {
            ty: ty.with_kind(Kind::Struct),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }
}

/// A request for a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dependency {
    /// A named type, located by searching its package.
    Type(TypeRef),
    /// A record with a caller-supplied field list.
    Struct(StructDep),
    /// The trailing error result. Always satisfiable, never searched for.
    Error,
}

impl Dependency {
    /// Shorthand for `Dependency::Type(TypeRef::new(import, ty))`.
    pub fn ty(import: impl Into<String>, ty: &str) -> Self {
        Dependency::Type(TypeRef::new(import, ty))
    }

    pub fn id(&self) -> String {
        match self {
            Dependency::Type(ty) => ty.id(),
            Dependency::Struct(record) => record.ty.id(),
            Dependency::Error => "error".to_string(),
        }
    }

    pub fn import_path(&self) -> &str {
        match self {
            Dependency::Type(ty) => &ty.import,
            Dependency::Struct(record) => &record.ty.import,
            Dependency::Error => "",
        }
    }

    /// Unqualified type name including the pointer star.
    pub fn type_name(&self) -> String {
        match self {
            Dependency::Type(ty) => ty.type_name(),
            Dependency::Struct(record) => record.ty.type_name(),
            Dependency::Error => "error".to_string(),
        }
    }

    /// The type this dependency produces.
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Dependency::Type(ty) => ty.clone(),
            Dependency::Struct(record) => record.ty.clone(),
            Dependency::Error => TypeRef::error(),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        match self {
            Dependency::Error => true,
            Dependency::Type(ty) => ty.is_error(),
            Dependency::Struct(_) => false,
        }
    }
}

impl From<TypeRef> for Dependency {
    fn from(ty: TypeRef) -> Self {
        if ty.is_error() {
            Dependency::Error
        } else {
            Dependency::Type(ty)
        }
    }
}

impl From<StructDep> for Dependency {
    fn from(record: StructDep) -> Self {
        Dependency::Struct(record)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Type(ty) => write!(f, "{ty}"),
            Dependency::Struct(record) => write!(f, "{}", record.ty),
            Dependency::Error => f.write_str("error"),
        }
    }
}
