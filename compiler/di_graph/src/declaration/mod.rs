//! Discovered instantiation strategies.
//!
//! A [`Declaration`] knows what it needs ([`Declaration::dependencies`]) and
//! carries everything the code generator needs to emit it. Declarations are
//! created once per distinct dependency during loading and never mutated.

use smallvec::SmallVec;

use di_ir::{Dependency, Field, Kind, TypeRef};

/// A way of producing a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// Call a free function and forward one of its results.
    Function(FunctionDecl),
    /// Build a composite literal, instantiating each field.
    Record(RecordDecl),
    /// `type A = B`: forwards to the underlying type, emits nothing.
    Alias(TypeAliasDecl),
    /// The trailing error slot. Needs nothing, emits nothing.
    Error,
    /// The generation request itself. Its dependencies are the requested results.
    Target(TargetDecl),
}

impl Declaration {
    /// Identity of the declaration's origin symbol.
    pub fn id(&self) -> String {
        match self {
            Declaration::Function(func) => symbol_id(&func.import, &func.name),
            Declaration::Record(record) => record.ty.id(),
            Declaration::Alias(alias) => symbol_id(&alias.import, &alias.name),
            Declaration::Error => "error".to_string(),
            Declaration::Target(target) => symbol_id(&target.import, &target.name),
        }
    }

    /// Import path of the package the declaration lives in.
    pub fn import_path(&self) -> &str {
        match self {
            Declaration::Function(func) => &func.import,
            Declaration::Record(record) => &record.ty.import,
            Declaration::Alias(alias) => &alias.import,
            Declaration::Error => "",
            Declaration::Target(target) => &target.import,
        }
    }

    /// What must be resolved before this declaration can be instantiated.
    ///
    /// The order matches the order of the declaration's inputs at generation
    /// time: parameters, fields, the alias target, or the requested results.
    pub fn dependencies(&self) -> SmallVec<[Dependency; 4]> {
        match self {
            Declaration::Function(func) => func
                .params
                .iter()
                .map(|param| Dependency::Type(param.clone()))
                .collect(),
            Declaration::Record(record) => record
                .fields
                .iter()
                .map(|field| Dependency::Type(field.ty.clone()))
                .collect(),
            Declaration::Alias(alias) => {
                let mut deps = SmallVec::new();
                deps.push(Dependency::Type(alias.target.clone()));
                deps
            }
            Declaration::Error => SmallVec::new(),
            Declaration::Target(target) => target.results.iter().cloned().collect(),
        }
    }

    /// Shape of the value this declaration produces, when it knows it.
    pub fn output_kind(&self) -> Kind {
        match self {
            Declaration::Function(func) => func.output_type().kind,
            Declaration::Record(_) => Kind::Struct,
            Declaration::Alias(alias) => alias.target.kind,
            Declaration::Error => Kind::Builtin,
            Declaration::Target(_) => Kind::Unknown,
        }
    }
}

fn symbol_id(import: &str, name: &str) -> String {
    format!("\"{import}\".{name}")
}

/// A free function provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub import: String,
    pub name: String,
    /// Non-variadic parameters, in order.
    pub params: Vec<TypeRef>,
    pub results: Vec<TypeRef>,
    /// Index into `results` of the value this provider supplies.
    pub output: usize,
}

impl FunctionDecl {
    /// The result this provider supplies.
    pub fn output_type(&self) -> &TypeRef {
        &self.results[self.output]
    }

    /// True if the last result is `error`.
    pub fn returns_error(&self) -> bool {
        self.results.last().is_some_and(TypeRef::is_error)
    }
}

/// A record built as a keyed composite literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDecl {
    /// The record type, pointer if the first requester wanted a pointer.
    pub ty: TypeRef,
    pub fields: Vec<Field>,
}

/// A language-level type alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub import: String,
    pub name: String,
    pub target: TypeRef,
}

/// The function being generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetDecl {
    /// Import path of the package the function is generated into.
    pub import: String,
    /// Function name.
    pub name: String,
    /// Package clause for rendered files.
    pub package: String,
    /// Requested results, optionally ending in [`Dependency::Error`].
    pub results: Vec<Dependency>,
}

impl TargetDecl {
    pub fn id(&self) -> String {
        symbol_id(&self.import, &self.name)
    }

    /// True if the request ends in the error sentinel.
    pub fn wants_error(&self) -> bool {
        self.results.last().is_some_and(Dependency::is_error)
    }
}

#[cfg(test)]
mod tests;
