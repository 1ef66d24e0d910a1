//! The rendered output of one generation.

use std::fmt::Write as _;

use di_ir::TypeRef;

use crate::imports::{self, Import};
use crate::variable::{External, Variable};

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by di. DO NOT EDIT.";

/// A generated Go function.
///
/// Either splice [`Provider::params`], [`Provider::results_signature`] and
/// [`Provider::body`] into a template, or emit a standalone unit with
/// [`Provider::file`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provider {
    /// Function name.
    pub name: String,
    /// Package clause of the target package.
    pub package: String,
    /// Import path of the target package.
    pub import: String,
    /// Imports referenced by the signature and body, in render order.
    pub imports: Vec<Import>,
    /// Parameters: hoisted first, then by identifier.
    pub externals: Vec<External>,
    /// Output values, one per requested result.
    pub results: Vec<Variable>,
    /// Rendered result types, including an implicit trailing `error`.
    pub result_types: Vec<String>,
    /// Function body, one tab-indented statement per line, ending in `return`.
    pub code: String,
}

impl Provider {
    /// Parameter list without parentheses: `ctx context.Context, env *env.Env`.
    pub fn params(&self) -> String {
        self.externals
            .iter()
            .map(External::param)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Result list as written after the parameter list.
    ///
    /// A single result is bare; several are parenthesized.
    pub fn results_signature(&self) -> String {
        match self.result_types.as_slice() {
            [] => String::new(),
            [single] => single.clone(),
            many => format!("({})", many.join(", ")),
        }
    }

    /// `func Name(params) results`
    pub fn signature(&self) -> String {
        let results = self.results_signature();
        if results.is_empty() {
            format!("func {}({})", self.name, self.params())
        } else {
            format!("func {}({}) {results}", self.name, self.params())
        }
    }

    pub fn body(&self) -> &str {
        &self.code
    }

    /// The complete function definition.
    pub fn function(&self) -> String {
        format!("{} {{\n{}}}\n", self.signature(), self.code)
    }

    /// A compilable file: header, package clause, imports, function.
    pub fn file(&self) -> String {
        let mut out = String::with_capacity(self.code.len() + 256);
        let _ = writeln!(out, "{HEADER}");
        out.push('\n');
        let _ = writeln!(out, "package {}", self.package);
        out.push('\n');
        let block = imports::render(&self.imports);
        if !block.is_empty() {
            out.push_str(&block);
            out.push('\n');
        }
        out.push_str(&self.function());
        out
    }

    /// Parameter identifier chosen for `ty` from `import`.
    ///
    /// `ty` may carry a pointer star; lookup is by identity.
    pub fn variable(&self, import: &str, ty: &str) -> Option<&str> {
        let id = TypeRef::new(import, ty).id();
        self.externals
            .iter()
            .find(|external| external.key() == id)
            .map(External::name)
    }

    /// Parameters computed once upstream.
    pub fn hoisted(&self) -> impl Iterator<Item = &External> {
        self.externals.iter().filter(|external| external.hoisted)
    }
}

#[cfg(test)]
mod tests;
