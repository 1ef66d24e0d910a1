//! Memoized generation over a loaded tree.
//!
//! # Walk
//!
//! Post-order: every child is generated before its parent, and the
//! parent's declaration receives the children's output [`Variable`]s as
//! inputs in dependency order.
//!
//! # Memoization
//!
//! Each identity is generated once. Constructed values and supplied values
//! (externals and hoisted nodes) are memoized separately, so a result that
//! is also needed deep inside a hoisted subtree is still constructed for
//! the result while the hoisted occurrence becomes a parameter.
//!
//! # Naming
//!
//! Before any statement is emitted the whole tree is scanned once. Every
//! referenced package is imported (in path order, so aliases do not depend
//! on walk order) and every unqualified symbol of the target package is
//! reserved, so no local shadows an import or a type it later needs, and
//! no import alias takes a name the package already declares.

use rustc_hash::{FxHashMap, FxHashSet};

use di_graph::{ensure_sufficient_stack, Declaration, FunctionDecl, Node, RecordDecl, TargetDecl};
use di_ir::{ident, Kind, TypeRef};

use crate::imports::ImportSet;
use crate::provider::Provider;
use crate::variable::{External, Variable};
use crate::CodegenError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Key {
    Constructed(String),
    Supplied(String),
}

#[derive(Clone, Debug)]
enum Slot {
    InProgress,
    Done(Variable),
}

/// Generate the provider for a loaded tree whose root is a
/// [`Declaration::Target`].
///
/// `imports` may be pre-seeded with the imports of an enclosing file.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.id()))]
pub fn generate(root: &Node, imports: ImportSet) -> Result<Provider, CodegenError> {
    let Some(Declaration::Target(target)) = &root.declaration else {
        return Err(CodegenError::MissingDeclaration { id: root.id() });
    };
    Generator::new(target, imports).run(root)
}

/// Generation state for one target.
pub struct Generator<'a> {
    target: &'a TargetDecl,
    imports: ImportSet,
    /// Target-package symbols referenced unqualified.
    locals: FxHashSet<String>,
    /// Identifiers already bound in the generated function.
    names: FxHashSet<String>,
    memo: FxHashMap<Key, Slot>,
    externals: Vec<External>,
    /// Zero values of the non-error results, for early returns.
    zeros: Vec<String>,
    code: String,
    has_error: bool,
}

impl<'a> Generator<'a> {
    pub fn new(target: &'a TargetDecl, imports: ImportSet) -> Self {
        Generator {
            target,
            imports,
            locals: FxHashSet::default(),
            names: FxHashSet::default(),
            memo: FxHashMap::default(),
            externals: Vec::new(),
            zeros: Vec::new(),
            code: String::with_capacity(1024),
            has_error: false,
        }
    }

    /// Generate `root` and assemble the provider.
    pub fn run(mut self, root: &Node) -> Result<Provider, CodegenError> {
        self.prepare(root)?;

        let mut results = Vec::with_capacity(root.children.len());
        for child in &root.children {
            results.push(self.generate_node(child)?);
        }
        self.finish(results)
    }

    // ── Preparation ─────────────────────────────────────────────

    fn prepare(&mut self, root: &Node) -> Result<(), CodegenError> {
        self.locals.insert(self.target.name.clone());

        let mut paths = Vec::new();
        for result in &self.target.results {
            let ty = result.type_ref();
            self.reference(&ty.import, &ty.name, &mut paths);
        }
        for child in &root.children {
            self.collect(child, &mut paths);
        }
        paths.sort_unstable();
        paths.dedup();
        for local in &self.locals {
            self.imports.reserve(local.clone());
        }
        for path in &paths {
            self.imports.insert(path);
        }

        for result in &self.target.results {
            if !result.is_error() {
                let zero = self.zero_value(&result.type_ref())?;
                self.zeros.push(zero);
            }
        }
        Ok(())
    }

    /// Record the packages and local symbols `node` will reference.
    fn collect(&mut self, node: &Node, paths: &mut Vec<String>) {
        ensure_sufficient_stack(|| {
            if node.is_supplied() {
                self.reference(&node.ty.import, &node.ty.name, paths);
                return;
            }
            match &node.declaration {
                Some(Declaration::Function(func)) => {
                    self.reference(&func.import, &func.name, paths);
                }
                Some(Declaration::Record(record)) => {
                    self.reference(&record.ty.import, &record.ty.name, paths);
                }
                _ => {}
            }
            for child in &node.children {
                self.collect(child, paths);
            }
        });
    }

    fn reference(&mut self, import: &str, name: &str, paths: &mut Vec<String>) {
        if import.is_empty() {
            return;
        }
        if import == self.target.import {
            self.locals.insert(name.to_string());
        } else {
            paths.push(import.to_string());
        }
    }

    // ── Walk ────────────────────────────────────────────────────

    fn generate_node(&mut self, node: &Node) -> Result<Variable, CodegenError> {
        ensure_sufficient_stack(|| self.generate_node_inner(node))
    }

    fn generate_node_inner(&mut self, node: &Node) -> Result<Variable, CodegenError> {
        let id = node.id();
        let key = if node.is_supplied() {
            Key::Supplied(id.clone())
        } else {
            Key::Constructed(id.clone())
        };
        match self.memo.get(&key) {
            Some(Slot::Done(variable)) => return Ok(variable.clone()),
            Some(Slot::InProgress) => return Err(CodegenError::Cycle { id }),
            None => {}
        }

        if node.is_supplied() {
            let variable = self.external(node)?;
            self.memo.insert(key, Slot::Done(variable.clone()));
            return Ok(variable);
        }

        let Some(declaration) = &node.declaration else {
            return Err(CodegenError::MissingDeclaration { id });
        };
        self.memo.insert(key.clone(), Slot::InProgress);

        let mut inputs = Vec::with_capacity(node.children.len());
        for child in &node.children {
            inputs.push(self.generate_node(child)?);
        }

        let output = match declaration {
            Declaration::Function(func) => self.function(node, func, &inputs)?,
            Declaration::Record(record) => self.record(record, &inputs)?,
            Declaration::Alias(_) => {
                let Some(inner) = inputs.first() else {
                    return Err(CodegenError::MissingDeclaration { id });
                };
                // Same value, typed as the alias.
                let ty = node.ty.clone().with_kind(inner.ty.kind);
                Variable::new(inner.name.clone(), ty)
            }
            Declaration::Error => Variable::nil_error(),
            Declaration::Target(_) => return Err(CodegenError::NestedTarget { id }),
        };
        self.memo.insert(key, Slot::Done(output.clone()));
        Ok(output)
    }

    fn external(&mut self, node: &Node) -> Result<Variable, CodegenError> {
        let type_expr = self.qualify(&node.ty)?;
        let name = self.allocate(&node.ty);
        tracing::trace!(id = %node.id(), %name, hoisted = node.hoist, "parameter");
        let variable = Variable::new(name, node.ty.clone());
        self.externals
            .push(External::new(variable.clone(), node.hoist, type_expr));
        Ok(variable)
    }

    // ── Declarations ────────────────────────────────────────────

    fn function(
        &mut self,
        node: &Node,
        func: &FunctionDecl,
        inputs: &[Variable],
    ) -> Result<Variable, CodegenError> {
        let callee = self.symbol(&func.import, &func.name)?;
        let args: Vec<String> = func
            .params
            .iter()
            .zip(inputs)
            .map(|(param, input)| input.coerce(param))
            .collect();

        let mut ty = func.output_type().clone();
        if ty.kind == Kind::Unknown {
            ty.kind = node.ty.kind;
        }
        let name = self.allocate(&ty);

        let returns_error = func.returns_error();
        let last = func.results.len().saturating_sub(1);
        let bindings: Vec<&str> = (0..func.results.len())
            .map(|i| {
                if i == func.output {
                    name.as_str()
                } else if returns_error && i == last {
                    "err"
                } else {
                    "_"
                }
            })
            .collect();

        self.line(&format!(
            "{} := {callee}({})",
            bindings.join(", "),
            args.join(", ")
        ));
        if returns_error {
            self.guard();
        }
        Ok(Variable::new(name, ty))
    }

    fn record(&mut self, record: &RecordDecl, inputs: &[Variable]) -> Result<Variable, CodegenError> {
        let literal = self.symbol(&record.ty.import, &record.ty.name)?;
        let fields: Vec<String> = record
            .fields
            .iter()
            .zip(inputs)
            .map(|(field, input)| format!("{}: {}", field.name, input.coerce(&field.ty)))
            .collect();

        let name = self.allocate(&record.ty);
        let amp = if record.ty.pointer { "&" } else { "" };
        self.line(&format!("{name} := {amp}{literal}{{{}}}", fields.join(", ")));
        Ok(Variable::new(name, record.ty.clone()))
    }

    /// Return early with zero values when the last call failed.
    fn guard(&mut self) {
        self.has_error = true;
        let mut values = self.zeros.clone();
        values.push("err".to_string());
        self.line("if err != nil {");
        self.line(&format!("\treturn {}", values.join(", ")));
        self.line("}");
    }

    fn line(&mut self, statement: &str) {
        tracing::trace!(statement, "emit");
        self.code.push('\t');
        self.code.push_str(statement);
        self.code.push('\n');
    }

    // ── Rendering helpers ───────────────────────────────────────

    /// `alias.Name`, or `Name` within the target package and for builtins.
    fn symbol(&self, import: &str, name: &str) -> Result<String, CodegenError> {
        if import.is_empty() || import == self.target.import {
            return Ok(name.to_string());
        }
        match self.imports.alias(import) {
            Some(alias) => Ok(format!("{alias}.{name}")),
            None => Err(CodegenError::MissingImport {
                path: import.to_string(),
            }),
        }
    }

    /// Type expression for `ty`, pointer star included.
    fn qualify(&self, ty: &TypeRef) -> Result<String, CodegenError> {
        let star = if ty.pointer { "*" } else { "" };
        Ok(format!("{star}{}", self.symbol(&ty.import, &ty.name)?))
    }

    fn zero_value(&self, ty: &TypeRef) -> Result<String, CodegenError> {
        if ty.pointer || ty.kind.is_nilable() || ty.is_error() {
            return Ok("nil".to_string());
        }
        let zero = match ty.kind {
            Kind::Struct | Kind::Array => format!("{}{{}}", self.qualify(ty)?),
            Kind::Builtin if ty.import.is_empty() => builtin_zero(&ty.name)
                .map_or_else(|| format!("*new({})", ty.name), str::to_string),
            _ => format!("*new({})", self.qualify(ty)?),
        };
        Ok(zero)
    }

    /// Pick a fresh identifier for a value of type `ty`.
    ///
    /// Tries the lower-camel type name, then the name prefixed with its
    /// import alias, then numeric suffixes.
    fn allocate(&mut self, ty: &TypeRef) -> String {
        let mut base = ident::lower_camel(&ty.name);
        if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
            base = format!("v{base}");
        }

        let mut candidates = vec![base.clone()];
        if !ty.import.is_empty() && ty.import != self.target.import {
            if let Some(alias) = self.imports.alias(&ty.import) {
                candidates.push(ident::lower_camel(&format!(
                    "{alias}{}",
                    ident::upper_first(&ty.name)
                )));
            }
        }

        let mut n = 2;
        let name = loop {
            if let Some(free) = candidates.iter().find(|c| self.is_free(c)) {
                break free.clone();
            }
            candidates = vec![format!("{base}{n}")];
            n += 1;
        };
        self.names.insert(name.clone());
        name
    }

    fn is_free(&self, name: &str) -> bool {
        !ident::is_reserved(name)
            && !self.names.contains(name)
            && !self.locals.contains(name)
            && !self.imports.is_alias(name)
    }

    // ── Assembly ────────────────────────────────────────────────

    fn finish(mut self, results: Vec<Variable>) -> Result<Provider, CodegenError> {
        let mut values = Vec::with_capacity(results.len() + 1);
        let mut result_types = Vec::with_capacity(results.len() + 1);
        for (requested, variable) in self.target.results.iter().zip(&results) {
            let ty = requested.type_ref();
            values.push(variable.coerce(&ty));
            result_types.push(self.qualify(&ty)?);
        }
        if self.has_error && !self.target.wants_error() {
            values.push("nil".to_string());
            result_types.push("error".to_string());
        }
        self.line(&format!("return {}", values.join(", ")));

        self.externals
            .sort_by(|a, b| (!a.hoisted, a.name()).cmp(&(!b.hoisted, b.name())));

        tracing::debug!(
            externals = self.externals.len(),
            imports = self.imports.imports().len(),
            has_error = self.has_error,
            "provider generated"
        );

        Ok(Provider {
            name: self.target.name.clone(),
            package: self.target.package.clone(),
            import: self.target.import.clone(),
            imports: self.imports.imports(),
            externals: self.externals,
            results,
            result_types,
            code: self.code,
        })
    }
}

fn builtin_zero(name: &str) -> Option<&'static str> {
    let zero = match name {
        "string" => "\"\"",
        "bool" => "false",
        "error" | "any" => "nil",
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "byte" | "rune" | "float32" | "float64" | "complex64"
        | "complex128" => "0",
        _ => return None,
    };
    Some(zero)
}
