use std::cell::Cell;

use pretty_assertions::assert_eq;

use di_ir::{Dependency, FuncDecl, Kind, Package, TypeRef};

use super::*;
use crate::finder::{MemoryResolver, SourceFinder};
use crate::test_helpers::{context, ptr, resolver, target, ENV, LOG, WEB};

/// Finder wrapper counting how often the loader searches.
struct CountingFinder<F> {
    inner: F,
    calls: Cell<usize>,
}

impl<F: Finder> Finder for CountingFinder<F> {
    fn find(&self, ty: &TypeRef) -> Result<Declaration, FindError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.find(ty)
    }
}

fn load(
    results: Vec<Dependency>,
    aliases: &Aliases,
    externals: &Externals,
) -> Result<Node, LoadError> {
    let finder = SourceFinder::new(resolver());
    Loader::new(&finder, aliases, externals).load(target(results))
}

fn context_external() -> Externals {
    let mut externals = Externals::new();
    externals.insert(&Dependency::Type(context()), false);
    externals
}

fn ids(node: &Node) -> Vec<String> {
    node.children.iter().map(Node::id).collect()
}

// ── Tree shape ──────────────────────────────────────────────────

#[test]
fn loads_linear_chain() {
    let root = load(
        vec![Dependency::Type(ptr(LOG, "Log")), Dependency::Error],
        &Aliases::new(),
        &Externals::new(),
    )
    .unwrap();

    assert!(matches!(root.declaration, Some(Declaration::Target(_))));
    assert_eq!(ids(&root), vec!["\"app.com/log\".Log", "error"]);

    let log = &root.children[0];
    assert!(matches!(log.declaration, Some(Declaration::Function(_))));
    assert_eq!(ids(log), vec!["\"app.com/env\".Env"]);
    assert!(log.children[0].children.is_empty());
    assert_eq!(root.children[1].declaration, Some(Declaration::Error));
}

#[test]
fn externals_terminate_recursion() {
    let root = load(
        vec![Dependency::Type(ptr(WEB, "Web"))],
        &Aliases::new(),
        &context_external(),
    )
    .unwrap();

    let router = &root.children[0].children[1];
    assert_eq!(router.id(), "\"app.com/router\".Router");
    let ctx = &router.children[1];
    assert!(ctx.external);
    assert!(!ctx.hoist);
    assert!(ctx.declaration.is_none());
    assert!(ctx.children.is_empty());
    assert_eq!(ctx.ty.kind, Kind::Interface);
}

#[test]
fn external_hoist_flag_is_carried() {
    let mut externals = context_external();
    externals.insert(&Dependency::Type(ptr(ENV, "Env")), true);
    let root = load(vec![Dependency::Type(ptr(LOG, "Log"))], &Aliases::new(), &externals).unwrap();
    let env = &root.children[0].children[0];
    assert!(env.external && env.hoist);
}

#[test]
fn node_kind_comes_from_declaration() {
    let root = load(
        vec![Dependency::ty(LOG, "*Log")],
        &Aliases::new(),
        &Externals::new(),
    )
    .unwrap();
    assert_eq!(root.children[0].ty.kind, Kind::Struct);
}

// ── Aliases ─────────────────────────────────────────────────────

#[test]
fn aliases_apply_to_every_occurrence() {
    // Both Web and Router need a Log; redirect Log everywhere.
    let mut aliases = Aliases::new();
    let console = Package::new("app.com/console", "console").function(
        FuncDecl::new("New").result(ptr("app.com/console", "Console")),
    );
    aliases.insert(
        &Dependency::Type(ptr(LOG, "Log")),
        Dependency::Type(ptr("app.com/console", "Console")),
    );
    let finder = SourceFinder::new(resolver().with(console));
    let externals = context_external();
    let root = Loader::new(&finder, &aliases, &externals)
        .load(target(vec![Dependency::Type(ptr(WEB, "Web"))]))
        .unwrap();

    let web = &root.children[0];
    assert_eq!(web.children[0].id(), "\"app.com/console\".Console");
    assert_eq!(web.children[1].children[0].id(), "\"app.com/console\".Console");
}

#[test]
fn alias_to_external() {
    let mut aliases = Aliases::new();
    aliases.insert(
        &Dependency::Type(ptr(ENV, "Env")),
        Dependency::ty("app.com/config", "*Config"),
    );
    let mut externals = Externals::new();
    externals.insert(&Dependency::ty("app.com/config", "*Config"), false);
    let root = load(vec![Dependency::Type(ptr(LOG, "Log"))], &aliases, &externals).unwrap();
    let config = &root.children[0].children[0];
    assert!(config.external);
    assert_eq!(config.type_name(), "*Config");
}

// ── Failures ────────────────────────────────────────────────────

#[test]
fn failure_names_the_dependency_chain() {
    let err = load(
        vec![Dependency::Type(ptr(WEB, "Web"))],
        &Aliases::new(),
        &Externals::new(),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "\"app.com/gen\".Load -> \"app.com/web\".Web -> \"app.com/router\".Router: \
         unclear how to provide \"context\".Context (interfaces need an alias to a concrete type)"
    );
    let LoadError::Unresolved { chain, .. } = err else {
        panic!("expected unresolved");
    };
    assert_eq!(chain.len(), 3);
}

#[test]
fn cycles_are_reported() {
    let a = Package::new("app.com/a", "a").function(
        FuncDecl::new("New")
            .param(ptr("app.com/b", "B"))
            .result(ptr("app.com/a", "A")),
    );
    let b = Package::new("app.com/b", "b").function(
        FuncDecl::new("New")
            .param(ptr("app.com/a", "A"))
            .result(ptr("app.com/b", "B")),
    );
    let finder = SourceFinder::new(MemoryResolver::new().with(a).with(b));
    let (aliases, externals) = (Aliases::new(), Externals::new());
    let err = Loader::new(&finder, &aliases, &externals)
        .load(target(vec![Dependency::Type(ptr("app.com/a", "A"))]))
        .unwrap_err();

    assert_eq!(
        err,
        LoadError::Cycle {
            path: vec![
                "\"app.com/gen\".Load".into(),
                "\"app.com/a\".A".into(),
                "\"app.com/b\".B".into(),
                "\"app.com/a\".A".into(),
            ]
        }
    );
}

#[test]
fn shared_dependencies_are_not_cycles() {
    // Log appears twice on different paths under Web.
    let root = load(
        vec![Dependency::Type(ptr(WEB, "Web"))],
        &Aliases::new(),
        &context_external(),
    );
    assert!(root.is_ok());
}

// ── Declaration cache ───────────────────────────────────────────

#[test]
fn each_identity_is_searched_once() {
    let finder = CountingFinder {
        inner: SourceFinder::new(resolver()),
        calls: Cell::new(0),
    };
    let (aliases, externals) = (Aliases::new(), context_external());
    let root = Loader::new(&finder, &aliases, &externals)
        .load(target(vec![Dependency::Type(ptr(WEB, "Web"))]))
        .unwrap();

    // Web, Log, Env, Router; the second Log and Env come from the cache.
    assert_eq!(finder.calls.get(), 4);
    assert_eq!(root.count(), 8);
}
