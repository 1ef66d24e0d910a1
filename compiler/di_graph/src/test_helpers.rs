//! Shared fixtures for finder, loader and hoisting tests.
//!
//! Packages model a small web application:
//!
//! ```text
//! app.com/web      Web    <- NewWeb(*log.Log, *router.Router) *Web
//! app.com/log      Log    <- New(*env.Env) (*Log, error)
//! app.com/env      Env    <- Load() (*Env, error)
//! app.com/router   Router <- New(*log.Log, context.Context) *Router
//! context          Context (interface, never constructed)
//! ```

use di_ir::{FuncDecl, Kind, Package, StructDecl, TypeRef};

use crate::declaration::TargetDecl;
use crate::finder::MemoryResolver;

pub(crate) const WEB: &str = "app.com/web";
pub(crate) const LOG: &str = "app.com/log";
pub(crate) const ENV: &str = "app.com/env";
pub(crate) const ROUTER: &str = "app.com/router";
pub(crate) const GEN: &str = "app.com/gen";

pub(crate) fn ptr(import: &str, name: &str) -> TypeRef {
    TypeRef::new(import, &format!("*{name}")).with_kind(Kind::Struct)
}

pub(crate) fn context() -> TypeRef {
    TypeRef::new("context", "Context").with_kind(Kind::Interface)
}

pub(crate) fn env_package() -> Package {
    Package::new(ENV, "env")
        .function(FuncDecl::new("Load").result(ptr(ENV, "Env")).returns_error())
        .record(StructDecl::new("Env").field("Port", TypeRef::builtin("int")))
}

pub(crate) fn log_package() -> Package {
    Package::new(LOG, "log")
        .function(
            FuncDecl::new("New")
                .param(ptr(ENV, "Env"))
                .result(ptr(LOG, "Log"))
                .returns_error(),
        )
        .record(StructDecl::new("Log"))
}

pub(crate) fn router_package() -> Package {
    Package::new(ROUTER, "router")
        .function(
            FuncDecl::new("New")
                .param(ptr(LOG, "Log"))
                .param(context())
                .result(ptr(ROUTER, "Router")),
        )
        .record(StructDecl::new("Router"))
}

pub(crate) fn web_package() -> Package {
    Package::new(WEB, "web")
        .function(
            FuncDecl::new("NewWeb")
                .param(ptr(LOG, "Log"))
                .param(ptr(ROUTER, "Router"))
                .result(ptr(WEB, "Web")),
        )
        .record(StructDecl::new("Web"))
}

pub(crate) fn resolver() -> MemoryResolver {
    MemoryResolver::new()
        .with(env_package())
        .with(log_package())
        .with(router_package())
        .with(web_package())
        .with(Package::new("context", "context").interface("Context"))
}

pub(crate) fn target(results: Vec<di_ir::Dependency>) -> TargetDecl {
    TargetDecl {
        import: GEN.into(),
        name: "Load".into(),
        package: "gen".into(),
        results,
    }
}
