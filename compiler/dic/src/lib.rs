//! dic - the di graph compiler.
//!
//! Compiles a generation request into a Go function that constructs the
//! requested values from their discovered constructors.
//!
//! # Pipeline
//!
//! ```text
//! Function (request)
//!        ↓  validate
//!    TargetDecl
//!        ↓  di_graph::Loader    (Finder search, aliases, externals)
//!       Node
//!        ↓  di_graph::hoist     (optional)
//!       Node
//!        ↓  di_codegen::generate
//!     Provider  →  signature + body, or a complete file
//! ```
//!
//! Any failure aborts the whole request; no partial output is produced.
//!
//! # Example
//!
//! ```
//! use dic::{Function, MemoryResolver};
//! use dic::ir::{Dependency, FuncDecl, Package, TypeRef};
//!
//! let app = Package::new("app.com/app", "app")
//!     .function(FuncDecl::new("NewWeb").result(TypeRef::new("app.com/app", "*Web")));
//!
//! let request = Function::new("Load", "app.com/app")
//!     .result(Dependency::ty("app.com/app", "*Web"));
//! let finder = request.finder(MemoryResolver::new().with(app));
//! let provider = request.generate(&finder).unwrap();
//! assert_eq!(provider.signature(), "func Load() *Web");
//! ```

mod error;
mod request;

use std::sync::Once;

pub use di_codegen::{External, Import, Provider, Variable};
pub use di_graph::{Finder, MemoryResolver, PackageResolver, SourceFinder};
pub use error::{Error, InvalidRequest};
pub use request::{Alias, Function, Param};

/// Descriptor and source-view types, for building requests and packages.
pub mod ir {
    pub use di_ir::*;
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Reads `RUST_LOG`; does nothing if it is unset. Safe to call repeatedly.
///
/// Example: `RUST_LOG=di_graph=trace,di_codegen=debug`
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
