use pretty_assertions::assert_eq;

use di_ir::Kind;

use super::*;

fn external(name: &str, import: &str, ty: &str, type_expr: &str, hoisted: bool) -> External {
    External::new(
        Variable::new(name, TypeRef::new(import, ty).with_kind(Kind::Struct)),
        hoisted,
        type_expr,
    )
}

fn provider() -> Provider {
    Provider {
        name: "Load".into(),
        package: "gen".into(),
        import: "app.com/gen".into(),
        imports: vec![
            Import::new("context", "context"),
            Import::new("app.com/env", "env"),
            Import::new("app.com/web", "web"),
        ],
        externals: vec![
            external("env", "app.com/env", "*Env", "*env.Env", true),
            external("ctx", "context", "Context", "context.Context", false),
        ],
        results: vec![Variable::new(
            "webWeb",
            TypeRef::new("app.com/web", "*Web"),
        )],
        result_types: vec!["*web.Web".into(), "error".into()],
        code: "\twebWeb, err := web.New(ctx, env)\n\tif err != nil {\n\t\treturn nil, err\n\t}\n\treturn webWeb, nil\n".into(),
    }
}

#[test]
fn params_and_results() {
    let p = provider();
    assert_eq!(p.params(), "env *env.Env, ctx context.Context");
    assert_eq!(p.results_signature(), "(*web.Web, error)");
    assert_eq!(
        p.signature(),
        "func Load(env *env.Env, ctx context.Context) (*web.Web, error)"
    );
}

#[test]
fn single_result_is_bare() {
    let mut p = provider();
    p.result_types.truncate(1);
    assert_eq!(p.results_signature(), "*web.Web");
    p.result_types.clear();
    p.externals.clear();
    assert_eq!(p.signature(), "func Load()");
}

#[test]
fn renders_file() {
    let expected = "\
// Code generated by di. DO NOT EDIT.

package gen

import (
\t\"context\"

\tenv \"app.com/env\"
\tweb \"app.com/web\"
)

func Load(env *env.Env, ctx context.Context) (*web.Web, error) {
\twebWeb, err := web.New(ctx, env)
\tif err != nil {
\t\treturn nil, err
\t}
\treturn webWeb, nil
}
";
    assert_eq!(provider().file(), expected);
}

#[test]
fn file_without_imports_has_no_block() {
    let mut p = provider();
    p.imports.clear();
    assert!(!p.file().contains("import"));
    assert!(p.file().starts_with("// Code generated by di. DO NOT EDIT.\n\npackage gen\n\nfunc Load("));
}

#[test]
fn looks_up_parameters_by_identity() {
    let p = provider();
    assert_eq!(p.variable("app.com/env", "*Env"), Some("env"));
    assert_eq!(p.variable("app.com/env", "Env"), Some("env"));
    assert_eq!(p.variable("context", "Context"), Some("ctx"));
    assert_eq!(p.variable("app.com/web", "Web"), None);
}

#[test]
fn hoisted_parameters() {
    let provider = provider();
    let names: Vec<&str> = provider.hoisted().map(External::name).collect();
    assert_eq!(names, vec!["env"]);
}
