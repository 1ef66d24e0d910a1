use pretty_assertions::assert_eq;

use di_ir::{Dependency, Field, Kind, TypeRef};

use super::*;

fn new_log() -> FunctionDecl {
    FunctionDecl {
        import: "app.com/log".into(),
        name: "New".into(),
        params: vec![TypeRef::new("app.com/env", "*Env")],
        results: vec![
            TypeRef::new("app.com/log", "*Log").with_kind(Kind::Struct),
            TypeRef::error(),
        ],
        output: 0,
    }
}

#[test]
fn function_identity_and_dependencies() {
    let decl = Declaration::Function(new_log());
    assert_eq!(decl.id(), "\"app.com/log\".New");
    assert_eq!(decl.import_path(), "app.com/log");
    assert_eq!(
        decl.dependencies().to_vec(),
        vec![Dependency::ty("app.com/env", "*Env")]
    );
    assert_eq!(decl.output_kind(), Kind::Struct);
}

#[test]
fn function_error_detection() {
    assert!(new_log().returns_error());
    let mut plain = new_log();
    plain.results.pop();
    assert!(!plain.returns_error());
}

#[test]
fn record_dependencies_follow_field_order() {
    let decl = Declaration::Record(RecordDecl {
        ty: TypeRef::new("app.com/web", "*Web"),
        fields: vec![
            Field::new("Log", TypeRef::new("app.com/log", "*Log")),
            Field::new("Env", TypeRef::new("app.com/env", "Env")),
        ],
    });
    let ids: Vec<String> = decl.dependencies().iter().map(Dependency::id).collect();
    assert_eq!(ids, vec!["\"app.com/log\".Log", "\"app.com/env\".Env"]);
    assert_eq!(decl.output_kind(), Kind::Struct);
}

#[test]
fn alias_forwards_to_target() {
    let decl = Declaration::Alias(TypeAliasDecl {
        import: "app.com/web".into(),
        name: "Handler".into(),
        target: TypeRef::new("app.com/mux", "*Router").with_kind(Kind::Struct),
    });
    assert_eq!(decl.id(), "\"app.com/web\".Handler");
    assert_eq!(decl.dependencies().len(), 1);
    assert_eq!(decl.output_kind(), Kind::Struct);
}

#[test]
fn error_sentinel_needs_nothing() {
    assert!(Declaration::Error.dependencies().is_empty());
    assert_eq!(Declaration::Error.id(), "error");
}

#[test]
fn target_results_are_dependencies() {
    let target = TargetDecl {
        import: "app.com/gen".into(),
        name: "Load".into(),
        package: "gen".into(),
        results: vec![Dependency::ty("app.com/web", "*Web"), Dependency::Error],
    };
    assert!(target.wants_error());
    assert_eq!(target.id(), "\"app.com/gen\".Load");
    let decl = Declaration::Target(target);
    assert_eq!(decl.dependencies().len(), 2);
}
