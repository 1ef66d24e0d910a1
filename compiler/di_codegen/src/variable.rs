//! Values flowing between emitted statements.

use di_ir::TypeRef;

/// A named Go value: a local binding, a parameter, or the literal `nil`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    pub name: String,
    /// Static type, including pointer-ness and kind.
    pub ty: TypeRef,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Variable {
            name: name.into(),
            ty,
        }
    }

    /// The `nil` error slot.
    pub fn nil_error() -> Self {
        Variable::new("nil", TypeRef::error())
    }

    /// Identity of the value's type.
    pub fn id(&self) -> String {
        self.ty.id()
    }

    /// Expression passing this value where `param` is expected.
    ///
    /// - exact match: the name as is
    /// - pointer wanted, value held: `&name`
    /// - value wanted, pointer held, not an interface: `*name`
    /// - interface wanted, plain value held: `&name`
    ///
    /// Interface parameters accept pointers unchanged.
    pub fn coerce(&self, param: &TypeRef) -> String {
        let held = &self.ty;
        if held.same_type(param) && held.pointer == param.pointer {
            return self.name.clone();
        }
        if param.pointer && !held.pointer {
            return format!("&{}", self.name);
        }
        if !param.pointer && held.pointer && !param.kind.is_interface() {
            return format!("*{}", self.name);
        }
        if param.kind.is_interface() && !held.kind.is_interface() && !held.pointer {
            return format!("&{}", self.name);
        }
        self.name.clone()
    }
}

/// A value the generated function receives as a parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct External {
    pub variable: Variable,
    /// Computed once by the caller rather than supplied per call.
    pub hoisted: bool,
    /// Rendered parameter type, qualified with its import alias.
    pub type_expr: String,
    key: String,
}

impl External {
    pub fn new(variable: Variable, hoisted: bool, type_expr: impl Into<String>) -> Self {
        let key = variable.id();
        External {
            variable,
            hoisted,
            type_expr: type_expr.into(),
            key,
        }
    }

    /// Identity of the parameter's type, stable across runs.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.variable.name
    }

    /// `name Type`, as written in a parameter list.
    pub fn param(&self) -> String {
        format!("{} {}", self.variable.name, self.type_expr)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use di_ir::Kind;

    use super::*;

    fn env(pointer: bool) -> TypeRef {
        let ty = TypeRef::new("app.com/env", "Env").with_kind(Kind::Struct);
        if pointer {
            ty.to_pointer()
        } else {
            ty
        }
    }

    #[test]
    fn exact_match_passes_through() {
        let v = Variable::new("env", env(true));
        assert_eq!(v.coerce(&env(true)), "env");
        assert_eq!(Variable::new("env", env(false)).coerce(&env(false)), "env");
    }

    #[test]
    fn value_to_pointer_takes_address() {
        assert_eq!(Variable::new("env", env(false)).coerce(&env(true)), "&env");
    }

    #[test]
    fn pointer_to_value_dereferences() {
        assert_eq!(Variable::new("env", env(true)).coerce(&env(false)), "*env");
    }

    #[test]
    fn interface_accepts_pointer_unchanged() {
        let reader = TypeRef::new("io", "Reader").with_kind(Kind::Interface);
        assert_eq!(Variable::new("env", env(true)).coerce(&reader), "env");
    }

    #[test]
    fn interface_from_value_takes_address() {
        let reader = TypeRef::new("io", "Reader").with_kind(Kind::Interface);
        assert_eq!(Variable::new("env", env(false)).coerce(&reader), "&env");
    }

    #[test]
    fn interface_to_interface_passes_through() {
        let ctx = TypeRef::new("context", "Context").with_kind(Kind::Interface);
        let any = TypeRef::new("app.com/ctx", "Any").with_kind(Kind::Interface);
        assert_eq!(Variable::new("ctx", ctx).coerce(&any), "ctx");
    }

    #[test]
    fn external_param() {
        let external = External::new(Variable::new("env", env(true)), false, "*env.Env");
        assert_eq!(external.param(), "env *env.Env");
        assert_eq!(external.name(), "env");
        assert_eq!(external.key(), "\"app.com/env\".Env");
    }
}
