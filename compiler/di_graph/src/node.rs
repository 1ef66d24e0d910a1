//! Resolved graph vertices.

use di_ir::TypeRef;

use crate::declaration::Declaration;

/// A resolved vertex of the dependency tree.
///
/// # Invariants
///
/// - `declaration.is_none()` iff `external`.
/// - `hoist` on a non-external node is only ever set by [`crate::hoist`],
///   and only when every child is hoistable or an external marked `hoist`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// The type this node supplies.
    pub ty: TypeRef,
    pub declaration: Option<Declaration>,
    /// One child per entry of `declaration.dependencies()`, in order.
    pub children: Vec<Node>,
    /// Supplied by the caller; never constructed.
    pub external: bool,
    /// Promotable to a once-computed external.
    pub hoist: bool,
}

impl Node {
    /// A caller-supplied value. `hoist` marks it as computed once upstream.
    pub fn external(ty: TypeRef, hoist: bool) -> Self {
        Node {
            ty,
            declaration: None,
            children: Vec::new(),
            external: true,
            hoist,
        }
    }

    pub fn declared(ty: TypeRef, declaration: Declaration, children: Vec<Node>) -> Self {
        Node {
            ty,
            declaration: Some(declaration),
            children,
            external: false,
            hoist: false,
        }
    }

    /// Identity of the supplied type.
    pub fn id(&self) -> String {
        self.ty.id()
    }

    pub fn import_path(&self) -> &str {
        &self.ty.import
    }

    pub fn type_name(&self) -> String {
        self.ty.type_name()
    }

    /// True if the generated function receives this value as a parameter.
    #[inline]
    pub fn is_supplied(&self) -> bool {
        self.external || self.hoist
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Visit every node of the subtree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
