//! Hoisting pass.
//!
//! Marks every subtree that does not reach a genuine (non-hoisted) external
//! as hoistable. Code generation treats a hoisted node exactly like an
//! external: its value becomes a parameter, computed once by the caller
//! outside the hot path.
//!
//! # Rules
//!
//! - An external node is hoistable iff it was declared with `hoist`.
//! - Any other node is hoistable iff all of its children are.
//! - The root and the requested results are never hoisted; the pass starts
//!   at the results' children.
//!
//! Every child is visited even after one turns out not to be hoistable,
//! since visiting is what sets the child's own flag.

use crate::node::Node;
use crate::stack::ensure_sufficient_stack;

/// Run the hoisting pass over a loaded tree. Returns the number of
/// non-external nodes marked hoistable.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.id()))]
pub fn hoist(root: &mut Node) -> usize {
    for result in &mut root.children {
        for child in &mut result.children {
            hoist_node(child);
        }
    }

    let mut hoisted = 0;
    root.walk(&mut |node: &Node| {
        if node.hoist && !node.external {
            hoisted += 1;
        }
    });
    tracing::debug!(hoisted, "hoisting complete");
    hoisted
}

fn hoist_node(node: &mut Node) -> bool {
    ensure_sufficient_stack(|| {
        if node.external {
            return node.hoist;
        }
        let mut hoistable = true;
        for child in &mut node.children {
            // Not `&&`: every child must be visited.
            hoistable &= hoist_node(child);
        }
        node.hoist = hoistable;
        hoistable
    })
}
