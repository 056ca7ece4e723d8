use crate::model::ResultNode;

/// Collect the pending leaf rules of a policy result tree
///
/// A leaf qualifies when it has no children, is pending, and carries no
/// evaluation error. Interior nodes contribute the leaves of their pending
/// children only; approved, disapproved and skipped children are not entered
/// at all, whatever their subtrees look like.
///
/// The walk uses an explicit stack, so tree depth is bounded only by memory.
///
/// # Returns
/// Leaves in left-to-right order as the children are presented
pub fn find_pending_leaves(root: &ResultNode) -> Vec<&ResultNode> {
    let mut leaves = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_leaf() {
            if node.is_pending() && node.error.is_none() {
                leaves.push(node);
            }
            continue;
        }

        // Reverse push keeps the leftmost child on top of the stack
        stack.extend(node.children.iter().rev().filter(|c| c.is_pending()));
    }

    leaves
}
