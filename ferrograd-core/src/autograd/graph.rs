use crate::tensor::Tensor;
use std::collections::HashSet;

/// Identity of a graph node: the address of its shared `RwLock<TensorData>`.
///
/// Stable for as long as any `Tensor` handle (or operation input) keeps the node alive,
/// which the traversal guarantees by holding clones of every visited tensor.
pub type NodeId = usize;

/// Builds a topological ordering of every node reachable from `root` through
/// `grad_fn` edges, restricted to nodes that require gradients.
///
/// The returned list starts at `root` and ends with the leaves, i.e. it is already in the
/// reverse-topological order the backward pass needs: every node appears before all of
/// its inputs. Each node is visited once even when it is reachable through several paths.
///
/// Iterative DFS so that deep graphs (long training loops over the same tensor) cannot
/// overflow the stack.
pub(crate) fn topological_sort(root: &Tensor) -> Vec<Tensor> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut post_order: Vec<Tensor> = Vec::new();
    // (node, inputs already expanded)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            post_order.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        if !node.requires_grad() {
            // Pruned: nothing upstream of a non-differentiable node can receive a gradient
            // through it.
            continue;
        }
        let grad_fn = node.grad_fn();
        stack.push((node, true));
        if let Some(op) = grad_fn {
            for input in op.inputs() {
                if !visited.contains(&input.node_id()) {
                    stack.push((input, false));
                }
            }
        }
    }

    post_order.reverse();
    post_order
}
