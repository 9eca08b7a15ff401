use crate::autograd::graph::{topological_sort, NodeId};
use crate::autograd::{is_grad_enabled, BackwardOp};
use crate::error::FerrogradError;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use ndarray::{ArrayD, IxDyn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag of a leaf tensor in place.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` if the tensor was produced by an operation: its flag is
    /// derived from its inputs and cannot be overridden.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        if !guard.is_leaf() {
            return Err(FerrogradError::RequiresGradOnNonLeaf);
        }
        if requires_grad && !is_grad_enabled() {
            log::warn!(
                "requires_grad_(true) on a leaf while gradient mode is disabled; \
                 operations in this scope will not record a graph"
            );
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Builder form of [`Tensor::requires_grad_`] for freshly created leaves.
    ///
    /// On a non-leaf the flag is left untouched and a warning is logged.
    pub fn with_requires_grad(self, requires_grad: bool) -> Self {
        if let Err(e) = self.requires_grad_(requires_grad) {
            log::warn!("with_requires_grad ignored: {}", e);
        }
        self
    }

    /// Returns true if the tensor was not produced by a recorded operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Returns a copy of the accumulated gradient, if any has been accumulated.
    pub fn grad(&self) -> Option<ArrayD<f32>> {
        self.read_data().grad.clone()
    }

    /// Returns the accumulated gradient, or zeros of the value's shape when absent.
    pub fn grad_or_zeros(&self) -> ArrayD<f32> {
        let guard = self.read_data();
        match &guard.grad {
            Some(g) => g.clone(),
            None => ArrayD::zeros(IxDyn(guard.shape())),
        }
    }

    /// Returns a clone of the `Arc` pointing to the operation that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Returns a new leaf holding a copy of this tensor's value, cut off from the graph.
    pub fn detach(&self) -> Tensor {
        Tensor::from_array(self.value())
    }

    /// Resets the gradient slot to absent. The node itself is untouched.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Runs the backward pass from a scalar (single-element) tensor with seed `1.0`.
    pub fn backward(&self) -> Result<(), FerrogradError> {
        self.backward_with(None)
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Every node reachable from `self` through recorded operations and requiring grad
    /// receives `d(self)/d(node)` (weighted by `seed`) summed into its gradient slot. This
    /// includes `self`, which receives the seed, and interior nodes.
    ///
    /// The graph is left intact, so calling `backward_with` again accumulates a second
    /// contribution into the same slots. Use [`Tensor::clear_grad`] between passes to start
    /// over.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if `self` does not require grad (built from constants or under
    ///   `no_grad`).
    /// * `BackwardNonScalar` if `seed` is `None` and `self` holds more than one element.
    /// * `ShapeMismatch` if `seed` does not have exactly the shape of `self`.
    /// * `NonFiniteValue` if `seed` contains NaN or infinity.
    /// * Any error returned by an operation's backward rule.
    pub fn backward_with(&self, seed: Option<ArrayD<f32>>) -> Result<(), FerrogradError> {
        if !self.requires_grad() {
            return Err(FerrogradError::RequiresGradNotMet);
        }
        let root_shape = self.shape();
        let seed = match seed {
            Some(s) => {
                if s.shape() != root_shape.as_slice() {
                    return Err(FerrogradError::ShapeMismatch {
                        expected: root_shape,
                        actual: s.shape().to_vec(),
                        operation: "backward seed".to_string(),
                    });
                }
                if !s.iter().all(|x| x.is_finite()) {
                    return Err(FerrogradError::NonFiniteValue {
                        operation: "backward seed".to_string(),
                    });
                }
                s
            }
            None => {
                if self.numel() != 1 {
                    return Err(FerrogradError::BackwardNonScalar { shape: root_shape });
                }
                ArrayD::ones(IxDyn(&root_shape))
            }
        };

        let order = topological_sort(self);
        log::debug!("backward: {} node(s) reachable from root {:?}", order.len(), root_shape);

        // Gradients flowing during this call only; slots receive one sum per node.
        let mut pending: HashMap<NodeId, ArrayD<f32>> = HashMap::new();
        pending.insert(self.node_id(), seed);

        for node in &order {
            let grad = match pending.remove(&node.node_id()) {
                Some(g) => g,
                None => continue,
            };

            if let Some(op) = node.grad_fn() {
                log::trace!("backward through {} (output shape {:?})", op.name(), grad.shape());
                let input_grads = op.backward(&grad)?;
                let inputs = op.inputs();
                if input_grads.len() != inputs.len() {
                    return Err(FerrogradError::InternalError(format!(
                        "{} returned {} gradient(s) for {} input(s)",
                        op.name(),
                        input_grads.len(),
                        inputs.len()
                    )));
                }
                for (input, input_grad) in inputs.iter().zip(input_grads) {
                    if !input.requires_grad() {
                        continue;
                    }
                    let input_grad = reduce_to_shape(input_grad, &input.shape())?;
                    match pending.entry(input.node_id()) {
                        Entry::Occupied(mut e) => *e.get_mut() += &input_grad,
                        Entry::Vacant(e) => {
                            e.insert(input_grad);
                        }
                    }
                }
            }

            node.write_data().accumulate_grad(grad)?;
        }

        log::debug!("backward: done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
