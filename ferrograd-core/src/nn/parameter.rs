use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A wrapper around a leaf Tensor indicating it is a learnable parameter of a Module.
///
/// Parameters require gradients unless created with [`Parameter::frozen`].
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Creates a new trainable Parameter from a Tensor.
    ///
    /// A tensor produced by an operation is detached first, so the parameter is always a leaf.
    pub fn new(tensor: Tensor) -> Self {
        Self::with_flag(tensor, true, None)
    }

    pub fn new_with_name(tensor: Tensor, name: String) -> Self {
        Self::with_flag(tensor, true, Some(name))
    }

    /// Creates a Parameter that never receives gradients.
    pub fn frozen(tensor: Tensor) -> Self {
        Self::with_flag(tensor, false, None)
    }

    fn with_flag(tensor: Tensor, requires_grad: bool, name: Option<String>) -> Self {
        let tensor = if tensor.is_leaf() { tensor } else { tensor.detach() };
        let tensor = tensor.with_requires_grad(requires_grad);
        Parameter { tensor, name }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter({}: {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
