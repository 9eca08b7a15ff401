use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// How the elementwise squared errors are combined into the loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

/// Computes the Mean Squared Error (MSE) loss between input and target tensors.
///
/// The loss is built from ordinary graph operations (`sub`, `mul`, `mean`/`sum`), so gradients
/// reach `input` and `target` through the engine like any other expression. With
/// `Reduction::Mean` the result is `mean((input - target)^2)` of shape `[]`.
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// # Errors
    /// `ShapeMismatch` if `input` and `target` differ in shape. No broadcasting is applied.
    pub fn forward(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, FerrogradError> {
        if input.shape() != target.shape() {
            return Err(FerrogradError::ShapeMismatch {
                expected: target.shape(),
                actual: input.shape(),
                operation: "MSELoss::forward".to_string(),
            });
        }

        let diff = input.sub(target)?;
        let squared = diff.mul(&diff)?;
        match self.reduction {
            Reduction::Mean => squared.mean(None, false),
            Reduction::Sum => squared.sum(None, false),
        }
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
