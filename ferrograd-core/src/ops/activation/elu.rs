use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::utils::check_finite_output;
use crate::tensor::Tensor;
use ndarray::{ArrayD, Zip};
use std::sync::Arc;

/// Default `alpha` of [`Tensor::elu_default`].
pub const DEFAULT_ALPHA: f32 = 1.0;

/// Backward context for ELU.
///
/// Multiplier is `1` where `x > 0` and `alpha * exp(x)` elsewhere. At `x = 0` this gives
/// `alpha`, which is `1` (continuous) for the default alpha. `exp` is only evaluated on the
/// non-positive branch, where it is bounded by 1.
#[derive(Debug)]
struct EluBackward {
    input: Tensor,
    alpha: f32,
}

impl BackwardOp for EluBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let input = self.input.value();
        let alpha = self.alpha;
        let grad_input = Zip::from(&input)
            .and(grad_output)
            .map_collect(|&x, &g| if x > 0.0 { g } else { g * alpha * x.exp() });
        if input.iter().all(|x| x.is_finite()) {
            check_finite_output(grad_output, &grad_input, "elu backward")?;
        }
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "EluBackward"
    }
}

/// ELU(x) = x for x > 0, alpha * (exp(x) - 1) otherwise.
///
/// The exponential branch uses `exp_m1` and only runs where `x <= 0`, so large positive
/// inputs never overflow and large negative ones saturate at `-alpha`.
///
/// # Errors
/// `NonFiniteValue` if a finite input yields a non-finite output (only possible with a
/// non-finite or extreme `alpha`).
pub(crate) fn elu_op(input: &Tensor, alpha: f32) -> Result<Tensor, FerrogradError> {
    let value = input.value();
    let output = value.mapv(|x| if x > 0.0 { x } else { alpha * x.exp_m1() });
    check_finite_output(&value, &output, "elu")?;
    Ok(Tensor::from_op(output, &[input], || {
        Arc::new(EluBackward {
            input: input.clone(),
            alpha,
        })
    }))
}

#[cfg(test)]
#[path = "elu_test.rs"]
mod tests;
