use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(FerrogradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(FerrogradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(FerrogradError),
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly.")]
    RequiresGradPropagationError,
}

impl From<FerrogradError> for GradCheckError {
    fn from(err: FerrogradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against numerical gradients using central finite differences.
///
/// The scalar loss being differentiated is `sum(func(inputs) * output_grad)`, so the analytical
/// side is exactly `func(inputs).backward_with(Some(output_grad))`. Perturbations are applied
/// in `f32` (the engine's only dtype) while losses are accumulated in `f64`.
///
/// An element passes when either the absolute difference is within `abs_tolerance` or the
/// difference relative to the analytical gradient is within `rel_tolerance`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &ArrayD<f32>,
    epsilon: f32,
    abs_tolerance: f64,
    rel_tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, FerrogradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    // --- 1. Analytical gradients ---
    for input in inputs.iter().filter(|t| t.requires_grad()) {
        input.clear_grad();
    }
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    let any_input_requires_grad = inputs.iter().any(|t| t.requires_grad());
    if any_input_requires_grad && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if output.requires_grad() {
        output
            .backward_with(Some(output_grad.clone()))
            .map_err(GradCheckError::BackwardPassError)?;
    }
    let analytical_grads: Vec<Option<ArrayD<f32>>> = inputs.iter().map(|t| t.grad()).collect();

    // --- 2. Numerical gradients, one element at a time ---
    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }
        let analytical = analytical_grads[i]
            .as_ref()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?;
        let analytical_data: Vec<f64> = analytical.iter().map(|&x| x as f64).collect();
        let original_value = original_input.value();

        for (elem_idx, &analytical_grad) in analytical_data.iter().enumerate() {
            let loss_plus = perturbed_loss(&func, inputs, i, &original_value, elem_idx, epsilon, output_grad)?;
            let loss_minus = perturbed_loss(&func, inputs, i, &original_value, elem_idx, -epsilon, output_grad)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon as f64);

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            let relative = difference / analytical_grad.abs().max(f64::EPSILON);
            if difference > abs_tolerance && relative > rel_tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }

    Ok(())
}

/// Evaluates `sum(func(inputs') * output_grad)` where `inputs'` equals `inputs` except that
/// element `elem_idx` of input `input_index` is shifted by `delta`.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    original_value: &ArrayD<f32>,
    elem_idx: usize,
    delta: f32,
    output_grad: &ArrayD<f32>,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, FerrogradError>,
{
    let mut perturbed_value = original_value.clone();
    if let Some(elem) = perturbed_value.iter_mut().nth(elem_idx) {
        *elem += delta;
    }
    let mut perturbed_inputs: Vec<Tensor> = inputs.to_vec();
    // Detached leaf: the numerical side must not touch the real inputs' gradient slots.
    perturbed_inputs[input_index] = Tensor::from_array(perturbed_value);

    let output = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
    let output_value = output.value();
    if output_value.shape() != output_grad.shape() {
        return Err(GradCheckError::TensorError(FerrogradError::ShapeMismatch {
            expected: output_value.shape().to_vec(),
            actual: output_grad.shape().to_vec(),
            operation: "grad_check loss".to_string(),
        }));
    }
    Ok(output_value
        .iter()
        .zip(output_grad.iter())
        .map(|(&o, &g)| o as f64 * g as f64)
        .sum())
}
