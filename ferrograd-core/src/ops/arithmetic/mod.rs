pub mod add;
pub mod mul;
pub mod scalar;
pub mod sub;

pub(crate) use add::add_op;
pub(crate) use mul::mul_op;
pub(crate) use scalar::{add_scalar_op, mul_scalar_op};
pub(crate) use sub::sub_op;

use crate::error::FerrogradError;
use crate::tensor::broadcast_utils::broadcast_shapes;
use ndarray::{ArrayD, IxDyn, Zip};

/// Broadcasts `a` and `b` against each other and applies `f` elementwise.
pub(crate) fn broadcast_binary<F>(
    a: &ArrayD<f32>,
    b: &ArrayD<f32>,
    operation: &str,
    f: F,
) -> Result<ArrayD<f32>, FerrogradError>
where
    F: Fn(f32, f32) -> f32,
{
    let shape = broadcast_shapes(a.shape(), b.shape(), operation)?;
    let a_view = broadcast_view(a, &shape, operation)?;
    let b_view = broadcast_view(b, &shape, operation)?;
    Ok(Zip::from(&a_view).and(&b_view).map_collect(|&x, &y| f(x, y)))
}

fn broadcast_view<'a>(
    array: &'a ArrayD<f32>,
    shape: &[usize],
    operation: &str,
) -> Result<ndarray::ArrayViewD<'a, f32>, FerrogradError> {
    array
        .broadcast(IxDyn(shape))
        .ok_or_else(|| FerrogradError::BroadcastError {
            shape1: array.shape().to_vec(),
            shape2: shape.to_vec(),
            operation: operation.to_string(),
        })
}
