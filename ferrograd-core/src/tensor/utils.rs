use crate::error::FerrogradError;
use ndarray::ArrayD;

/// Resolves a possibly negative axis against `rank`.
///
/// `-1` addresses the last dimension, `-rank` the first.
///
/// # Errors
/// `InvalidAxis` if `axis` is outside `[-rank, rank)`.
pub fn normalize_axis(axis: isize, rank: usize, operation: &str) -> Result<usize, FerrogradError> {
    let rank_i = rank as isize;
    let resolved = if axis < 0 { axis + rank_i } else { axis };
    if resolved < 0 || resolved >= rank_i {
        return Err(FerrogradError::InvalidAxis {
            axis,
            rank,
            operation: operation.to_string(),
        });
    }
    Ok(resolved as usize)
}

/// Reports `NonFiniteValue` when `output` contains NaN or infinity although every element of
/// `input` is finite. Non-finite inputs propagate silently.
pub fn check_finite_output(
    input: &ArrayD<f32>,
    output: &ArrayD<f32>,
    operation: &str,
) -> Result<(), FerrogradError> {
    if output.iter().all(|x| x.is_finite()) || !input.iter().all(|x| x.is_finite()) {
        return Ok(());
    }
    Err(FerrogradError::NonFiniteValue {
        operation: operation.to_string(),
    })
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
