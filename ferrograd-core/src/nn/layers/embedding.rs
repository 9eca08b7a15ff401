use crate::error::FerrogradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::{randn, Tensor};
use ndarray::ArrayD;

/// A lookup table mapping integral indices to rows of a learnable weight matrix.
///
/// # Fields
/// * `weight`: shape `[num_embeddings, embedding_dim]`.
#[derive(Debug)]
pub struct Embedding {
    weight: Parameter,
    num_embeddings: usize,
    embedding_dim: usize,
}

impl Embedding {
    /// Creates a table with weights drawn from N(0, 1).
    pub fn new(num_embeddings: usize, embedding_dim: usize) -> Self {
        log::debug!("Embedding::new({}, {})", num_embeddings, embedding_dim);
        Embedding {
            weight: Parameter::new_with_name(randn(&[num_embeddings, embedding_dim]), "weight".to_string()),
            num_embeddings,
            embedding_dim,
        }
    }

    /// Creates a table from an existing weight matrix.
    ///
    /// The values are copied into a fresh leaf, so the caller's tensor is neither shared nor
    /// modified. With `freeze = true` the weight never requires grad, whatever the caller's
    /// tensor did, and [`Embedding::weight_grad`] stays all zeros.
    ///
    /// # Errors
    /// `ShapeMismatch` if `weight` is not 2-D.
    pub fn from_pretrained(weight: &Tensor, freeze: bool) -> Result<Self, FerrogradError> {
        let (num_embeddings, embedding_dim) = match weight.shape()[..] {
            [n, d] => (n, d),
            _ => {
                return Err(FerrogradError::ShapeMismatch {
                    expected: vec![0, 0],
                    actual: weight.shape(),
                    operation: "Embedding::from_pretrained (weight must be 2-D)".to_string(),
                })
            }
        };
        log::debug!(
            "Embedding::from_pretrained({}, {}, freeze={})",
            num_embeddings,
            embedding_dim,
            freeze
        );
        let copy = weight.detach();
        let weight = if freeze {
            Parameter::frozen(copy)
        } else {
            Parameter::new_with_name(copy, "weight".to_string())
        };
        Ok(Embedding {
            weight,
            num_embeddings,
            embedding_dim,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    /// Accumulated gradient of the weight, always of the full weight shape: zeros when the
    /// table is frozen or before any backward pass.
    pub fn weight_grad(&self) -> ArrayD<f32> {
        self.weight.grad_or_zeros()
    }

    pub fn num_embeddings(&self) -> usize {
        self.num_embeddings
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}

impl Module for Embedding {
    /// Gathers the rows at `indices`; output shape is `indices.shape() ++ [embedding_dim]`.
    fn forward(&self, indices: &Tensor) -> Result<Tensor, FerrogradError> {
        indices.embedding(&self.weight)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.weight]
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        vec![("weight".to_string(), &self.weight)]
    }
}

#[cfg(test)]
#[path = "embedding_test.rs"]
mod tests;
