use crate::error::FerrogradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules.
///
/// Exposes the forward computation and a stable-ordered view of the module's parameters,
/// which is what an optimizer consumes: it reads `grad()` off each trainable parameter after
/// `backward()` and calls [`Module::zero_grad`] between steps.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError>;

    /// Returns all parameters of the module, in a stable order.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Returns all parameters with their names, in the same order as [`Module::parameters`].
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Parameters that currently receive gradients.
    fn trainable_parameters(&self) -> Vec<&Parameter> {
        self.parameters()
            .into_iter()
            .filter(|p| p.requires_grad())
            .collect()
    }

    /// Clears the gradient slot of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{ones, zeros};

    #[derive(Debug)]
    struct MockModule {
        scale: Parameter,
        frozen: Parameter,
    }

    impl MockModule {
        fn new() -> Self {
            Self {
                scale: Parameter::new_with_name(ones(&[2]), "scale".to_string()),
                frozen: Parameter::frozen(zeros(&[2])),
            }
        }
    }

    impl Module for MockModule {
        fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
            input.mul(&self.scale)?.add(&self.frozen)
        }

        fn parameters(&self) -> Vec<&Parameter> {
            vec![&self.scale, &self.frozen]
        }

        fn named_parameters(&self) -> Vec<(String, &Parameter)> {
            vec![("scale".to_string(), &self.scale), ("frozen".to_string(), &self.frozen)]
        }
    }

    #[test]
    fn test_trainable_parameters_excludes_frozen() {
        let m = MockModule::new();
        assert_eq!(m.parameters().len(), 2);
        let trainable = m.trainable_parameters();
        assert_eq!(trainable.len(), 1);
        assert_eq!(trainable[0].name(), Some("scale"));
    }

    #[test]
    fn test_zero_grad_clears_all() {
        let m = MockModule::new();
        let x = Tensor::new(vec![3.0, 4.0], vec![2]).unwrap();
        m.forward(&x).unwrap().sum(None, false).unwrap().backward().unwrap();
        assert_eq!(m.scale.grad().unwrap().iter().copied().collect::<Vec<_>>(), vec![3.0, 4.0]);
        assert!(m.frozen.grad().is_none());

        m.zero_grad();
        assert!(m.parameters().iter().all(|p| p.grad().is_none()));
    }
}
