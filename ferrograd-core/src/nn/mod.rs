// src/nn/mod.rs
//! The module boundary: learnable parameters, layers built on the engine's operations, and
//! loss criteria.

pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::Embedding;
pub use losses::{MSELoss, Reduction};
pub use module::Module;
pub use parameter::Parameter;
