// src/nn/layers/mod.rs

pub mod embedding;

pub use embedding::Embedding;
