// src/ops/indexing/mod.rs

pub mod embedding;

pub(crate) use embedding::embedding_op;
