//! Shared helpers that do not belong to a single module.

pub mod testing;
