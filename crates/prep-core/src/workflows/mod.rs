//! High-level workflow implementations.
//!
//! Currently a single workflow exists: [`prepare`], which turns a full-atom
//! trajectory into a preprocessed run-input file by sequencing the external
//! tools declared in the configuration.

pub mod prepare;
