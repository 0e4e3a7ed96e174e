//! # trajprep Core Library
//!
//! A library for preparing a molecular-dynamics run-input file from a
//! full-atom trajectory by sequencing four pre-existing external tools:
//! a trajectory converter, a visualization program (driven in text mode by an
//! operator-authored script), an interactive topology generator, and the MD
//! preprocessor that assembles the final run input.
//!
//! The library contains no numerical or chemical logic of its own. Its job is
//! to hold an immutable run configuration, substitute the configured paths
//! into each tool's argument list, execute the tools strictly in order, and
//! stop with a step-indexed error as soon as a tool fails or an expected
//! output file is missing.
//!
//! - **[`config`]** - The immutable [`config::PrepConfig`] and its builder.
//! - **[`index`]** - Generation of the atom index list consumed by the
//!   trajectory converter.
//! - **[`invocation`]** - Argument-vector construction for each external tool
//!   and the [`invocation::ToolRunner`] execution seam.
//! - **[`workflows`]** - The top-level preparation sequence.

pub mod config;
pub mod error;
pub mod index;
pub mod invocation;
pub mod progress;
pub mod workflows;
