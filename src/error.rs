//! Error types for homology queries and annotation.
//!
//! This module provides [HomologyError], the single error enum of the crate,
//! covering gene name resolution, reference table lookups, and vertex handles
//! used across trees.

use crate::model::VertexIndex;
use thiserror::Error;

// =#========================================================================#=
// HOMOLOGY ERROR
// =#========================================================================#=
/// Errors that can occur during homology classification, annotation,
/// and indexed relationship queries.
///
/// All failures are deterministic for a given input; nothing is retried
/// or swallowed internally.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum HomologyError {
    /// A gene name could not be resolved to a leaf of the queried tree.
    #[error("Unknown gene '{0}' - not a leaf of this tree")]
    UnknownGene(String),

    /// A gene has no entry in the reference table, so its root-ward
    /// chain cannot be walked.
    #[error("Gene '{0}' has no entry in the reference table")]
    MissingReferenceEntry(String),

    /// A vertex handle does not belong to the queried tree's arena.
    /// This is a programming error on the caller's side.
    #[error("Vertex {0} does not belong to the queried tree")]
    CrossTreeQuery(VertexIndex),
}
