//! Orthodex classifies evolutionary relationships between the genes of a
//! rooted gene tree and accelerates repeated relationship queries with a
//! precomputed interval index.
//!
//! Core functionality provided:
//! - Tree model: [GeneTree] stores a rooted, ordered, leaf-labeled tree in
//!   an arena; leaves carry a gene identifier and species tag, internal
//!   vertices an [Event] (speciation or duplication).
//!   No direct vertex references are stored, only vertex indices.
//! - Annotation: populate events from an external [ReferenceTable]
//!   ([annotate_from_table]) or with the fast all-speciations heuristic
//!   ([annotate_fast]). See [crate::annotate].
//! - Classification: [classify] reads the relationship of two genes off
//!   the event at their lowest common ancestor. See [crate::homology].
//! - Indexed bulk queries: [IntervalIndex] encodes the topology as leaf
//!   intervals and answers "all orthologs/paralogs of gene X" from the
//!   ancestor chain alone; [related_unindexed] is the index-free fallback
//!   and testing oracle. See [crate::index].
//! - Interval utilities: closed [Interval]s, gap computation, and a generic
//!   stabbing-query [IntervalTree]. See [crate::interval].
//!
//! Limitations:
//! - Trees are given, not inferred; parsing and serialization of exchange
//!   formats are external collaborators that produce/consume the in-memory
//!   tree.
//! - Forests are processed one tree at a time.
//!
//! # Example
//! ```
//! use orthodex::{GeneTree, IntervalIndex, annotate_fast, classify, HomologyType};
//!
//! // ((A,B),C), heuristically annotated as all speciations
//! let mut tree = GeneTree::new(3);
//! let a = tree.add_leaf("A", "human");
//! let b = tree.add_leaf("B", "mouse");
//! let c = tree.add_leaf("C", "human");
//! let inner = tree.add_internal_vertex(vec![a, b]);
//! tree.add_root(vec![inner, c]);
//! annotate_fast(&mut tree);
//!
//! assert_eq!(classify(&tree, "A", "B").unwrap(), HomologyType::OrthologOne2One);
//!
//! let index = IntervalIndex::build(&tree);
//! assert_eq!(index.orthologs("A").unwrap(), vec!["B", "C"]);
//! ```

pub mod annotate;
pub mod error;
pub mod homology;
pub mod index;
pub mod interval;
pub mod model;

// Tree model
pub use model::Event;
pub use model::GeneLabel;
pub use model::GeneTree;
pub use model::Vertex;
pub use model::VertexIndex;
// Annotation
pub use annotate::ReferenceTable;
pub use annotate::annotate_fast;
pub use annotate::annotate_from_table;
// Classification
pub use homology::HomologyType;
pub use homology::Relation;
pub use homology::classify;
pub use homology::classify_with;
// Indexed queries
pub use index::IntervalIndex;
pub use index::related_unindexed;
pub use interval::Interval;
pub use interval::IntervalTree;
// Errors
pub use error::HomologyError;
