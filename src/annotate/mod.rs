//! Event annotation strategies for gene trees.
//!
//! Two interchangeable strategies populate [Event] annotations on internal
//! vertices (never on leaves):
//! - [annotate_from_table]: derives each event from an external
//!   [ReferenceTable] by intersecting the genes' reference ancestor chains.
//! - [annotate_fast]: assumes every unannotated internal vertex is a
//!   speciation. Only valid for trees from providers whose convention
//!   guarantees that all duplication nodes come pre-annotated.
//!
//! Annotation is the only mutating phase of the core; all later queries
//! take the tree by shared reference.

pub mod ref_table;

pub use ref_table::RefNodeType;
pub use ref_table::RefRecord;
pub use ref_table::ReferenceTable;

use crate::error::HomologyError;
use crate::model::tree::GeneTree;
use crate::model::vertex::Event;
use tracing::debug;

// ============================================================================
// Reference-table strategy
// ============================================================================
/// Annotates the tree's internal vertices from a reference table.
///
/// For every unordered pair of distinct leaves, the pair's lowest common
/// ancestor in the tree is located; if it is not yet annotated, the pair's
/// reference chains are intersected via [ReferenceTable::lca_event] and the
/// resulting classification is written to the tree vertex. `Unknown` and
/// `Dubious` reference types are skipped, as are vertices that already carry
/// a speciation or duplication event — annotation never downgrades and is
/// idempotent.
///
/// Quadratic in the number of leaves; runs once per tree, off the query path.
///
/// # Returns
/// The number of newly annotated vertices.
///
/// # Errors
/// [HomologyError::MissingReferenceEntry] if a leaf gene of the tree has no
/// row in the table.
pub fn annotate_from_table(
    tree: &mut GeneTree,
    table: &ReferenceTable,
) -> Result<usize, HomologyError> {
    if !tree.is_root_set() {
        return Ok(0);
    }

    let leaves = tree.leaves();
    let names: Vec<String> = leaves
        .iter()
        .map(|&leaf| {
            tree[leaf]
                .gene_name()
                .expect("leaf vertex carries a gene label")
                .to_string()
        })
        .collect();

    let mut annotated = 0;
    for i in 0..leaves.len() {
        for j in (i + 1)..leaves.len() {
            let lca = tree.lowest_common_ancestor(leaves[i], leaves[j])?;
            if !tree[lca].event().is_none() {
                continue;
            }

            match table.lca_event(&names[i], &names[j])? {
                Some((RefNodeType::Speciation, _)) => {
                    tree[lca].set_event(Event::Speciation);
                    annotated += 1;
                }
                Some((RefNodeType::Duplication, confidence)) => {
                    tree[lca].set_event(Event::Duplication { confidence });
                    annotated += 1;
                }
                // Unusable classification, or chains that never meet
                Some((RefNodeType::Unknown | RefNodeType::Dubious, _)) | None => {}
            }
        }
    }

    debug!(
        annotated,
        leaves = leaves.len(),
        "annotated events from reference table"
    );
    Ok(annotated)
}

// ============================================================================
// Fast heuristic strategy
// ============================================================================
/// Annotates every unannotated internal vertex as a speciation.
///
/// O(vertices). Valid only for trees whose source guarantees that all
/// duplication vertices are already annotated, so that anything left
/// unannotated must be a speciation.
///
/// # Returns
/// The number of newly annotated vertices.
pub fn annotate_fast(tree: &mut GeneTree) -> usize {
    let mut annotated = 0;
    for index in 0..tree.num_vertices() {
        let vertex = &tree[index];
        if !vertex.is_leaf() && vertex.event().is_none() {
            tree[index].set_event(Event::Speciation);
            annotated += 1;
        }
    }

    debug!(annotated, "annotated unannotated internals as speciations");
    annotated
}
