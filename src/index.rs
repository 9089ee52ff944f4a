//! Interval index for bulk ortholog/paralog queries.
//!
//! The index encodes the tree's topology as integer intervals: leaves get
//! consecutive positions in left-to-right depth-first order, and every vertex
//! gets the closed interval spanning the positions of its descendant leaves.
//! Because subtrees occupy contiguous, non-interleaved position ranges, the
//! interval of an ancestor always nests the intervals of its descendants and
//! is disjoint from every unrelated vertex's interval.
//!
//! A relationship query then walks the query leaf's ancestor chain nearest
//! first: each ancestor carrying the matching event contributes exactly the
//! positions of its interval not yet covered by a nearer ancestor — those
//! are the leaves whose lowest common ancestor with the query leaf is
//! precisely that vertex. No per-query traversal of the whole tree is needed.
//!
//! [related_unindexed] computes the same result by brute force and serves
//! as the testing oracle for the indexed path.

use crate::error::HomologyError;
use crate::homology::Relation;
use crate::interval::{Interval, IntervalTree};
use crate::model::tree::{GeneTree, VertexIndex};
use std::collections::HashMap;
use tracing::debug;

// =#========================================================================#=
// INTERVAL INDEX
// =#========================================================================#=
/// Precomputed interval encoding of one [GeneTree] snapshot.
///
/// The index borrows the tree, so the borrow checker enforces the core's
/// concurrency contract: no annotation (which needs `&mut GeneTree`) can
/// happen while an index is alive, and queries from many readers are safe.
/// After further annotation, discard the index and build a new one.
#[derive(Debug, Clone)]
pub struct IntervalIndex<'t> {
    /// The indexed tree snapshot
    tree: &'t GeneTree,
    /// Closed leaf-position interval per vertex, parallel to the arena
    node_interval: Vec<Interval>,
    /// Leaf position to leaf vertex (the leaf-order bijection)
    order_to_leaf: Vec<VertexIndex>,
    /// Gene name to leaf vertex
    genes: HashMap<String, VertexIndex>,
    /// Intervals of internal vertices annotated as speciations
    speciation_intervals: Vec<Interval>,
    /// Intervals of internal vertices annotated as duplications
    duplication_intervals: Vec<Interval>,
    /// Stabbing structure over all internal-vertex intervals
    stab_tree: Option<IntervalTree>,
}

impl<'t> IntervalIndex<'t> {
    /// Builds the index for the given tree.
    ///
    /// One depth-first pass assigns leaf positions; one post-order pass
    /// computes every vertex's interval as the hull of its children's.
    /// A tree without a root (empty or mid-construction) yields an index
    /// whose queries return empty results.
    pub fn build(tree: &'t GeneTree) -> IntervalIndex<'t> {
        let num_vertices = tree.num_vertices();
        let mut node_interval = vec![Interval::point(0); num_vertices];
        let mut order_to_leaf = Vec::new();
        let mut genes = HashMap::new();

        // Leaf positions in left-to-right depth-first order
        for vertex in tree.pre_order_iter() {
            if vertex.is_leaf() {
                let position = order_to_leaf.len();
                node_interval[vertex.index()] = Interval::point(position);
                if let Some(name) = vertex.gene_name() {
                    genes.insert(name.to_string(), vertex.index());
                }
                order_to_leaf.push(vertex.index());
            }
        }

        // Internal intervals bottom-up; children are final when their
        // parent is visited
        for vertex in tree.post_order_iter() {
            let children = vertex.children();
            if let Some((&head, tail)) = children.split_first() {
                let mut hull = node_interval[head];
                for &child in tail {
                    hull = hull.hull(&node_interval[child]);
                }
                node_interval[vertex.index()] = hull;
            }
        }

        // Partition internal intervals by event
        let mut internal_intervals = Vec::new();
        let mut speciation_intervals = Vec::new();
        let mut duplication_intervals = Vec::new();
        for vertex in tree.pre_order_iter() {
            if vertex.is_leaf() {
                continue;
            }
            let interval = node_interval[vertex.index()];
            internal_intervals.push(interval);
            if vertex.event().is_speciation() {
                speciation_intervals.push(interval);
            } else if vertex.event().is_duplication() {
                duplication_intervals.push(interval);
            }
        }

        let stab_tree = IntervalTree::build(&internal_intervals);

        debug!(
            leaves = order_to_leaf.len(),
            internals = internal_intervals.len(),
            speciations = speciation_intervals.len(),
            duplications = duplication_intervals.len(),
            "built interval index"
        );

        IntervalIndex {
            tree,
            node_interval,
            order_to_leaf,
            genes,
            speciation_intervals,
            duplication_intervals,
            stab_tree,
        }
    }

    /// Returns the indexed tree.
    pub fn tree(&self) -> &'t GeneTree {
        self.tree
    }

    /// Returns the number of indexed leaves.
    pub fn num_leaves(&self) -> usize {
        self.order_to_leaf.len()
    }

    /// Returns the leaf position of the given gene, if it is indexed.
    pub fn leaf_position(&self, gene: &str) -> Option<usize> {
        self.genes
            .get(gene)
            .map(|&leaf| self.node_interval[leaf].first)
    }

    /// Returns the leaf-position interval of the given vertex.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn interval_of(&self, index: VertexIndex) -> Interval {
        self.node_interval[index]
    }

    /// Returns the intervals of all speciation vertices.
    pub fn speciation_intervals(&self) -> &[Interval] {
        &self.speciation_intervals
    }

    /// Returns the intervals of all duplication vertices.
    pub fn duplication_intervals(&self) -> &[Interval] {
        &self.duplication_intervals
    }

    /// Returns the intervals of all internal vertices containing the given
    /// leaf position, via the stabbing structure.
    ///
    /// For a valid tree these are exactly the intervals of the leaf's
    /// ancestors, though in no particular order.
    pub fn stab(&self, position: usize) -> Vec<Interval> {
        match &self.stab_tree {
            Some(tree) => tree.stab(position),
            None => Vec::new(),
        }
    }

    /// Returns all orthologs of the given gene.
    ///
    /// # Errors
    /// [HomologyError::UnknownGene] if the gene is not an indexed leaf.
    pub fn orthologs(&self, gene: &str) -> Result<Vec<String>, HomologyError> {
        self.related(gene, Relation::Ortholog)
    }

    /// Returns all paralogs of the given gene.
    ///
    /// # Errors
    /// [HomologyError::UnknownGene] if the gene is not an indexed leaf.
    pub fn paralogs(&self, gene: &str) -> Result<Vec<String>, HomologyError> {
        self.related(gene, Relation::Paralog)
    }

    /// Returns all genes related to the given gene by the given relation.
    ///
    /// Walks the leaf's ancestor chain nearest first. An ancestor whose event
    /// matches contributes the positions of its interval not covered by any
    /// nearer ancestor: exactly the leaves whose lowest common ancestor with
    /// the query leaf is that vertex. Every visited ancestor's interval joins
    /// the covered set, matching or not.
    ///
    /// The explicit ancestor chain is load-bearing: the nesting invariant
    /// holds in chain order even when a unary chain gives two ancestors
    /// intervals of equal width, where a width sort could reorder them.
    ///
    /// # Errors
    /// [HomologyError::UnknownGene] if the gene is not an indexed leaf.
    pub fn related(&self, gene: &str, relation: Relation) -> Result<Vec<String>, HomologyError> {
        if self.order_to_leaf.is_empty() {
            return Ok(Vec::new());
        }
        let leaf = *self
            .genes
            .get(gene)
            .ok_or_else(|| HomologyError::UnknownGene(gene.to_string()))?;
        let position = self.node_interval[leaf].first;

        // Seeding the covered set with the query position keeps the leaf
        // itself out of every gap.
        let mut covered = vec![Interval::point(position)];
        let mut related = Vec::new();

        for ancestor in self.tree.ancestors(leaf) {
            let interval = self.node_interval[ancestor];
            if relation.matches(self.tree[ancestor].event()) {
                for gap in interval.subtract_all(&covered) {
                    for hit in gap.first..=gap.last {
                        let name = self.tree[self.order_to_leaf[hit]]
                            .gene_name()
                            .expect("leaf vertex carries a gene label");
                        related.push(name.to_string());
                    }
                }
            }
            covered.push(interval);
        }

        Ok(related)
    }
}


// ============================================================================
// Unindexed fallback (pub)
// ============================================================================
/// Returns all genes related to the given gene by the given relation,
/// without any precomputed index.
///
/// Tests every other leaf's lowest common ancestor with the query leaf
/// for a matching event; O(leaves) per query. This is the reference
/// oracle for [IntervalIndex::related], and the fallback when no index
/// has been built. An empty tree yields an empty result.
///
/// # Errors
/// [HomologyError::UnknownGene] if the gene is not a leaf of the tree.
pub fn related_unindexed(
    tree: &GeneTree,
    gene: &str,
    relation: Relation,
) -> Result<Vec<String>, HomologyError> {
    if !tree.is_root_set() {
        return Ok(Vec::new());
    }
    let leaf = tree
        .find_leaf(gene)
        .ok_or_else(|| HomologyError::UnknownGene(gene.to_string()))?;

    let mut related = Vec::new();
    for other in tree.leaves() {
        if other == leaf {
            continue;
        }
        let ancestor = tree.lowest_common_ancestor(leaf, other)?;
        if relation.matches(tree[ancestor].event()) {
            let name = tree[other]
                .gene_name()
                .expect("leaf vertex carries a gene label");
            related.push(name.to_string());
        }
    }

    Ok(related)
}
