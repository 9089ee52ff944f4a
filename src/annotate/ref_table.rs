//! External reference table of authoritative event classifications.
//!
//! The table mirrors a provider's gene-tree node dump: one row per node,
//! with parent and root ids forming an ancestor chain that is independent
//! of the in-memory [GeneTree](crate::model::GeneTree)'s topology. The core
//! never reads the tabular file itself; the external loader inserts rows.

use crate::error::HomologyError;
use std::collections::HashMap;

// =#========================================================================#=
// REF NODE TYPE
// =#========================================================================#=
/// Node classification as recorded in the reference table.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum RefNodeType {
    /// The node is a speciation
    Speciation,
    /// The node is a gene duplication
    Duplication,
    /// The classification is flagged as dubious; treated as unusable
    Dubious,
    /// No classification available
    Unknown,
}


// =#========================================================================#=
// REF RECORD
// =#========================================================================#=
/// One row of the reference table.
#[derive(PartialEq, Debug, Clone)]
pub struct RefRecord {
    /// Id of this node in the reference tree
    pub node_id: u64,
    /// Id of the parent node; equal to `node_id` for the root
    pub parent_id: u64,
    /// Id of the root of the chain this node belongs to
    pub root_id: u64,
    /// Authoritative classification of this node
    pub node_type: RefNodeType,
    /// Duplication confidence score, if recorded
    pub duplication_confidence: Option<f64>,
}


// =#========================================================================#=
// REFERENCE TABLE
// =#========================================================================#=
/// Mapping from gene identifiers to reference-tree nodes, with the node
/// rows needed to walk each gene's chain up to the shared root.
///
/// # Invariants
/// - Every `node_id` has a unique `parent_id`, except the `root_id`,
///   which is its own terminus.
/// - Read-only for the core; built row by row by the external loader.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    /// Gene stable identifier to the id of the node representing it
    genes: HashMap<String, u64>,
    /// Node id to its row
    nodes: HashMap<u64, RefRecord>,
}

impl ReferenceTable {
    /// Creates an empty reference table.
    pub fn new() -> Self {
        ReferenceTable::default()
    }

    /// Inserts one row.
    ///
    /// # Arguments
    /// * `stable_id` - Gene identifier this row's node represents, if any;
    ///   internal reference nodes pass `None`
    /// * `record` - The node row
    pub fn insert(&mut self, stable_id: Option<&str>, record: RefRecord) {
        if let Some(stable_id) = stable_id {
            self.genes.insert(stable_id.to_string(), record.node_id);
        }
        self.nodes.insert(record.node_id, record);
    }

    /// Returns the number of node rows.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table has a node for the given gene.
    pub fn contains_gene(&self, stable_id: &str) -> bool {
        self.genes.contains_key(stable_id)
    }

    /// Walks the chain from the given node up to its root.
    ///
    /// # Returns
    /// Node ids from the starting node to the root, inclusive. The walk stops
    /// early if a parent row is missing (a malformed table).
    fn path_to_root(&self, node_id: u64) -> Vec<u64> {
        let mut path = vec![node_id];
        let mut current = node_id;
        while let Some(record) = self.nodes.get(&current) {
            if current == record.root_id || record.parent_id == current {
                break;
            }
            current = record.parent_id;
            path.push(current);
        }
        path
    }

    /// Determines the classification of the reference lowest common ancestor
    /// of two genes.
    ///
    /// Both genes' chains are walked to the root, reversed to root-first
    /// order, and scanned from the root end inward; the last position where
    /// the chains still agree is the deepest shared ancestor.
    ///
    /// # Returns
    /// The shared ancestor's type and duplication confidence, or `None` if
    /// the two chains never meet (e.g. different reference roots).
    ///
    /// # Errors
    /// [HomologyError::MissingReferenceEntry] if either gene has no row.
    pub fn lca_event(
        &self,
        gene_a: &str,
        gene_b: &str,
    ) -> Result<Option<(RefNodeType, Option<f64>)>, HomologyError> {
        let id_a = self
            .genes
            .get(gene_a)
            .ok_or_else(|| HomologyError::MissingReferenceEntry(gene_a.to_string()))?;
        let id_b = self
            .genes
            .get(gene_b)
            .ok_or_else(|| HomologyError::MissingReferenceEntry(gene_b.to_string()))?;

        let mut path_a = self.path_to_root(*id_a);
        let mut path_b = self.path_to_root(*id_b);
        path_a.reverse();
        path_b.reverse();

        let shared_len = path_a.len().min(path_b.len());
        for i in (0..shared_len).rev() {
            if path_a[i] == path_b[i] {
                let record = &self.nodes[&path_a[i]];
                return Ok(Some((record.node_type, record.duplication_confidence)));
            }
        }

        Ok(None)
    }
}
