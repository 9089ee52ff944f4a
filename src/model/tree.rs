//! Tree module for gene tree representation.
//!
//! This module provides the core data structures for representing gene trees:
//! - `GeneTree`: The main tree structure using the arena pattern for efficient memory layout.
//! - `VertexIndex` is used to index vertices.

use crate::error::HomologyError;
use crate::model::vertex::{GeneLabel, Vertex};
use std::collections::HashSet;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;


// =#========================================================================#=
// GENE TREE
// =#========================================================================#=
/// A rooted, ordered, leaf-labeled gene tree represented using the arena
/// pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [VertexIndex].
/// Aim is to avoid referencing troubles as well as to provide efficient memory layout
/// and cache locality for traversal operations.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena
/// - Index of root is maintained
/// - No assumption on order of indices is maintained (e.g. leaves must not be first `n` indices)
/// - Leaves carry a [GeneLabel] with a gene identifier (unique per tree) and species tag
/// - Internal vertices have arbitrary arity, including unary chains;
///   multifurcations are common in gene trees
/// - Parent references are plain arena indices, so ancestor walks are O(depth)
///   without ownership cycles
///
/// # Construction
/// To construct a tree, specify its size based on the number of leaves, then add vertices
/// one by one. Bottom-up construction is likely easiest, but indices can also be managed
/// otherwise. Test validity with [GeneTree::is_valid].
///
/// # Example
/// ```
/// use orthodex::model::tree::GeneTree;
///
/// // Create a tree: ((A,B),C)
/// let mut tree = GeneTree::new(3);
///
/// // Add leaves (bottom-up construction)
/// let index_a = tree.add_leaf("A", "human");
/// let index_b = tree.add_leaf("B", "mouse");
/// let index_c = tree.add_leaf("C", "human");
///
/// // Add internal vertex with A and B as children
/// let index_internal = tree.add_internal_vertex(vec![index_a, index_b]);
///
/// // Add root with internal node and C as children
/// tree.add_root(vec![index_internal, index_c]);
///
/// assert!(tree.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct GeneTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>, // arena pattern

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional, e.g. the gene family identifier
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl GeneTree {
    /// Creates a new tree with capacity for a tree with `num_leaves` leaves.
    ///
    /// A tree with zero leaves is permitted; queries against it yield
    /// neutral results (see the classifier and index modules).
    ///
    /// # Arguments
    /// `num_leaves` - expected number of leaves, used as a capacity hint
    pub fn new(num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        GeneTree {
            name: None,
            root_index: NO_ROOT_SET_INDEX,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds a root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices in left-to-right order
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_internal(index, children));
        self.root_index = index;

        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices in left-to-right order; must not be empty
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    ///
    /// # Panics
    /// Panics if `children` is empty.
    pub fn add_internal_vertex(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_internal(index, children));

        index
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `gene_name` - Stable gene identifier; must be unique among the leaves of this tree
    /// * `species` - Species tag for this gene
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf<S: Into<String>, T: Into<String>>(
        &mut self,
        gene_name: S,
        species: T,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, GeneLabel::new(gene_name, species)));
        index
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and the root has no parent set
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All non-root vertices have a valid parent that lists them as a child
    /// - Leaves carry a gene label unique within this tree and no event
    /// - Every vertex is reachable from the root exactly once (single root,
    ///   acyclic, no sharing)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root index is set
        if self.root_index == NO_ROOT_SET_INDEX {
            return false;
        }

        // Check root index is within bounds and root has no parent
        if self.root_index >= self.vertices.len() {
            return false;
        }
        if self.vertices[self.root_index].has_parent() {
            return false;
        }

        let mut gene_names = HashSet::new();

        // Validate each vertex
        for (index, vertex) in self.vertices.iter().enumerate() {
            // Check vertex index matches its arena position
            if vertex.index() != index {
                return false;
            }

            // Check children references
            for &child in vertex.children() {
                // Check child index is in bounds
                if child >= self.vertices.len() {
                    return false;
                }

                // Check child points back to this vertex as parent
                if self.vertices[child].parent_index() != Some(index) {
                    return false;
                }
            }

            // Check parent references
            if index == self.root_index {
                // Root should not have a parent set
                if vertex.has_parent() {
                    return false;
                }
            } else {
                // Non-root must have valid parent listing this vertex as a child
                match vertex.parent_index() {
                    None => return false, // Non-root without parent
                    Some(parent_index) => {
                        if parent_index >= self.vertices.len() {
                            return false;
                        }
                        if !self.vertices[parent_index].children().contains(&index) {
                            return false;
                        }
                    }
                }
            }

            // Check leaf labeling: leaves have unique gene names and no event,
            // internal vertices have no gene label
            if vertex.is_leaf() {
                match vertex.gene_name() {
                    None => return false,
                    Some(name) => {
                        if !gene_names.insert(name) {
                            return false; // duplicate gene name
                        }
                    }
                }
                if !vertex.event().is_none() {
                    return false;
                }
            } else if vertex.gene_name().is_some() {
                return false;
            }
        }

        // Check that every vertex is reachable from the root exactly once
        let mut reached = 0;
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            reached += 1;
            if reached > self.vertices.len() {
                return false; // cycle
            }
            stack.extend_from_slice(self.vertices[index].children());
        }

        reached == self.vertices.len()
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Returns whether root of tree has been set.
    ///
    /// A tree without a root counts as empty for all queries.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root vertex, or `None` if not set.
    pub fn root_index(&self) -> Option<VertexIndex> {
        if self.root_index == NO_ROOT_SET_INDEX {
            None
        } else {
            Some(self.root_index)
        }
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices (including the root) in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| !v.is_leaf()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for GeneTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for GeneTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Ancestry and topology queries (pub)
// ============================================================================
impl GeneTree {
    /// Returns the ancestors of a vertex, from its parent up to and
    /// including the root, in that order (nearest first).
    ///
    /// The result is empty for the root. The nearest-first order is load-bearing
    /// for the interval index: each successive ancestor's leaf interval contains
    /// the previous one.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn ancestors(&self, index: VertexIndex) -> Vec<VertexIndex> {
        let mut ancestors = Vec::new();
        let mut current = &self[index];
        while let Some(parent) = current.parent_index() {
            ancestors.push(parent);
            current = &self[parent];
        }
        ancestors
    }

    /// Returns all vertices strictly below the given vertex, each exactly once,
    /// in pre-order.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn descendants(&self, index: VertexIndex) -> Vec<VertexIndex> {
        let mut descendants = Vec::new();
        let mut stack: Vec<VertexIndex> = self[index].children().iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            descendants.push(current);
            stack.extend(self[current].children().iter().rev());
        }
        descendants
    }

    /// Returns the leaves in the subtree below the given vertex, in
    /// left-to-right order; `{index}` if the vertex is itself a leaf.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn leaves_of(&self, index: VertexIndex) -> Vec<VertexIndex> {
        if self[index].is_leaf() {
            return vec![index];
        }
        self.descendants(index)
            .into_iter()
            .filter(|&d| self[d].is_leaf())
            .collect()
    }

    /// Returns all leaves of this tree in left-to-right depth-first order.
    ///
    /// This is the leaf order underlying the interval index; it is
    /// deterministic for a fixed tree. Empty if the root is not set.
    pub fn leaves(&self) -> Vec<VertexIndex> {
        if !self.is_root_set() {
            return Vec::new();
        }
        self.leaves_of(self.root_index)
    }

    /// Returns the gene names of all leaves, in left-to-right order.
    pub fn genes(&self) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .filter_map(|l| self[l].gene_name())
            .collect()
    }

    /// Finds the leaf carrying the given gene name.
    pub fn find_leaf(&self, gene_name: &str) -> Option<VertexIndex> {
        self.vertices
            .iter()
            .find(|v| v.gene_name() == Some(gene_name))
            .map(|v| v.index())
    }

    /// Returns the height of the subtree rooted at the given vertex,
    /// counted in vertices: a leaf has height 1.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn height_of(&self, index: VertexIndex) -> usize {
        let vertex = &self[index];
        1 + vertex
            .children()
            .iter()
            .map(|&c| self.height_of(c))
            .max()
            .unwrap_or(0)
    }

    /// Returns the height of this tree, or 0 if the root is not set.
    pub fn height(&self) -> usize {
        if !self.is_root_set() {
            return 0;
        }
        self.height_of(self.root_index)
    }

    /// Returns the lowest common ancestor of two vertices: the unique deepest
    /// vertex that is an ancestor of (or equal to) both.
    ///
    /// # Errors
    /// [HomologyError::CrossTreeQuery] if either handle does not belong to
    /// this tree's arena.
    pub fn lowest_common_ancestor(
        &self,
        a: VertexIndex,
        b: VertexIndex,
    ) -> Result<VertexIndex, HomologyError> {
        if a >= self.vertices.len() {
            return Err(HomologyError::CrossTreeQuery(a));
        }
        if b >= self.vertices.len() {
            return Err(HomologyError::CrossTreeQuery(b));
        }

        // Collect a's ancestor-or-self chain, then walk up from b;
        // the first hit is the deepest shared vertex.
        let mut chain = HashSet::new();
        chain.insert(a);
        for ancestor in self.ancestors(a) {
            chain.insert(ancestor);
        }

        let mut current = b;
        loop {
            if chain.contains(&current) {
                return Ok(current);
            }
            match self[current].parent_index() {
                Some(parent) => current = parent,
                // Both handles are in bounds but the walks never met,
                // so the arena holds disconnected parts.
                None => return Err(HomologyError::CrossTreeQuery(b)),
            }
        }
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the vertex itself.
    /// This is useful for computing heights, aggregating data from leaves upward, etc.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each vertex before visiting its children,
    /// children in left-to-right order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl GeneTree {
    /// Prints a visual representation of the tree to the console.
    ///
    /// # Example Output
    /// ```text
    /// Tree with 3 leaves (5 vertices total):
    /// Root: vertex 4
    ///   [4] Internal <duplication>
    ///     ├─ [3] Internal <speciation>
    ///     │   ├─ [0] Leaf "A" (human)
    ///     │   └─ [1] Leaf "B" (mouse)
    ///     └─ [2] Leaf "C" (human)
    /// ```
    pub fn print_tree(&self) {
        println!(
            "Tree with {} leaves ({} vertices total):",
            self.num_leaves(),
            self.vertices.len()
        );

        if self.root_index != NO_ROOT_SET_INDEX {
            println!("Root: vertex {}", self.root_index);
            self.print_vertex(self.root_index, "", true);
        } else {
            println!("(No root set)");
        }
    }

    /// Helper function to recursively print a vertex and its children.
    fn print_vertex(&self, idx: VertexIndex, prefix: &str, is_last: bool) {
        let vertex = &self.vertices[idx];

        let connector = if prefix.is_empty() {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };

        if vertex.is_leaf() {
            println!(
                "{}{}[{}] Leaf \"{}\" ({})",
                prefix,
                connector,
                idx,
                vertex.gene_name().unwrap_or("?"),
                vertex.species().unwrap_or("?")
            );
        } else {
            let event_str = match vertex.event() {
                crate::model::vertex::Event::None => String::new(),
                crate::model::vertex::Event::Speciation => " <speciation>".to_string(),
                crate::model::vertex::Event::Duplication { confidence } => match confidence {
                    Some(c) => format!(" <duplication {:.2}>", c),
                    None => " <duplication>".to_string(),
                },
            };

            println!("{}{}[{}] Internal{}", prefix, connector, idx, event_str);

            let children = vertex.children();
            for (i, &child) in children.iter().enumerate() {
                let last = i == children.len() - 1;
                let new_prefix = if prefix.is_empty() {
                    "  ".to_string()
                } else {
                    format!("{}{}  ", prefix, if is_last { " " } else { "│" })
                };
                self.print_vertex(child, &new_prefix, last);
            }
        }
    }
}


// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a GeneTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a GeneTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                // Either we've already processed children, or this is a leaf
                return Some(vertex);
            } else {
                // Mark this vertex as "children will be visited"
                self.stack.push((index, true));

                // Push children in reverse, so the leftmost is processed first
                for &child in vertex.children().iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a GeneTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a GeneTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the leftmost is processed first
        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
