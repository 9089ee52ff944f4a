//! Vertex module for gene tree representation.

use crate::model::tree::VertexIndex;

/// During construction, vertices might not have their parent set yet;
/// the root keeps this sentinel permanently.
pub(crate) const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a gene tree.
///
/// A single struct covers all vertex kinds; the distinction is derived:
/// - **Leaf**: has no children and carries a [GeneLabel]
/// - **Internal**: has children (any arity, including unary chains) and
///   may carry an [Event]
/// - **Root**: an internal vertex without a parent
///
/// # Invariants
/// - `index` is index in arena; non-negative (guaranteed by `VertexIndex = usize` type)
/// - `children` is empty if and only if `gene` is present
/// - Non-root vertices have `parent` set to the `VertexIndex` of their parent
///   in the arena; `NO_PARENT_SET = usize::MAX` otherwise
/// - Leaves always carry [Event::None]; only internal vertices get annotated
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex; `NO_PARENT_SET` for root and during construction
    parent: VertexIndex,
    /// Indices of the child vertices, in left-to-right order; empty for leaves
    children: Vec<VertexIndex>,
    /// Evolutionary event at this vertex; always `None` for leaves
    event: Event,
    /// Gene identity; present if and only if this vertex is a leaf
    gene: Option<GeneLabel>,
}

impl Vertex {
    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `gene` - Gene identity (stable identifier and species tag)
    pub fn new_leaf(index: VertexIndex, gene: GeneLabel) -> Self {
        Vertex {
            index,
            parent: NO_PARENT_SET,
            children: Vec::new(),
            event: Event::None,
            gene: Some(gene),
        }
    }

    /// Creates a new internal (non-leaf) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in left-to-right order; must not be empty
    ///
    /// # Panics
    /// Panics if `children` is empty (a vertex without children is a leaf).
    pub fn new_internal(index: VertexIndex, children: Vec<VertexIndex>) -> Self {
        assert!(!children.is_empty(), "Internal vertex must have children");
        Vertex {
            index,
            parent: NO_PARENT_SET,
            children,
            event: Event::None,
            gene: None,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the children of this vertex in left-to-right order;
    /// empty slice for leaves.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns `true` if this vertex is a leaf (has no children).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the gene name if this is a leaf, else `None`.
    pub fn gene_name(&self) -> Option<&str> {
        self.gene.as_ref().map(|g| g.name.as_str())
    }

    /// Returns the species tag if this is a leaf, else `None`.
    pub fn species(&self) -> Option<&str> {
        self.gene.as_ref().map(|g| g.species.as_str())
    }

    /// Returns the event annotation of this vertex.
    pub fn event(&self) -> Event {
        self.event
    }

    /// Sets the event annotation.
    ///
    /// # Panics
    /// Panics if called on a leaf; leaves are terminal and never carry
    /// a meaningful event.
    pub fn set_event(&mut self, event: Event) {
        assert!(!self.is_leaf(), "Cannot set event on leaf vertex");
        self.event = event;
    }

    /// Sets new parent for this vertex.
    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = parent;
    }

    /// Returns the index of the parent, or `None` for the root.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent_index(&self) -> Option<VertexIndex> {
        if self.parent == NO_PARENT_SET {
            None
        } else {
            Some(self.parent)
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent != NO_PARENT_SET
    }
}


// =#========================================================================#=
// GENE LABEL
// =#========================================================================#=
/// Gene identity carried by a leaf: a stable identifier
/// (unique among the leaves of one tree) and a species tag.
#[derive(PartialEq, Debug, Clone)]
pub struct GeneLabel {
    /// Stable gene identifier, e.g. `ENSG00000139618`
    pub name: String,
    /// Species this gene belongs to
    pub species: String,
}

impl GeneLabel {
    /// Creates a new gene label.
    pub fn new<S: Into<String>, T: Into<String>>(name: S, species: T) -> Self {
        GeneLabel {
            name: name.into(),
            species: species.into(),
        }
    }
}


// =#========================================================================#=
// EVENT
// =#========================================================================#=
/// Evolutionary event at an internal vertex of a gene tree.
///
/// Tagged union replacing independently-nullable speciation/duplication
/// counters: a vertex has at most one event kind.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub enum Event {
    /// No event annotated (yet)
    #[default]
    None,
    /// The vertex represents a speciation; descendant genes in different
    /// species diverged here
    Speciation,
    /// The vertex represents a gene duplication, with an optional
    /// confidence score in `[0, 1]`
    Duplication {
        /// Duplication confidence score, if known
        confidence: Option<f64>,
    },
}

impl Event {
    /// Returns `true` if no event is annotated.
    pub fn is_none(&self) -> bool {
        matches!(self, Event::None)
    }

    /// Returns `true` if this is a speciation event.
    pub fn is_speciation(&self) -> bool {
        matches!(self, Event::Speciation)
    }

    /// Returns `true` if this is a duplication event.
    pub fn is_duplication(&self) -> bool {
        matches!(self, Event::Duplication { .. })
    }
}
