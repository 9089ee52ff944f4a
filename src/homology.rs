//! Homology classification between gene pairs.
//!
//! The relationship between two genes is read off the event annotation of
//! their lowest common ancestor: a speciation makes them orthologs, a
//! duplication makes them paralogs. Classification is a pure read over an
//! annotated [GeneTree]; see [crate::annotate] for populating the events.

use crate::error::HomologyError;
use crate::model::tree::GeneTree;
use crate::model::vertex::Event;
use std::fmt;

// =#========================================================================#=
// HOMOLOGY TYPE
// =#========================================================================#=
/// The evolutionary relationship between two genes.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum HomologyType {
    /// Orthologs; the speciation ancestor has exactly two leaf children
    OrthologOne2One,
    /// Orthologs; the speciation ancestor has exactly one leaf child
    OrthologOne2Many,
    /// Orthologs; the speciation ancestor has no or more than two leaf children
    OrthologMany2Many,
    /// Paralogs of the same species
    WithinSpeciesParalog,
    /// Paralogs of different species
    BetweenSpeciesParalog,
    /// The common ancestor carries no event annotation
    Other,
    /// No common ancestor could be determined (e.g. empty tree)
    NotHomologous,
}

impl fmt::Display for HomologyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            HomologyType::OrthologOne2One => "ortholog_one2one",
            HomologyType::OrthologOne2Many => "ortholog_one2many",
            HomologyType::OrthologMany2Many => "ortholog_many2many",
            HomologyType::WithinSpeciesParalog => "within_species_paralog",
            HomologyType::BetweenSpeciesParalog => "between_species_paralog",
            HomologyType::Other => "other",
            HomologyType::NotHomologous => "not_homologous",
        };
        write!(f, "{name}")
    }
}


// =#========================================================================#=
// RELATION
// =#========================================================================#=
/// The two relationship kinds bulk queries can ask for.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Relation {
    /// Genes whose lowest common ancestor is a speciation
    Ortholog,
    /// Genes whose lowest common ancestor is a duplication
    Paralog,
}

impl Relation {
    /// Returns `true` if the given event establishes this relation.
    pub fn matches(&self, event: Event) -> bool {
        match self {
            Relation::Ortholog => event.is_speciation(),
            Relation::Paralog => event.is_duplication(),
        }
    }
}


// ============================================================================
// Classification (pub)
// ============================================================================
/// Classifies the relationship between two genes, reporting paralogs of
/// different species as [HomologyType::WithinSpeciesParalog].
///
/// See [classify_with] for the full contract; this convenience function
/// fixes `ignore_between_species_paralog = true`.
pub fn classify(
    tree: &GeneTree,
    gene_a: &str,
    gene_b: &str,
) -> Result<HomologyType, HomologyError> {
    classify_with(tree, gene_a, gene_b, true)
}

/// Classifies the relationship between two genes.
///
/// Resolves both gene names to leaves, locates their lowest common ancestor,
/// and reads its event:
/// - **Speciation**: counted by the ancestor's immediate leaf children —
///   one leaf child yields [HomologyType::OrthologOne2Many], exactly two
///   [HomologyType::OrthologOne2One], anything else
///   [HomologyType::OrthologMany2Many].
/// - **Duplication**: [HomologyType::WithinSpeciesParalog] if
///   `ignore_between_species_paralog` is set or both genes share a species,
///   [HomologyType::BetweenSpeciesParalog] otherwise.
/// - **No event**: [HomologyType::Other].
///
/// An empty tree yields [HomologyType::NotHomologous].
///
/// # Errors
/// [HomologyError::UnknownGene] if either name is not a leaf of the tree.
pub fn classify_with(
    tree: &GeneTree,
    gene_a: &str,
    gene_b: &str,
    ignore_between_species_paralog: bool,
) -> Result<HomologyType, HomologyError> {
    if !tree.is_root_set() {
        return Ok(HomologyType::NotHomologous);
    }

    let leaf_a = tree
        .find_leaf(gene_a)
        .ok_or_else(|| HomologyError::UnknownGene(gene_a.to_string()))?;
    let leaf_b = tree
        .find_leaf(gene_b)
        .ok_or_else(|| HomologyError::UnknownGene(gene_b.to_string()))?;

    let ancestor = tree.lowest_common_ancestor(leaf_a, leaf_b)?;
    match tree[ancestor].event() {
        Event::Speciation => {
            let leaf_children = tree[ancestor]
                .children()
                .iter()
                .filter(|&&child| tree[child].is_leaf())
                .count();
            Ok(match leaf_children {
                1 => HomologyType::OrthologOne2Many,
                2 => HomologyType::OrthologOne2One,
                _ => HomologyType::OrthologMany2Many,
            })
        }
        Event::Duplication { .. } => {
            if ignore_between_species_paralog {
                Ok(HomologyType::WithinSpeciesParalog)
            } else if tree[leaf_a].species() == tree[leaf_b].species() {
                Ok(HomologyType::WithinSpeciesParalog)
            } else {
                Ok(HomologyType::BetweenSpeciesParalog)
            }
        }
        Event::None => Ok(HomologyType::Other),
    }
}
