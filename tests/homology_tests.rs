use orthodex::error::HomologyError;
use orthodex::homology::{HomologyType, classify, classify_with};
use orthodex::model::tree::GeneTree;
use orthodex::model::vertex::Event;

/// ((A,B)Spec1,C)Dup1 with A, C human and B mouse.
fn annotated_three_leaf_tree() -> GeneTree {
    let mut tree = GeneTree::new(3);
    let a = tree.add_leaf("A", "human");
    let b = tree.add_leaf("B", "mouse");
    let c = tree.add_leaf("C", "human");
    let spec1 = tree.add_internal_vertex(vec![a, b]);
    let dup1 = tree.add_root(vec![spec1, c]);
    tree[spec1].set_event(Event::Speciation);
    tree[dup1].set_event(Event::Duplication { confidence: None });
    tree
}

#[test]
fn test_classify_one2one_ortholog() {
    let tree = annotated_three_leaf_tree();
    assert_eq!(classify(&tree, "A", "B").unwrap(), HomologyType::OrthologOne2One);
    // Symmetric
    assert_eq!(classify(&tree, "B", "A").unwrap(), HomologyType::OrthologOne2One);
}

#[test]
fn test_classify_paralogs_ignoring_species() {
    let tree = annotated_three_leaf_tree();
    // Default reports every paralog pair as within-species
    assert_eq!(
        classify(&tree, "A", "C").unwrap(),
        HomologyType::WithinSpeciesParalog
    );
    assert_eq!(
        classify(&tree, "B", "C").unwrap(),
        HomologyType::WithinSpeciesParalog
    );
}

#[test]
fn test_classify_paralogs_by_species() {
    let tree = annotated_three_leaf_tree();
    // A and C are both human
    assert_eq!(
        classify_with(&tree, "A", "C", false).unwrap(),
        HomologyType::WithinSpeciesParalog
    );
    // B is mouse, C is human
    assert_eq!(
        classify_with(&tree, "B", "C", false).unwrap(),
        HomologyType::BetweenSpeciesParalog
    );
}

#[test]
fn test_classify_one2many_ortholog() {
    // (A,(B,C)): speciation at the root with one leaf child
    let mut tree = GeneTree::new(3);
    let a = tree.add_leaf("A", "human");
    let b = tree.add_leaf("B", "mouse");
    let c = tree.add_leaf("C", "mouse");
    let bc = tree.add_internal_vertex(vec![b, c]);
    let root = tree.add_root(vec![a, bc]);
    tree[root].set_event(Event::Speciation);
    tree[bc].set_event(Event::Duplication { confidence: None });

    assert_eq!(classify(&tree, "A", "B").unwrap(), HomologyType::OrthologOne2Many);
}

#[test]
fn test_classify_many2many_ortholog() {
    // ((A,B),(C,D)): speciation at the root with no leaf children
    let mut tree = GeneTree::new(4);
    let a = tree.add_leaf("A", "human");
    let b = tree.add_leaf("B", "human");
    let c = tree.add_leaf("C", "mouse");
    let d = tree.add_leaf("D", "mouse");
    let ab = tree.add_internal_vertex(vec![a, b]);
    let cd = tree.add_internal_vertex(vec![c, d]);
    let root = tree.add_root(vec![ab, cd]);
    tree[root].set_event(Event::Speciation);

    assert_eq!(classify(&tree, "A", "C").unwrap(), HomologyType::OrthologMany2Many);

    // A trifurcation of leaves also counts as many2many
    let mut fan = GeneTree::new(3);
    let x = fan.add_leaf("X", "human");
    let y = fan.add_leaf("Y", "mouse");
    let z = fan.add_leaf("Z", "rat");
    let fan_root = fan.add_root(vec![x, y, z]);
    fan[fan_root].set_event(Event::Speciation);
    assert_eq!(classify(&fan, "X", "Y").unwrap(), HomologyType::OrthologMany2Many);
}

#[test]
fn test_classify_unannotated_ancestor_is_other() {
    let mut tree = GeneTree::new(2);
    let a = tree.add_leaf("A", "human");
    let b = tree.add_leaf("B", "mouse");
    tree.add_root(vec![a, b]);

    assert_eq!(classify(&tree, "A", "B").unwrap(), HomologyType::Other);
}

#[test]
fn test_classify_empty_tree_not_homologous() {
    let tree = GeneTree::new(0);
    assert_eq!(
        classify(&tree, "A", "B").unwrap(),
        HomologyType::NotHomologous
    );
}

#[test]
fn test_classify_unknown_gene() {
    let tree = annotated_three_leaf_tree();
    assert_eq!(
        classify(&tree, "A", "nope"),
        Err(HomologyError::UnknownGene("nope".to_string()))
    );
    assert_eq!(
        classify(&tree, "nope", "B"),
        Err(HomologyError::UnknownGene("nope".to_string()))
    );
}

#[test]
fn test_one2one_implies_two_leaf_children_under_speciation() {
    let tree = annotated_three_leaf_tree();
    if classify(&tree, "A", "B").unwrap() == HomologyType::OrthologOne2One {
        let a = tree.find_leaf("A").unwrap();
        let b = tree.find_leaf("B").unwrap();
        let lca = tree.lowest_common_ancestor(a, b).unwrap();
        assert!(tree[lca].event().is_speciation());
        let leaf_children = tree[lca]
            .children()
            .iter()
            .filter(|&&child| tree[child].is_leaf())
            .count();
        assert_eq!(leaf_children, 2);
    }
}

#[test]
fn test_homology_type_display() {
    assert_eq!(HomologyType::OrthologOne2One.to_string(), "ortholog_one2one");
    assert_eq!(
        HomologyType::BetweenSpeciesParalog.to_string(),
        "between_species_paralog"
    );
    assert_eq!(HomologyType::NotHomologous.to_string(), "not_homologous");
}
