use criterion::{Criterion, criterion_group, criterion_main};
use orthodex::homology::Relation;
use orthodex::index::{IntervalIndex, related_unindexed};
use orthodex::model::tree::{GeneTree, VertexIndex};
use orthodex::model::vertex::Event;

const INDEXED_TREE_DEPTHS: &[(&str, u32)] = &[("depth8", 8), ("depth10", 10), ("depth12", 12)];

// The unindexed sweep is quadratic in the number of leaves
const UNINDEXED_TREE_DEPTHS: &[(&str, u32)] = &[("depth6", 6), ("depth8", 8)];

/// Builds a complete binary tree of the given depth, with speciations and
/// duplications alternating per level.
fn balanced_tree(depth: u32) -> GeneTree {
    let num_leaves = 1usize << depth;
    let mut tree = GeneTree::new(num_leaves);
    let species = ["human", "mouse", "rat", "zebrafish"];

    let mut level: Vec<VertexIndex> = (0..num_leaves)
        .map(|i| tree.add_leaf(format!("G{i}"), species[i % species.len()]))
        .collect();
    let mut level_num = 0;
    while level.len() > 2 {
        let event = if level_num % 2 == 0 {
            Event::Speciation
        } else {
            Event::Duplication { confidence: None }
        };
        level = level
            .chunks(2)
            .map(|pair| {
                let v = tree.add_internal_vertex(pair.to_vec());
                tree[v].set_event(event);
                v
            })
            .collect();
        level_num += 1;
    }
    let root = tree.add_root(level);
    tree[root].set_event(Event::Speciation);
    tree
}

fn all_orthologs_indexed(tree: &GeneTree) {
    let index = IntervalIndex::build(tree);
    for gene in tree.genes() {
        let _ = index.related(gene, Relation::Ortholog).unwrap();
    }
}

fn all_orthologs_unindexed(tree: &GeneTree) {
    for gene in tree.genes() {
        let _ = related_unindexed(tree, gene, Relation::Ortholog).unwrap();
    }
}

fn ortholog_sweep_indexed(c: &mut Criterion) {
    for (name, depth) in INDEXED_TREE_DEPTHS {
        let tree = balanced_tree(*depth);
        c.bench_function(&format!("indexed_{name}"), |b| {
            b.iter(|| all_orthologs_indexed(&tree));
        });
    }
}

fn ortholog_sweep_unindexed(c: &mut Criterion) {
    for (name, depth) in UNINDEXED_TREE_DEPTHS {
        let tree = balanced_tree(*depth);
        c.bench_function(&format!("unindexed_{name}"), |b| {
            b.iter(|| all_orthologs_unindexed(&tree));
        });
    }
}

criterion_group!(indexed, ortholog_sweep_indexed);
criterion_group! {
    name = unindexed;
    config = Criterion::default().sample_size(10);
    targets = ortholog_sweep_unindexed
}
criterion_main!(indexed, unindexed);
