use orthodex::interval::{Interval, IntervalTree};

// ============= Interval Tests =============

#[test]
fn test_interval_basics() {
    let i = Interval::new(2, 6);
    assert_eq!(i.len(), 5);
    assert!(i.contains(2));
    assert!(i.contains(6));
    assert!(!i.contains(7));

    let p = Interval::point(4);
    assert_eq!(p.len(), 1);
    assert!(i.contains_interval(&p));
    assert!(!p.contains_interval(&i));
}

#[test]
fn test_interval_overlap_and_hull() {
    let a = Interval::new(1, 5);
    let b = Interval::new(5, 9);
    let c = Interval::new(7, 9);

    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
    assert!(!a.overlaps(&c));
    assert_eq!(a.hull(&c), Interval::new(1, 9));
}

#[test]
#[should_panic]
fn test_interval_rejects_reversed_endpoints() {
    Interval::new(5, 2);
}

#[test]
fn test_subtract_all_gap_scenario() {
    let gaps = Interval::new(0, 10).subtract_all(&[Interval::new(2, 4), Interval::point(6)]);
    assert_eq!(
        gaps,
        vec![Interval::new(0, 1), Interval::point(5), Interval::new(7, 10)]
    );
}

#[test]
fn test_subtract_all_nothing_excluded() {
    let i = Interval::new(3, 8);
    assert_eq!(i.subtract_all(&[]), vec![i]);
    // Exclusions entirely outside are ignored
    assert_eq!(i.subtract_all(&[Interval::new(0, 2), Interval::new(9, 12)]), vec![i]);
}

#[test]
fn test_subtract_all_fully_covered() {
    let i = Interval::new(3, 8);
    assert!(i.subtract_all(&[Interval::new(0, 20)]).is_empty());
    // Covered by overlapping pieces
    assert!(i.subtract_all(&[Interval::new(3, 5), Interval::new(5, 8)]).is_empty());
    // Covered by adjacent pieces
    assert!(i.subtract_all(&[Interval::new(2, 5), Interval::new(6, 9)]).is_empty());
}

#[test]
fn test_subtract_all_unsorted_and_overlapping_exclusions() {
    let gaps = Interval::new(0, 15).subtract_all(&[
        Interval::new(10, 12),
        Interval::new(1, 4),
        Interval::new(3, 6),
    ]);
    assert_eq!(gaps, vec![Interval::point(0), Interval::new(7, 9), Interval::new(13, 15)]);
}

#[test]
fn test_subtract_all_exclusions_clipped_to_interval() {
    let gaps = Interval::new(5, 10).subtract_all(&[Interval::new(0, 6), Interval::new(9, 20)]);
    assert_eq!(gaps, vec![Interval::new(7, 8)]);
}

// ============= IntervalTree Tests =============

#[test]
fn test_stab_scenario() {
    let tree = IntervalTree::build(&[
        Interval::new(1, 5),
        Interval::new(2, 6),
        Interval::new(8, 10),
    ])
    .unwrap();

    let mut at_3 = tree.stab(3);
    at_3.sort();
    assert_eq!(at_3, vec![Interval::new(1, 5), Interval::new(2, 6)]);

    assert_eq!(tree.stab(9), vec![Interval::new(8, 10)]);
    assert_eq!(tree.stab(7), Vec::<Interval>::new());
    assert_eq!(tree.stab(0), Vec::<Interval>::new());
    assert_eq!(tree.stab(11), Vec::<Interval>::new());
}

#[test]
fn test_stab_endpoints_inclusive() {
    let tree = IntervalTree::build(&[Interval::new(2, 6)]).unwrap();
    assert_eq!(tree.stab(2), vec![Interval::new(2, 6)]);
    assert_eq!(tree.stab(6), vec![Interval::new(2, 6)]);
    assert!(tree.stab(1).is_empty());
}

#[test]
fn test_build_empty_returns_none() {
    assert!(IntervalTree::build(&[]).is_none());
}

#[test]
fn test_stab_reports_duplicates_and_points() {
    let tree = IntervalTree::build(&[
        Interval::point(4),
        Interval::point(4),
        Interval::new(0, 9),
    ])
    .unwrap();

    let mut at_4 = tree.stab(4);
    at_4.sort();
    assert_eq!(
        at_4,
        vec![Interval::new(0, 9), Interval::point(4), Interval::point(4)]
    );
    assert_eq!(tree.num_intervals(), 3);
}

#[test]
fn test_stab_matches_linear_scan() {
    // Deterministic pseudo-random-ish spread of nested and disjoint intervals
    let intervals: Vec<Interval> = (0..40)
        .map(|k| {
            let first = (k * 7) % 50;
            Interval::new(first, first + (k * 3) % 13)
        })
        .collect();
    let tree = IntervalTree::build(&intervals).unwrap();
    assert!(tree.height() >= 1);

    for point in 0..64 {
        let mut expected: Vec<Interval> = intervals
            .iter()
            .filter(|i| i.contains(point))
            .copied()
            .collect();
        expected.sort();
        let mut hits = tree.stab(point);
        hits.sort();
        assert_eq!(hits, expected, "stab({point}) mismatch");
    }
}
