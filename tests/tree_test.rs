//! Integration tests for level-order tree construction.

use rstest::rstest;

use forkjoin::domain::Tree;

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(8)]
#[case(100)]
fn given_n_insertions_when_building_then_tree_is_complete(#[case] n: i32) {
    let tree: Tree = (0..n).collect();

    assert_eq!(tree.len(), n as usize);
    assert!(tree.is_complete());
    // height of a complete tree with n nodes is floor(log2 n) + 1
    assert_eq!(tree.height(), (n as u32).ilog2() as usize + 1);
}

#[test]
fn given_scenario_values_when_building_then_levels_follow_insertion_order() {
    let tree: Tree = [7, 3, 2, 6, 8, 5].into_iter().collect();

    assert_eq!(tree.levels(), vec![vec![7], vec![3, 2], vec![6, 8, 5]]);
}

#[test]
fn given_tree_when_inserting_more_then_fills_next_free_slot() {
    let mut tree: Tree = [1, 2, 3].into_iter().collect();

    tree.insert(4);
    tree.insert(5);

    assert_eq!(tree.levels(), vec![vec![1], vec![2, 3], vec![4, 5]]);
    assert!(tree.is_complete());
}

#[test]
fn given_duplicates_and_negatives_when_building_then_all_are_kept() {
    let tree: Tree = [-1, -1, 0, i32::MIN, i32::MAX].into_iter().collect();

    assert_eq!(tree.len(), 5);
    let flat: Vec<i32> = tree.levels().concat();
    assert_eq!(flat, vec![-1, -1, 0, i32::MIN, i32::MAX]);
}

#[test]
fn given_empty_tree_when_querying_then_reports_nothing() {
    let tree = Tree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert!(tree.levels().is_empty());
    assert!(tree.root().is_none());
}
