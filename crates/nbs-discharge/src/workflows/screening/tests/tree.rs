use super::common::*;
use crate::workflows::screening::referral::ReferralDirectory;
use crate::workflows::screening::tree::{
    resolve_active_path, ActivePath, DecisionTree, NodeId, NodeRef,
};
use crate::workflows::screening::Scenario;
use std::collections::HashSet;

fn ids(path: &ActivePath) -> Vec<&'static str> {
    path.iter().map(NodeId::as_str).collect()
}

#[test]
fn standard_tree_has_expected_topology() {
    let tree = DecisionTree::standard();
    let walked: Vec<(usize, &str)> = tree
        .walk()
        .into_iter()
        .map(|(depth, node)| (depth, node.id().as_str()))
        .collect();

    assert_eq!(
        walked,
        vec![
            (0, "root"),
            (1, "age_gte_24"),
            (2, "scenario_a"),
            (1, "age_lt_24"),
            (2, "can_delay"),
            (3, "delay_yes"),
            (4, "scenario_b"),
            (3, "delay_no"),
            (4, "scenario_c"),
            (5, "ref_sohar"),
            (5, "ref_shinas"),
            (5, "ref_saham"),
            (5, "ref_khabourah"),
        ]
    );
}

#[test]
fn node_ids_are_unique() {
    let tree = DecisionTree::standard();
    let mut seen = HashSet::new();
    for (_, node) in tree.walk() {
        assert!(seen.insert(node.id()), "duplicate node id {}", node.id());
    }
}

#[test]
fn referral_leaves_mirror_the_directory() {
    let tree = DecisionTree::standard();
    let directory = ReferralDirectory::north_batinah();

    let leaf_regions: Vec<&str> = tree
        .referral_leaves()
        .into_iter()
        .map(|leaf| leaf.region)
        .collect();
    let directory_keys: Vec<&str> = directory.keys().collect();
    assert_eq!(leaf_regions, directory_keys);

    for leaf in tree.referral_leaves() {
        let entry = directory
            .lookup(leaf.region)
            .expect("leaf region resolves in directory");
        assert_eq!(leaf.center, entry.center);
    }
}

#[test]
fn scenario_leaves_carry_matching_risk() {
    let tree = DecisionTree::standard();
    for scenario in Scenario::ordered() {
        let leaf = tree.scenario_leaf(scenario).expect("leaf per scenario");
        assert_eq!(leaf.risk_level, scenario.risk_level());
        assert!(!leaf.actions.is_empty());
        assert_eq!(leaf.referrals.is_empty(), scenario != Scenario::C);
    }
}

#[test]
fn scenario_a_path() {
    let path = resolve_active_path(Scenario::A, Some("saham"));
    assert_eq!(ids(&path), ["root", "age_gte_24", "scenario_a"]);
    assert_eq!(path.leaf(), Some(NodeId::SCENARIO_A));
}

#[test]
fn scenario_b_path() {
    let path = resolve_active_path(Scenario::B, Some("saham"));
    assert_eq!(
        ids(&path),
        ["root", "age_lt_24", "can_delay", "delay_yes", "scenario_b"]
    );
}

#[test]
fn scenario_c_path_reaches_the_referral_leaf() {
    let path = resolve_active_path(Scenario::C, Some("saham"));

    assert_eq!(path.len(), 6);
    assert!(path.contains(NodeId::ROOT));
    assert!(path.contains(NodeId::SCENARIO_C));
    assert!(path.contains(NodeId::new("ref_saham")));
    assert_eq!(path.to_set().len(), 6);
}

#[test]
fn scenario_c_path_stops_at_leaf_for_unknown_region() {
    for wilayat in [Some(UNKNOWN_WILAYAT), None] {
        let path = resolve_active_path(Scenario::C, wilayat);
        assert_eq!(path.len(), 5);
        assert_eq!(path.leaf(), Some(NodeId::SCENARIO_C));
    }
}

#[test]
fn active_paths_are_connected_chains_from_the_root() {
    let tree = DecisionTree::standard();
    let directory = ReferralDirectory::north_batinah();
    let regions: Vec<Option<&str>> = directory
        .keys()
        .map(Some)
        .chain([None, Some(UNKNOWN_WILAYAT)])
        .collect();

    for scenario in Scenario::ordered() {
        for wilayat in &regions {
            let path = tree.active_path(scenario, *wilayat);
            let nodes: Vec<NodeId> = path.iter().collect();
            assert_eq!(nodes.first(), Some(&NodeId::ROOT));

            for pair in nodes.windows(2) {
                let parent = tree.find(pair[0]).expect("parent on tree");
                assert!(
                    parent.children().iter().any(|child| child.id() == pair[1]),
                    "{} is not a child of {}",
                    pair[1],
                    pair[0]
                );
            }

            let leaf_id = *nodes.last().expect("non-empty path");
            let leaf = tree.find(leaf_id).expect("leaf on tree");
            assert!(matches!(leaf, NodeRef::Scenario(_) | NodeRef::Referral(_)));
        }
    }
}

#[test]
fn active_path_ignores_continuous_age() {
    let first = decide_and_resolve(3.0);
    let second = decide_and_resolve(11.0);
    assert_eq!(first, second);
}

fn decide_and_resolve(age: f64) -> ActivePath {
    let outcome = engine().decide(age, false, Some("shinas_liwa"));
    resolve_active_path(outcome.scenario, Some("shinas_liwa"))
}

#[test]
fn resolution_is_idempotent_across_threads() {
    let expected = resolve_active_path(Scenario::C, Some("sohar"));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| resolve_active_path(Scenario::C, Some("sohar"))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread completes"), expected);
        }
    });
}
