//! Behavior of the key-indexed tree variant, exercised with an orbital
//! hierarchy ordered by descending mass.

use std::fmt;

use idtree::util::testing;
use idtree::{descending, Identity, KeyedTree, Removal, TreeError};
use rstest::rstest;

/// Celestial body: addressed by name, ordered by mass.
#[derive(Debug, Clone, PartialEq)]
struct Body {
    name: String,
    /// 10^21 kg
    mass: u64,
}

impl Body {
    fn new(name: &str, mass: u64) -> Self {
        Self {
            name: name.to_string(),
            mass,
        }
    }
}

impl Identity for Body {
    type Key = String;
    type Rank = u64;

    fn matching_key(&self) -> String {
        self.name.clone()
    }

    fn sorting_key(&self) -> u64 {
        self.mass
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.mass)
    }
}

fn key(s: &str) -> String {
    s.to_string()
}

/// sun
/// ├── jupiter
/// ├── earth
/// │   └── moon
/// └── mars
///     ├── deimos
///     └── phobos
fn solar_system() -> KeyedTree<Body> {
    testing::init_test_setup();
    let mut sys = KeyedTree::with_order(descending::<u64>);
    sys.set_root(Body::new("sun", 1_989_000_000)).unwrap();
    sys.insert(Body::new("earth", 5_972), &key("sun")).unwrap();
    sys.insert(Body::new("jupiter", 1_898_000), &key("sun"))
        .unwrap();
    sys.insert(Body::new("mars", 642), &key("sun")).unwrap();
    sys.insert(Body::new("moon", 73), &key("earth")).unwrap();
    // phobos and deimos tie on mass; sibling order falls back to the name
    sys.insert(Body::new("phobos", 1), &key("mars")).unwrap();
    sys.insert(Body::new("deimos", 1), &key("mars")).unwrap();
    sys
}

fn names(bodies: impl IntoIterator<Item = Body>) -> Vec<String> {
    bodies.into_iter().map(|b| b.name).collect()
}

// ============================================================
// Uniqueness & Identity Validation
// ============================================================

#[rstest]
fn given_present_key_when_inserting_then_fails_and_tree_is_unchanged() {
    let mut sys = solar_system();
    let result = sys.insert(Body::new("earth", 1), &key("sun"));

    assert!(matches!(result, Err(TreeError::DuplicateIdentity(_))));
    assert_eq!(sys.len(), 7);
    // the live node kept its original payload
    assert_eq!(sys.find(&key("earth")).unwrap().mass, 5_972);
}

#[rstest]
fn given_duplicate_key_under_other_parent_when_inserting_then_still_fails() {
    let mut sys = solar_system();
    let result = sys.insert(Body::new("moon", 99), &key("mars"));
    assert!(matches!(result, Err(TreeError::DuplicateIdentity(_))));
    assert_eq!(sys.len(), 7);
}

#[rstest]
fn given_empty_matching_key_when_inserting_then_fails_with_invalid_identity() {
    let mut sys = solar_system();
    assert!(matches!(
        sys.insert(Body::new("", 1), &key("sun")),
        Err(TreeError::InvalidIdentity)
    ));
    assert!(matches!(
        sys.set_root(Body::new("", 1)),
        Err(TreeError::InvalidIdentity)
    ));
    // the failed reset left the structure alone
    assert_eq!(sys.len(), 7);
    assert_eq!(sys.root().unwrap().name, "sun");
}

// ============================================================
// Addressing & Ordering
// ============================================================

#[rstest]
fn given_keyed_tree_when_listing_children_then_ordered_by_descending_mass() {
    let sys = solar_system();
    let planets = names(sys.children(&key("sun")).unwrap());
    assert_eq!(planets, vec!["jupiter", "earth", "mars"]);
}

#[rstest]
fn given_equal_masses_when_listing_children_then_tie_broken_by_key() {
    let sys = solar_system();
    let moons = names(sys.children(&key("mars")).unwrap());
    assert_eq!(moons, vec!["deimos", "phobos"]);
}

#[rstest]
fn given_mutated_payload_when_finding_by_key_then_still_resolves() {
    let mut sys = solar_system();
    sys.find_mut(&key("earth")).unwrap().mass = 6_000;
    assert_eq!(sys.find(&key("earth")).unwrap().mass, 6_000);
}

#[rstest]
fn given_keyed_tree_when_querying_parent_then_returns_parent_body() {
    let sys = solar_system();
    assert_eq!(sys.parent(&key("moon")).unwrap().name, "earth");
    assert!(matches!(
        sys.parent(&key("sun")),
        Err(TreeError::NoParent(_))
    ));
    assert!(matches!(
        sys.parent(&key("pluto")),
        Err(TreeError::NotFound(_))
    ));
}

#[rstest]
fn given_keyed_tree_when_listing_siblings_then_excludes_self_in_order() {
    let sys = solar_system();
    let siblings = names(sys.siblings(&key("earth")).unwrap());
    assert_eq!(siblings, vec!["jupiter", "mars"]);
    assert!(sys.siblings(&key("sun")).unwrap().is_empty());
}

#[rstest]
fn given_keyed_tree_when_traversing_then_priority_ordered_preorder() {
    let sys = solar_system();
    let all = names(sys.traverse());
    assert_eq!(
        all,
        vec!["sun", "jupiter", "earth", "moon", "mars", "deimos", "phobos"]
    );
    assert_eq!(sys.depth(), 3);
}

// ============================================================
// Removal & Index Maintenance
// ============================================================

#[rstest]
fn given_cascade_removal_then_every_descendant_key_is_forgotten() {
    let mut sys = solar_system();
    sys.remove(&key("mars"), Removal::Cascade).unwrap();

    assert_eq!(sys.len(), 4);
    for gone in ["mars", "phobos", "deimos"] {
        assert!(!sys.contains(&key(gone)), "{gone} should be gone");
    }
    let planets = names(sys.children(&key("sun")).unwrap());
    assert_eq!(planets, vec!["jupiter", "earth"]);
}

#[rstest]
fn given_promote_removal_then_moons_merge_into_planet_order() {
    let mut sys = solar_system();
    sys.remove(&key("mars"), Removal::Promote).unwrap();

    let under_sun = names(sys.children(&key("sun")).unwrap());
    assert_eq!(under_sun, vec!["jupiter", "earth", "deimos", "phobos"]);
    assert_eq!(sys.parent(&key("phobos")).unwrap().name, "sun");
    assert!(!sys.contains(&key("mars")));
    // earth's own moon is untouched
    assert_eq!(sys.parent(&key("moon")).unwrap().name, "earth");
}

#[rstest]
fn given_root_with_many_children_when_promoting_then_fails_unchanged() {
    let mut sys = solar_system();
    let result = sys.remove(&key("sun"), Removal::Promote);
    assert!(matches!(result, Err(TreeError::InvalidRemoval(_))));
    assert_eq!(sys.len(), 7);
    assert_eq!(sys.root().unwrap().name, "sun");
}

#[rstest]
fn given_root_when_cascading_then_container_is_emptied() {
    let mut sys = solar_system();
    sys.remove(&key("sun"), Removal::Cascade).unwrap();
    assert!(sys.is_empty());
    assert!(!sys.contains(&key("jupiter")));
}

#[rstest]
fn given_missing_key_when_removing_then_fails_with_not_found() {
    let mut sys = solar_system();
    let result = sys.remove(&key("pluto"), Removal::Cascade);
    assert!(matches!(result, Err(TreeError::NotFound(_))));
    assert_eq!(sys.len(), 7);
}

// ============================================================
// Reset, Reorder & Cloning
// ============================================================

#[rstest]
fn given_populated_tree_when_setting_new_root_then_index_is_reset() {
    let mut sys = solar_system();
    sys.set_root(Body::new("proxima", 244_000_000)).unwrap();

    assert_eq!(sys.len(), 1);
    assert!(!sys.contains(&key("sun")));
    assert!(!sys.contains(&key("moon")));
    assert_eq!(sys.root().unwrap().name, "proxima");
}

#[rstest]
fn given_mass_change_when_reordering_then_sibling_position_updates() {
    let mut sys = solar_system();
    sys.find_mut(&key("mars")).unwrap().mass = 10_000;
    // in-place rank changes never re-sort on their own
    let before = names(sys.children(&key("sun")).unwrap());
    assert_eq!(before, vec!["jupiter", "earth", "mars"]);

    sys.reorder(&key("mars")).unwrap();
    let after = names(sys.children(&key("sun")).unwrap());
    assert_eq!(after, vec!["jupiter", "mars", "earth"]);
}

#[rstest]
fn given_cloned_tree_when_mutating_either_then_other_is_untouched() {
    let original = solar_system();
    let mut copy = original.clone();

    copy.remove(&key("earth"), Removal::Cascade).unwrap();
    copy.insert(Body::new("venus", 4_867), &key("sun")).unwrap();

    assert_eq!(original.len(), 7);
    assert!(original.contains(&key("moon")));
    assert!(!original.contains(&key("venus")));
    // the clone's index answers for the clone alone
    assert_eq!(copy.len(), 6);
    assert!(copy.contains(&key("venus")));
    assert!(!copy.contains(&key("earth")));
}

#[rstest]
fn given_subtree_extraction_then_new_container_is_rooted_and_indexed() {
    let mut sys = solar_system();
    let mars = sys.subtree(&key("mars")).unwrap();

    assert_eq!(mars.root().unwrap().name, "mars");
    assert_eq!(mars.len(), 3);
    assert!(matches!(
        mars.parent(&key("mars")),
        Err(TreeError::NoParent(_))
    ));
    // the rebuilt index addresses the copies, not the source nodes
    sys.remove(&key("mars"), Removal::Cascade).unwrap();
    assert_eq!(mars.find(&key("phobos")).unwrap().mass, 1);
    assert_eq!(names(mars.children(&key("mars")).unwrap()), vec![
        "deimos", "phobos"
    ]);
}

// ============================================================
// Dump
// ============================================================

#[rstest]
fn given_keyed_tree_when_dumping_then_renders_every_body() {
    let sys = solar_system();
    let dump = sys.dump();
    println!("{dump}");
    assert!(dump.starts_with("sun"));
    for name in ["jupiter", "earth", "moon", "mars", "phobos", "deimos"] {
        assert!(dump.contains(name), "dump should contain {name}: {dump}");
    }
}
