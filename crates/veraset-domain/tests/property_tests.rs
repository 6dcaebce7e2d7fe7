//! Property-based tests for the relative collection and tree builder
//!
//! Random mutation sequences are replayed against a collection; every mutation
//! either succeeds or leaves the collection untouched, and every built tree keeps
//! its structural invariants.

use proptest::prelude::*;
use veraset_domain::builder::build;
use veraset_domain::*;

#[derive(Debug, Clone)]
enum Op {
    Spouse { alive: bool },
    Child { alive: bool, anchor: Option<usize> },
    MarriedChild { alive: bool, anchor: Option<usize> },
    Parent { side: ParentSide, alive: bool },
    Grandparent { branch: Branch, role: GrandparentRole, alive: bool },
    Sibling { anchor: usize, alive: bool },
    SpouseOf { anchor: usize },
    Remove { target: usize },
    SetAlive { target: usize, alive: bool },
}

fn side() -> impl Strategy<Value = ParentSide> {
    prop_oneof![Just(ParentSide::Mother), Just(ParentSide::Father)]
}

fn branch() -> impl Strategy<Value = Branch> {
    prop_oneof![Just(Branch::Maternal), Just(Branch::Paternal)]
}

fn role() -> impl Strategy<Value = GrandparentRole> {
    prop_oneof![
        Just(GrandparentRole::Grandmother),
        Just(GrandparentRole::Grandfather)
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(|alive| Op::Spouse { alive }),
        (any::<bool>(), proptest::option::of(0usize..16))
            .prop_map(|(alive, anchor)| Op::Child { alive, anchor }),
        (any::<bool>(), proptest::option::of(0usize..16))
            .prop_map(|(alive, anchor)| Op::MarriedChild { alive, anchor }),
        (side(), any::<bool>()).prop_map(|(side, alive)| Op::Parent { side, alive }),
        (branch(), role(), any::<bool>())
            .prop_map(|(branch, role, alive)| Op::Grandparent { branch, role, alive }),
        (0usize..16, any::<bool>()).prop_map(|(anchor, alive)| Op::Sibling { anchor, alive }),
        (0usize..16).prop_map(|anchor| Op::SpouseOf { anchor }),
        (0usize..16).prop_map(|target| Op::Remove { target }),
        (0usize..16, any::<bool>()).prop_map(|(target, alive)| Op::SetAlive { target, alive }),
    ]
}

/// Recorded ids in a stable order, so an index in an op always picks the same person
fn pick(relatives: &RelativeCollection, index: usize) -> PersonId {
    let mut ids: Vec<PersonId> = relatives.persons().map(|person| person.id.clone()).collect();
    ids.sort();
    if ids.is_empty() {
        PersonId::from("missing")
    } else {
        ids[index % ids.len()].clone()
    }
}

fn apply(relatives: &mut RelativeCollection, op: &Op, serial: usize) -> DomainResult<()> {
    let person = |alive: bool| {
        Person::with_id(PersonId::from_string(format!("p{serial}")), format!("Person {serial}"), alive)
    };
    match op {
        Op::Spouse { alive } => relatives.add_spouse(person(*alive)?),
        Op::Child { alive, anchor } => {
            let anchor = anchor.map(|index| pick(relatives, index));
            relatives.add_child(person(*alive)?, anchor.as_ref())
        }
        Op::MarriedChild { alive, anchor } => {
            let anchor = anchor.map(|index| pick(relatives, index));
            relatives.add_child(person(*alive)?.with_marriage(1, true)?, anchor.as_ref())
        }
        Op::Parent { side, alive } => relatives.add_parent(*side, person(*alive)?),
        Op::Grandparent { branch, role, alive } => {
            relatives.add_grandparent(*branch, *role, person(*alive)?)
        }
        Op::Sibling { anchor, alive } => {
            let anchor = pick(relatives, *anchor);
            relatives.add_sibling_or_cousin(&anchor, person(*alive)?)
        }
        Op::SpouseOf { anchor } => {
            let anchor = pick(relatives, *anchor);
            relatives.add_spouse_of(&anchor, person(true)?)
        }
        Op::Remove { target } => {
            let target = pick(relatives, *target);
            relatives.remove(&target).map(|_| ())
        }
        Op::SetAlive { target, alive } => {
            let target = pick(relatives, *target);
            relatives.set_alive(&target, *alive)
        }
    }
}

fn identities(persons: Vec<(&PersonId, &str, bool)>) -> Vec<(String, String, bool)> {
    let mut identities: Vec<(String, String, bool)> = persons
        .into_iter()
        .map(|(id, name, alive)| (id.to_string(), name.to_string(), alive))
        .collect();
    identities.sort();
    identities
}

fn check_tree(relatives: &RelativeCollection) -> Result<(), TestCaseError> {
    let tree = match build(relatives) {
        Ok(tree) => tree,
        Err(err) => return Err(TestCaseError::fail(format!("build failed: {err}"))),
    };

    // Living persons never carry children
    let mut living_with_children = 0;
    tree.visit(&mut |node, _| {
        if node.person.is_alive && !node.children.is_empty() {
            living_with_children += 1;
        }
    });
    prop_assert_eq!(living_with_children, 0);

    // Marriage metadata only on spouses
    let mut married_heirs = 0;
    tree.visit(&mut |node, _| {
        if node.person.marriage_info.is_some() {
            married_heirs += 1;
        }
    });
    prop_assert_eq!(married_heirs, 0);

    // Children exclude the parents key
    if !tree.children.is_empty() {
        prop_assert!(tree.parents.is_none());
    }

    // Real parents exclude placeholder anchors
    if relatives.has_parents() && !relatives.has_children() {
        prop_assert!(tree.find(DECEASED_MOTHER_ID).is_none());
        prop_assert!(tree.find(DECEASED_FATHER_ID).is_none());
    }

    // Side isolation below each parent slot
    if let Some(parents) = &tree.parents {
        for (side, anchor) in parents.iter() {
            let expected = side.branch();
            let mut crossed = 0;
            anchor.visit(&mut |node, _| {
                if node.branch != Some(expected) {
                    crossed += 1;
                }
            });
            prop_assert_eq!(crossed, 0, "{} side reached foreign data", side);
        }
    }

    // Flattening the request tree keeps every identity and life status
    let rows = unflatten(&WireNode::from(&tree));
    let from_rows = identities(
        rows.iter()
            .map(|row| (&row.id, row.display_name.as_str(), row.is_alive))
            .collect(),
    );
    let from_tree = identities(
        tree.persons()
            .into_iter()
            .filter(|person| !person.id.is_reserved())
            .map(|person| (&person.id, person.name.as_str(), person.is_alive))
            .collect(),
    );
    prop_assert_eq!(from_rows, from_tree);
    Ok(())
}

// ============================================================================
// Mutation Sequence Property Tests
// ============================================================================

proptest! {
    /// Every built tree keeps the structural invariants
    #[test]
    fn test_built_tree_invariants(ops in proptest::collection::vec(op(), 0..40)) {
        let mut relatives = RelativeCollection::new();
        for (serial, op) in ops.iter().enumerate() {
            let _ = apply(&mut relatives, op, serial);
            check_tree(&relatives)?;
        }
    }

    /// A rejected mutation leaves the collection as it was
    #[test]
    fn test_rejected_mutation_changes_nothing(ops in proptest::collection::vec(op(), 0..40)) {
        let mut relatives = RelativeCollection::new();
        for (serial, op) in ops.iter().enumerate() {
            let before_tree = build(&relatives).unwrap();
            let before_len = relatives.len();
            let before_persons = relatives.persons().count();
            let had_children = relatives.has_children();
            let had_parents = relatives.has_parents();

            match apply(&mut relatives, op, serial) {
                Ok(()) => match op {
                    Op::MarriedChild { .. } => {
                        prop_assert!(false, "marriage info accepted on a child")
                    }
                    Op::Parent { .. } => prop_assert!(!had_children),
                    Op::Grandparent { .. } => prop_assert!(!had_children && !had_parents),
                    _ => {}
                },
                Err(err) => {
                    prop_assert!(err.is_rejected_mutation(), "unexpected error {:?}", err);
                    prop_assert_eq!(relatives.len(), before_len);
                    prop_assert_eq!(relatives.persons().count(), before_persons);
                    prop_assert_eq!(build(&relatives).unwrap(), before_tree);
                }
            }
        }
    }

    /// Grandparent capacity per branch is never exceeded
    #[test]
    fn test_grandparent_capacity(ops in proptest::collection::vec(op(), 0..40)) {
        let mut relatives = RelativeCollection::new();
        for (serial, op) in ops.iter().enumerate() {
            let _ = apply(&mut relatives, op, serial);
            for branch in Branch::ALL {
                prop_assert!(relatives.grandparent_count(branch) <= MAX_GRANDPARENTS_PER_BRANCH);
            }
        }
    }
}
