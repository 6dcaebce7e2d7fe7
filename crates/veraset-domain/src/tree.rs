//! Canonical recursive heir tree

use std::collections::HashSet;

use crate::entities::Person;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Branch, ParentSide};

/// One node of the canonical tree
///
/// `children` holds representatives of a deceased person and is always empty when
/// the person is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct HeirNode {
    pub person: Person,
    /// Spouse of this node's person (the principal spouse only on the root)
    pub spouse: Option<Person>,
    pub children: Vec<HeirNode>,
    pub parents: Option<ParentNodes>,
    /// Provenance on second and third degree sub-trees
    pub branch: Option<Branch>,
}

/// Named parent slots of a node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentNodes {
    pub mother: Option<Box<HeirNode>>,
    pub father: Option<Box<HeirNode>>,
}

impl ParentNodes {
    pub fn get(&self, side: ParentSide) -> Option<&HeirNode> {
        match side {
            ParentSide::Mother => self.mother.as_deref(),
            ParentSide::Father => self.father.as_deref(),
        }
    }

    pub fn insert(&mut self, side: ParentSide, node: HeirNode) {
        let slot = match side {
            ParentSide::Mother => &mut self.mother,
            ParentSide::Father => &mut self.father,
        };
        *slot = Some(Box::new(node));
    }

    pub fn is_empty(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }

    /// Present parents in wire order (mother first)
    pub fn iter(&self) -> impl Iterator<Item = (ParentSide, &HeirNode)> {
        ParentSide::ALL
            .into_iter()
            .filter_map(move |side| self.get(side).map(|node| (side, node)))
    }
}

impl HeirNode {
    /// A node with no spouse, children or parents
    pub fn leaf(person: Person) -> Self {
        Self {
            person,
            spouse: None,
            children: Vec::new(),
            parents: None,
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: Option<Branch>) -> Self {
        self.branch = branch;
        self
    }

    /// Parent node on the given side, if any
    pub fn parent(&self, side: ParentSide) -> Option<&HeirNode> {
        self.parents.as_ref().and_then(|parents| parents.get(side))
    }

    /// Visit every node depth first, pre-order, with its depth below `self`
    pub fn visit<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a HeirNode, usize),
    {
        self.visit_at(0, f);
    }

    fn visit_at<'a, F>(&'a self, depth: usize, f: &mut F)
    where
        F: FnMut(&'a HeirNode, usize),
    {
        f(self, depth);
        for child in &self.children {
            child.visit_at(depth + 1, f);
        }
        if let Some(parents) = &self.parents {
            for (_, parent) in parents.iter() {
                parent.visit_at(depth + 1, f);
            }
        }
    }

    /// Every person in the tree, node spouses included
    pub fn persons(&self) -> Vec<&Person> {
        let mut persons = Vec::new();
        self.visit(&mut |node, _| {
            persons.push(&node.person);
            if let Some(spouse) = &node.spouse {
                persons.push(spouse);
            }
        });
        persons
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_, _| count += 1);
        count
    }

    /// Find a node by its person id
    pub fn find(&self, id: &str) -> Option<&HeirNode> {
        let mut found = None;
        self.visit(&mut |node, _| {
            if found.is_none() && node.person.id.as_str() == id {
                found = Some(node);
            }
        });
        found
    }

    /// Check the structural invariants of a built tree
    ///
    /// - living persons have no children
    /// - ids are unique
    /// - a labelled sub-tree never contains a node labelled with the other branch
    pub fn check_invariants(&self) -> DomainResult<()> {
        let mut seen = HashSet::new();
        self.check_node(None, &mut seen)
    }

    fn check_node<'a>(
        &'a self,
        inherited: Option<Branch>,
        seen: &mut HashSet<&'a str>,
    ) -> DomainResult<()> {
        if self.person.is_alive && !self.children.is_empty() {
            return Err(DomainError::LivingAncestor {
                id: self.person.id.to_string(),
            });
        }
        for person in std::iter::once(&self.person).chain(self.spouse.as_ref()) {
            if !seen.insert(person.id.as_str()) {
                return Err(DomainError::InvalidPerson {
                    field: "id".to_string(),
                    reason: format!("Duplicate id {} in tree", person.id),
                });
            }
        }
        if let (Some(expected), Some(actual)) = (inherited, self.branch) {
            if expected != actual {
                return Err(DomainError::BranchMismatch {
                    side: expected.anchor(),
                    branch: actual,
                });
            }
        }
        let branch = inherited.or(self.branch);
        for child in &self.children {
            child.check_node(branch, seen)?;
        }
        if let Some(parents) = &self.parents {
            for (side, parent) in parents.iter() {
                // The root's parent slots decide the branch of everything above them
                let branch = branch.or(Some(side.branch()));
                parent.check_node(branch, seen)?;
            }
        }
        Ok(())
    }
}
