//! Canonical tree builder
//!
//! Turns the flat relative collection into the nested tree the calculation service
//! consumes. Only the closest populated degree is emitted:
//!
//! 1. children (with per stirpes nesting beneath deceased descendants), else
//! 2. the recorded parents, each carrying the siblings beneath it and, when present,
//!    that side's grandparents in its own `parents` slots, else
//! 3. grandparents beneath placeholder parent anchors, since the wire format has no
//!    direct deceased -> grandparent edge.

use tracing::debug;

use crate::entities::Person;
use crate::errors::DomainResult;
use crate::relatives::{Entry, RelativeCollection};
use crate::tree::{HeirNode, ParentNodes};
use crate::value_objects::{Branch, GrandparentRole, ParentSide};

/// Display name of the deceased when none is configured
pub const DEFAULT_DECEASED_NAME: &str = "Deceased Person";

/// Builds the canonical heir tree from a relative collection
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    deceased_name: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            deceased_name: DEFAULT_DECEASED_NAME.to_string(),
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name of the deceased root
    pub fn with_deceased_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.deceased_name = name.trim().to_string();
        }
        self
    }

    pub fn deceased_name(&self) -> &str {
        &self.deceased_name
    }

    /// Build the tree. An empty collection yields a bare root; deciding whether that
    /// may be submitted is up to the caller.
    pub fn build(&self, relatives: &RelativeCollection) -> DomainResult<HeirNode> {
        let mut root = HeirNode::leaf(Person::deceased(&self.deceased_name));
        root.spouse = relatives.spouse().cloned();

        if relatives.has_children() {
            if relatives.has_parents() || relatives.has_grandparents() {
                debug!("Ascendants excluded: children of the deceased are recorded");
            }
            root.children = relatives
                .child_entries()
                .into_iter()
                .map(|entry| self.descend(relatives, entry, None))
                .collect();
        } else if relatives.has_parents() {
            let mut parents = ParentNodes::default();
            for side in ParentSide::ALL {
                let branch = side.branch();
                match relatives.parent_entry(side) {
                    Some(entry) => {
                        let mut node = self.descend(relatives, entry, Some(branch));
                        if relatives.grandparent_count(branch) > 0 {
                            node.parents = Some(self.grandparents(relatives, side));
                        }
                        parents.insert(side, node);
                    }
                    None if relatives.grandparent_count(branch) > 0 => {
                        debug!(%branch, "Grandparents excluded: a parent of the deceased is recorded");
                    }
                    None => {}
                }
            }
            root.parents = Some(parents);
        } else if relatives.has_grandparents() {
            let mut parents = ParentNodes::default();
            for side in ParentSide::ALL {
                if relatives.grandparent_count(side.branch()) == 0 {
                    continue;
                }
                let mut anchor =
                    HeirNode::leaf(Person::placeholder(side)).with_branch(Some(side.branch()));
                anchor.parents = Some(self.grandparents(relatives, side));
                parents.insert(side, anchor);
            }
            root.parents = Some(parents);
        }

        root.check_invariants()?;
        debug!(nodes = root.node_count(), "Built canonical tree");
        Ok(root)
    }

    /// Map an entry and, when the person is deceased, everyone representing them
    fn descend(&self, relatives: &RelativeCollection, entry: &Entry, branch: Option<Branch>) -> HeirNode {
        let mut node = HeirNode::leaf(entry.person.clone()).with_branch(branch);
        node.spouse = entry.spouse.clone();
        if !entry.person.is_alive {
            node.children = relatives
                .descendants_of(&entry.person.id)
                .into_iter()
                .map(|child| self.descend(relatives, child, branch))
                .collect();
        }
        node
    }

    /// Grandparent slots of the anchor standing on `side`
    ///
    /// Slots are looked up by branch, so a grandparent on the wrong side is
    /// only caught by `HeirNode::check_invariants`.
    fn grandparents(&self, relatives: &RelativeCollection, side: ParentSide) -> ParentNodes {
        let branch = side.branch();
        let mut slots = ParentNodes::default();
        for role in GrandparentRole::ALL {
            if let Some(entry) = relatives.grandparent_entry(branch, role) {
                slots.insert(role.as_parent_side(), self.descend(relatives, entry, Some(branch)));
            }
        }
        slots
    }
}

/// Build with the default deceased name
pub fn build(relatives: &RelativeCollection) -> DomainResult<HeirNode> {
    TreeBuilder::default().build(relatives)
}
