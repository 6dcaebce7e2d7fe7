//! Flattens a share-annotated tree into displayable rows

use std::fmt;

use serde::Serialize;

use crate::value_objects::{Branch, GrandparentRole, ParentSide, PersonId};
use crate::wire::{CalculationResponse, WireNode, WirePerson};

/// Rendered in place of a missing or zero amount
pub const NO_SHARE: &str = "—";

/// How a result row relates to the deceased, derived from its position in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationLabel {
    Spouse,
    /// Spouse of a relative other than the deceased
    SpouseOf { name: String },
    Child,
    /// Grandchild (generation 2) or further descendant through `via`
    Descendant { generation: usize, via: String },
    Parent { side: ParentSide },
    Sibling { via: ParentSide },
    NieceNephew { via: String },
    Grandparent { branch: Branch, role: GrandparentRole },
    UncleAunt { branch: Branch },
    Cousin { via: String, branch: Branch },
    /// Position the tree shape does not name
    Relative,
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationLabel::Spouse => write!(f, "spouse"),
            RelationLabel::SpouseOf { name } => write!(f, "spouse of {name}"),
            RelationLabel::Child => write!(f, "child"),
            RelationLabel::Descendant { generation, via } => {
                let greats = "great-".repeat(generation.saturating_sub(2));
                write!(f, "{greats}grandchild via {via}")
            }
            RelationLabel::Parent { side } => write!(f, "{side}"),
            RelationLabel::Sibling { via } => write!(f, "sibling via {via}"),
            RelationLabel::NieceNephew { via } => write!(f, "niece/nephew via {via}"),
            RelationLabel::Grandparent { branch, role } => write!(f, "{role} ({branch})"),
            RelationLabel::UncleAunt { branch } => write!(f, "uncle/aunt ({branch})"),
            RelationLabel::Cousin { via, branch } => write!(f, "cousin via {via} ({branch})"),
            RelationLabel::Relative => write!(f, "relative"),
        }
    }
}

/// One displayable line of a calculation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub id: PersonId,
    pub display_name: String,
    pub relation_label: RelationLabel,
    pub is_alive: bool,
    pub share: f64,
    pub share_percentage: Option<f64>,
}

impl ResultRow {
    fn new(person: &WirePerson, relation_label: RelationLabel) -> Self {
        Self {
            id: person.id.clone(),
            display_name: person.name.clone(),
            relation_label,
            is_alive: person.is_alive,
            share: person.share,
            share_percentage: person.share_percentage,
        }
    }

    /// Whether the row received a non-zero share
    pub fn has_share(&self) -> bool {
        self.share.is_finite() && self.share > 0.0
    }

    pub fn display_share(&self) -> String {
        if self.has_share() {
            format!("{:.2}", self.share)
        } else {
            NO_SHARE.to_string()
        }
    }

    pub fn display_percentage(&self) -> String {
        match self.share_percentage {
            Some(percentage) if percentage.is_finite() && percentage > 0.0 => {
                format!("{percentage:.2}%")
            }
            _ => NO_SHARE.to_string(),
        }
    }
}

/// Where the walk currently stands relative to the deceased
#[derive(Debug, Clone, Copy)]
enum Line {
    Descendants,
    Parent(ParentSide),
    Grandparent(Branch),
    /// Anything above a grandparent
    Beyond,
}

/// Flatten a tree, depth first and pre-order: spouse, children, mother side, father side
///
/// The root and the placeholder anchors produce no rows.
pub fn unflatten(root: &WireNode) -> Vec<ResultRow> {
    let mut rows = Vec::new();
    if let Some(spouse) = &root.spouse {
        rows.push(ResultRow::new(spouse, RelationLabel::Spouse));
    }
    for child in &root.children {
        walk_down(child, Line::Descendants, 1, None, &mut rows);
    }
    if let Some(parents) = &root.parents {
        for (side, parent) in parents.iter() {
            walk_up(parent, Line::Parent(side), &mut rows);
        }
    }
    rows
}

fn push_node(node: &WireNode, label: RelationLabel, rows: &mut Vec<ResultRow>) {
    if node.person.id.is_reserved() {
        return;
    }
    rows.push(ResultRow::new(&node.person, label));
    if let Some(spouse) = &node.spouse {
        rows.push(ResultRow::new(
            spouse,
            RelationLabel::SpouseOf {
                name: node.person.name.clone(),
            },
        ));
    }
}

/// An ascendant and everything hanging from it
fn walk_up(node: &WireNode, line: Line, rows: &mut Vec<ResultRow>) {
    let label = match line {
        Line::Parent(side) => RelationLabel::Parent { side },
        _ => RelationLabel::Relative,
    };
    push_node(node, label, rows);

    for child in &node.children {
        walk_down(child, line, 1, Some(&node.person.name), rows);
    }

    let Some(parents) = &node.parents else {
        return;
    };
    for (side, parent) in parents.iter() {
        match line {
            Line::Parent(anchor) => {
                let branch = anchor.branch();
                walk_grandparent(parent, branch, GrandparentRole::from_parent_side(side), rows);
            }
            _ => walk_up(parent, Line::Beyond, rows),
        }
    }
}

fn walk_grandparent(node: &WireNode, branch: Branch, role: GrandparentRole, rows: &mut Vec<ResultRow>) {
    push_node(node, RelationLabel::Grandparent { branch, role }, rows);
    for child in &node.children {
        walk_down(child, Line::Grandparent(branch), 1, Some(&node.person.name), rows);
    }
    if let Some(parents) = &node.parents {
        for (_, parent) in parents.iter() {
            walk_up(parent, Line::Beyond, rows);
        }
    }
}

/// A descendant `generation` steps below the head of its line
fn walk_down(node: &WireNode, line: Line, generation: usize, via: Option<&str>, rows: &mut Vec<ResultRow>) {
    let via_name = via.unwrap_or_default().to_string();
    let label = match (line, generation) {
        (Line::Descendants, 1) => RelationLabel::Child,
        (Line::Descendants, generation) => RelationLabel::Descendant {
            generation,
            via: via_name,
        },
        (Line::Parent(side), 1) => RelationLabel::Sibling { via: side },
        (Line::Parent(_), _) => RelationLabel::NieceNephew { via: via_name },
        (Line::Grandparent(branch), 1) => RelationLabel::UncleAunt { branch },
        (Line::Grandparent(branch), _) => RelationLabel::Cousin {
            via: via_name,
            branch,
        },
        (Line::Beyond, _) => RelationLabel::Relative,
    };
    push_node(node, label, rows);
    for child in &node.children {
        walk_down(child, line, generation + 1, Some(&node.person.name), rows);
    }
}

impl CalculationResponse {
    /// Use the submitted tree when the service answered with flat shares only
    pub fn with_submitted_tree(mut self, submitted: &WireNode) -> Self {
        if self.family_tree.is_none() {
            self.family_tree = Some(submitted.clone());
        }
        self
    }

    /// Result rows with shares taken from the tree, falling back to the flat maps
    ///
    /// A response without a tree has no rows until [`Self::with_submitted_tree`]
    /// supplies one.
    pub fn rows(&self) -> Vec<ResultRow> {
        let Some(tree) = &self.family_tree else {
            return Vec::new();
        };
        let mut rows = unflatten(tree);
        for row in &mut rows {
            let key = row.id.as_str();
            if !row.has_share() {
                if let Some(share) = self
                    .shares
                    .get(key)
                    .copied()
                    .or_else(|| self.summary.get(key).map(|summary| summary.share))
                {
                    row.share = share;
                }
            }
            if row.share_percentage.is_none() {
                row.share_percentage = self
                    .summary
                    .get(key)
                    .map(|summary| summary.share_percentage);
            }
        }
        rows
    }
}
