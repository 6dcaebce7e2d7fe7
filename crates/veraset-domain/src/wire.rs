//! Wire format exchanged with the calculation service
//!
//! Requests carry the canonical tree with every `share` set to zero; responses
//! echo the same shape with shares filled in. Field names follow the service's
//! JSON contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{MarriageInfo, Person};
use crate::tree::HeirNode;
use crate::value_objects::{Branch, EstateValue, ParentSide, PersonId};

/// Marriage metadata as the service names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMarriageInfo {
    pub marriage_order: u32,
    #[serde(default = "default_is_current")]
    pub is_current: bool,
}

fn default_is_current() -> bool {
    true
}

impl From<MarriageInfo> for WireMarriageInfo {
    fn from(info: MarriageInfo) -> Self {
        Self {
            marriage_order: info.order,
            is_current: info.is_current,
        }
    }
}

/// One person on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePerson {
    pub id: PersonId,
    pub name: String,
    #[serde(default = "default_is_alive")]
    pub is_alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PersonId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_info: Option<WireMarriageInfo>,
    #[serde(default)]
    pub share: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_percentage: Option<f64>,
}

fn default_is_alive() -> bool {
    true
}

impl WirePerson {
    fn from_person(person: &Person, parent_id: Option<&PersonId>) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
            is_alive: person.is_alive,
            parent_id: parent_id.cloned(),
            marriage_info: person.marriage_info.map(WireMarriageInfo::from),
            share: 0.0,
            share_percentage: None,
        }
    }
}

/// Named parent slots on the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireParents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<Box<WireNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<Box<WireNode>>,
}

impl WireParents {
    pub fn get(&self, side: ParentSide) -> Option<&WireNode> {
        match side {
            ParentSide::Mother => self.mother.as_deref(),
            ParentSide::Father => self.father.as_deref(),
        }
    }

    /// Present parents, mother first
    pub fn iter(&self) -> impl Iterator<Item = (ParentSide, &WireNode)> {
        ParentSide::ALL
            .into_iter()
            .filter_map(move |side| self.get(side).map(|node| (side, node)))
    }
}

/// One node of the tree on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    pub person: WirePerson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<WirePerson>,
    #[serde(default)]
    pub children: Vec<WireNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<WireParents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
}

impl WireNode {
    fn from_node(node: &HeirNode, parent_id: Option<&PersonId>) -> Self {
        let id = &node.person.id;
        let parents = node.parents.as_ref().map(|parents| WireParents {
            mother: parents
                .mother
                .as_deref()
                .map(|mother| Box::new(Self::from_node(mother, Some(id)))),
            father: parents
                .father
                .as_deref()
                .map(|father| Box::new(Self::from_node(father, Some(id)))),
        });
        Self {
            person: WirePerson::from_person(&node.person, parent_id),
            spouse: node
                .spouse
                .as_ref()
                .map(|spouse| WirePerson::from_person(spouse, Some(id))),
            children: node
                .children
                .iter()
                .map(|child| Self::from_node(child, Some(id)))
                .collect(),
            parents,
            branch: node.branch,
        }
    }

    pub fn parent(&self, side: ParentSide) -> Option<&WireNode> {
        self.parents.as_ref().and_then(|parents| parents.get(side))
    }
}

impl From<&HeirNode> for WireNode {
    fn from(node: &HeirNode) -> Self {
        Self::from_node(node, None)
    }
}

/// Body of a calculation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub estate_value: f64,
    pub family_tree: WireNode,
}

impl CalculationRequest {
    pub fn new(estate_value: EstateValue, tree: &HeirNode) -> Self {
        Self {
            estate_value: estate_value.value(),
            family_tree: WireNode::from(tree),
        }
    }
}

/// Per-person line of the response summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSummary {
    pub name: String,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub share: f64,
    #[serde(default)]
    pub share_percentage: f64,
}

/// Body of a successful calculation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    #[serde(default)]
    pub total_distributed: f64,
    /// Annotated tree; older service versions answer with `shares` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_tree: Option<WireNode>,
    #[serde(default)]
    pub summary: BTreeMap<String, ShareSummary>,
    /// Flat id -> share map returned by older service versions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shares: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FailureDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Debug, Clone, Deserialize)]
struct ValidationIssue {
    msg: String,
}

/// Failure payload returned with a non-success status
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceFailure {
    #[serde(default)]
    detail: Option<FailureDetail>,
    #[serde(default)]
    error: Option<String>,
}

impl ServiceFailure {
    /// Human-readable message carried by the payload, if any
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(FailureDetail::Message(message)) if !message.trim().is_empty() => {
                Some(message.trim().to_string())
            }
            Some(FailureDetail::Validation(issues)) if !issues.is_empty() => Some(
                issues
                    .iter()
                    .map(|issue| issue.msg.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => self
                .error
                .as_deref()
                .map(str::trim)
                .filter(|error| !error.is_empty())
                .map(str::to_string),
        }
    }

    /// Extract the message from a raw response body
    pub fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<ServiceFailure>(body)
            .ok()
            .and_then(|failure| failure.message())
    }
}
