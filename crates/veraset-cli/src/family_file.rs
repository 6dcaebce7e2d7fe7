//! JSON description of a family, replayed through the relative collection
//!
//! ```json
//! {
//!   "deceased_name": "Hasan",
//!   "estate_value": 120000,
//!   "spouse": { "name": "Ayşe" },
//!   "children": [
//!     { "name": "Ali", "is_alive": false, "children": [{ "name": "Veli" }] }
//!   ]
//! }
//! ```
//!
//! Nothing in the file is trusted: every entry goes through the same collection
//! operations as interactive data entry, so degree exclusivity, slot capacity and
//! the deceased-anchor rule reject an inconsistent file with the offending name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use veraset_domain::{
    Branch, DomainError, GrandparentRole, ParentSide, Person, PersonId, RelativeCollection,
};

use crate::error::{CliError, CliResult};

fn alive() -> bool {
    true
}

/// One relative, with their own spouse and the descendants recorded beneath them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "alive")]
    pub is_alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_order: Option<u32>,
    #[serde(default = "alive")]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<Box<FamilyMember>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FamilyMember>,
}

impl FamilyMember {
    /// A living member with no relatives of their own
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_alive: true,
            marriage_order: None,
            is_current: true,
            spouse: None,
            children: Vec::new(),
        }
    }

    fn person(&self) -> CliResult<Person> {
        let person = match &self.id {
            Some(id) => Person::with_id(PersonId::from_string(id.clone()), &self.name, self.is_alive),
            None => Person::new(&self.name, self.is_alive),
        }
        .map_err(|source| self.rejected(source))?;

        match self.marriage_order {
            Some(order) => person
                .with_marriage(order, self.is_current)
                .map_err(|source| self.rejected(source)),
            None => Ok(person),
        }
    }

    fn rejected(&self, source: DomainError) -> CliError {
        CliError::Rejected {
            who: self.name.clone(),
            source,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyParents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<FamilyMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<FamilyMember>,
}

impl FamilyParents {
    fn get(&self, side: ParentSide) -> Option<&FamilyMember> {
        match side {
            ParentSide::Mother => self.mother.as_ref(),
            ParentSide::Father => self.father.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrandparentPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandmother: Option<FamilyMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandfather: Option<FamilyMember>,
}

impl GrandparentPair {
    fn get(&self, role: GrandparentRole) -> Option<&FamilyMember> {
        match role {
            GrandparentRole::Grandmother => self.grandmother.as_ref(),
            GrandparentRole::Grandfather => self.grandfather.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyGrandparents {
    #[serde(default)]
    pub maternal: GrandparentPair,
    #[serde(default)]
    pub paternal: GrandparentPair,
}

impl FamilyGrandparents {
    fn get(&self, branch: Branch) -> &GrandparentPair {
        match branch {
            Branch::Maternal => &self.maternal,
            Branch::Paternal => &self.paternal,
        }
    }
}

/// Whole family file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estate_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<FamilyMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FamilyMember>,
    #[serde(default)]
    pub parents: FamilyParents,
    #[serde(default)]
    pub grandparents: FamilyGrandparents,
}

impl FamilyFile {
    /// Read and parse a family file
    pub fn load(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FamilyFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            CliError::FamilyFile { message, .. } => CliError::FamilyFile {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse a family file from a JSON string
    pub fn parse(content: &str) -> CliResult<Self> {
        serde_json::from_str(content).map_err(|e| CliError::FamilyFile {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Replay every entry into `relatives`, stopping at the first rejected one
    pub fn apply(&self, relatives: &mut RelativeCollection) -> CliResult<()> {
        if let Some(spouse) = &self.spouse {
            if spouse.spouse.is_some() || !spouse.children.is_empty() {
                return Err(spouse.rejected(DomainError::InvalidPerson {
                    field: "spouse".to_string(),
                    reason: "List the children of the deceased under `children`".to_string(),
                }));
            }
            relatives
                .add_spouse(spouse.person()?)
                .map_err(|source| spouse.rejected(source))?;
        }

        for child in &self.children {
            let person = child.person()?;
            let id = person.id.clone();
            relatives
                .add_child(person, None)
                .map_err(|source| child.rejected(source))?;
            replay_member(relatives, &id, child, Line::Descendants)?;
        }

        for side in ParentSide::ALL {
            if let Some(parent) = self.parents.get(side) {
                let person = parent.person()?;
                let id = person.id.clone();
                relatives
                    .add_parent(side, person)
                    .map_err(|source| parent.rejected(source))?;
                replay_member(relatives, &id, parent, Line::Ascendants)?;
            }
        }

        for branch in Branch::ALL {
            for role in GrandparentRole::ALL {
                if let Some(grandparent) = self.grandparents.get(branch).get(role) {
                    let person = grandparent.person()?;
                    let id = person.id.clone();
                    relatives
                        .add_grandparent(branch, role, person)
                        .map_err(|source| grandparent.rejected(source))?;
                    replay_member(relatives, &id, grandparent, Line::Ascendants)?;
                }
            }
        }

        debug!(entries = relatives.len(), "Replayed family file");
        Ok(())
    }

    /// Build a fresh collection from the file
    pub fn to_relatives(&self) -> CliResult<RelativeCollection> {
        let mut relatives = RelativeCollection::new();
        self.apply(&mut relatives)?;
        Ok(relatives)
    }
}

#[derive(Clone, Copy)]
enum Line {
    Descendants,
    Ascendants,
}

/// Spouse and descendants of a member that is already recorded under `id`
fn replay_member(
    relatives: &mut RelativeCollection,
    id: &PersonId,
    member: &FamilyMember,
    line: Line,
) -> CliResult<()> {
    if let Some(spouse) = &member.spouse {
        relatives
            .add_spouse_of(id, spouse.person()?)
            .map_err(|source| spouse.rejected(source))?;
    }

    for child in &member.children {
        let person = child.person()?;
        let child_id = person.id.clone();
        let added = match line {
            Line::Descendants => relatives.add_child(person, Some(id)),
            Line::Ascendants => relatives.add_sibling_or_cousin(id, person),
        };
        added.map_err(|source| child.rejected(source))?;
        replay_member(relatives, &child_id, child, line)?;
    }
    Ok(())
}
