//! Core domain entities: persons and their relation to the deceased

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::value_objects::*;

/// Marriage metadata, only ever present on a spouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageInfo {
    /// 1 for the first marriage, 2 for the second, ...
    pub order: u32,
    pub is_current: bool,
}

impl MarriageInfo {
    pub fn new(order: u32, is_current: bool) -> DomainResult<Self> {
        if order == 0 {
            return Err(DomainError::InvalidPerson {
                field: "marriage_info.order".to_string(),
                reason: "Marriage order starts at 1".to_string(),
            });
        }
        Ok(Self { order, is_current })
    }

    /// The current (first) marriage
    pub fn current() -> Self {
        Self {
            order: 1,
            is_current: true,
        }
    }
}

/// A named individual with a life status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub is_alive: bool,
    pub marriage_info: Option<MarriageInfo>,
}

impl Person {
    /// Create a new person with a generated id
    pub fn new(name: impl Into<String>, is_alive: bool) -> DomainResult<Self> {
        Self::with_id(PersonId::new(), name, is_alive)
    }

    /// Create a person with an explicit id
    pub fn with_id(id: PersonId, name: impl Into<String>, is_alive: bool) -> DomainResult<Self> {
        let name = Self::validate_name(name.into())?;
        Ok(Self {
            id,
            name,
            is_alive,
            marriage_info: None,
        })
    }

    /// Attach marriage metadata
    pub fn with_marriage(mut self, order: u32, is_current: bool) -> DomainResult<Self> {
        self.marriage_info = Some(MarriageInfo::new(order, is_current)?);
        Ok(self)
    }

    /// Rename with validation
    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = Self::validate_name(name.into())?;
        Ok(())
    }

    /// The deceased principal at the root of a tree
    pub(crate) fn deceased(name: &str) -> Self {
        Self {
            id: PersonId::from(DECEASED_ID),
            name: name.to_string(),
            is_alive: false,
            marriage_info: None,
        }
    }

    /// Structural anchor standing in for an unrecorded, deceased parent
    pub(crate) fn placeholder(side: ParentSide) -> Self {
        Self {
            id: PersonId::from(side.placeholder_id()),
            name: side.placeholder_name().to_string(),
            is_alive: false,
            marriage_info: None,
        }
    }

    fn validate_name(name: String) -> DomainResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPerson {
                field: "name".to_string(),
                reason: "Name cannot be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    }
}

/// How a recorded person relates to the deceased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relation {
    Spouse,
    /// Direct child of the deceased
    Child,
    Parent {
        side: ParentSide,
    },
    Grandparent {
        branch: Branch,
        role: GrandparentRole,
    },
    /// Child of a deceased grandparent
    UncleAunt {
        branch: Branch,
    },
    /// Anyone attached beneath a deceased child, parent, uncle/aunt or descendant
    Descendant,
}

impl Relation {
    /// The degree this relation belongs to when it roots a lineage
    pub fn degree(&self) -> Option<Degree> {
        match self {
            Relation::Spouse => None,
            Relation::Child => Some(Degree::First),
            Relation::Parent { .. } => Some(Degree::Second),
            Relation::Grandparent { .. } | Relation::UncleAunt { .. } => Some(Degree::Third),
            Relation::Descendant => None,
        }
    }
}

/// The line of descent an entry belongs to, found by walking to its root entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lineage {
    Spouse,
    Descendants,
    Parent(ParentSide),
    Grandparent(Branch),
}

impl Lineage {
    pub fn degree(&self) -> Option<Degree> {
        match self {
            Lineage::Spouse => None,
            Lineage::Descendants => Some(Degree::First),
            Lineage::Parent(_) => Some(Degree::Second),
            Lineage::Grandparent(_) => Some(Degree::Third),
        }
    }

    pub fn branch(&self) -> Option<Branch> {
        match self {
            Lineage::Parent(side) => Some(side.branch()),
            Lineage::Grandparent(branch) => Some(*branch),
            _ => None,
        }
    }
}
