//! Value objects representing immutable domain concepts

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Id of the deceased principal at the root of every canonical tree
pub const DECEASED_ID: &str = "deceased";

/// Id of the structural mother anchor used when only grandparents are known
pub const DECEASED_MOTHER_ID: &str = "deceased-mother";

/// Id of the structural father anchor used when only grandparents are known
pub const DECEASED_FATHER_ID: &str = "deceased-father";

/// Person identifier, opaque and stable for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Generate a new random person ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from an existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id belongs to the root or one of the placeholder anchors
    pub fn is_reserved(&self) -> bool {
        matches!(
            self.0.as_str(),
            DECEASED_ID | DECEASED_MOTHER_ID | DECEASED_FATHER_ID
        )
    }

    /// Whether the id is one of the placeholder parent anchors
    pub fn is_placeholder(&self) -> bool {
        matches!(self.0.as_str(), DECEASED_MOTHER_ID | DECEASED_FATHER_ID)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which parent slot of a node a relative occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentSide {
    Mother,
    Father,
}

impl ParentSide {
    pub const ALL: [ParentSide; 2] = [ParentSide::Mother, ParentSide::Father];

    /// The ascendant branch descending from this parent
    pub fn branch(&self) -> Branch {
        match self {
            ParentSide::Mother => Branch::Maternal,
            ParentSide::Father => Branch::Paternal,
        }
    }

    /// Id of the placeholder anchor standing in for this parent
    pub fn placeholder_id(&self) -> &'static str {
        match self {
            ParentSide::Mother => DECEASED_MOTHER_ID,
            ParentSide::Father => DECEASED_FATHER_ID,
        }
    }

    /// Display name of the placeholder anchor
    pub fn placeholder_name(&self) -> &'static str {
        match self {
            ParentSide::Mother => "Mother",
            ParentSide::Father => "Father",
        }
    }
}

impl fmt::Display for ParentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentSide::Mother => write!(f, "mother"),
            ParentSide::Father => write!(f, "father"),
        }
    }
}

/// Maternal or paternal partition of second and third degree relatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Maternal,
    Paternal,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::Maternal, Branch::Paternal];

    /// The parent slot under which this branch is anchored
    pub fn anchor(&self) -> ParentSide {
        match self {
            Branch::Maternal => ParentSide::Mother,
            Branch::Paternal => ParentSide::Father,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Maternal => write!(f, "maternal"),
            Branch::Paternal => write!(f, "paternal"),
        }
    }
}

/// Grandparent slot within one branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrandparentRole {
    Grandmother,
    Grandfather,
}

impl GrandparentRole {
    pub const ALL: [GrandparentRole; 2] =
        [GrandparentRole::Grandmother, GrandparentRole::Grandfather];

    /// Key under the anchor's `parents` map (a grandmother is the anchor's mother)
    pub fn as_parent_side(&self) -> ParentSide {
        match self {
            GrandparentRole::Grandmother => ParentSide::Mother,
            GrandparentRole::Grandfather => ParentSide::Father,
        }
    }

    pub fn from_parent_side(side: ParentSide) -> Self {
        match side {
            ParentSide::Mother => GrandparentRole::Grandmother,
            ParentSide::Father => GrandparentRole::Grandfather,
        }
    }
}

impl fmt::Display for GrandparentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrandparentRole::Grandmother => write!(f, "grandmother"),
            GrandparentRole::Grandfather => write!(f, "grandfather"),
        }
    }
}

/// Statutory degree (parentela) of blood relatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    /// Descendants
    First,
    /// Parents and their descendants
    Second,
    /// Grandparents and their descendants
    Third,
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degree::First => write!(f, "First degree"),
            Degree::Second => write!(f, "Second degree"),
            Degree::Third => write!(f, "Third degree"),
        }
    }
}

/// Estate value to distribute, always finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EstateValue(f64);

impl EstateValue {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::InvalidEstateValue { value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for EstateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
