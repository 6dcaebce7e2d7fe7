//! Degree eligibility resolver
//!
//! A closer degree fully excludes the farther ones: once a child is recorded,
//! parents and grandparents are no longer eligible; once a parent is recorded,
//! grandparents are not. The spouse inherits alongside whichever degree is active.

use serde::Serialize;

use crate::errors::{DomainError, DomainResult};
use crate::relatives::RelativeCollection;
use crate::value_objects::Degree;

/// Which categories may receive further entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeEligibility {
    pub spouse_eligible: bool,
    pub first_degree_eligible: bool,
    pub second_degree_eligible: bool,
    pub third_degree_eligible: bool,
    #[serde(skip)]
    active: Option<Degree>,
}

impl DegreeEligibility {
    /// Whether relatives of `degree` may be added
    pub fn allows(&self, degree: Degree) -> bool {
        match degree {
            Degree::First => self.first_degree_eligible,
            Degree::Second => self.second_degree_eligible,
            Degree::Third => self.third_degree_eligible,
        }
    }

    /// Fail with `DegreeViolation` when `degree` is not eligible
    pub fn ensure(&self, degree: Degree) -> DomainResult<()> {
        if self.allows(degree) {
            return Ok(());
        }
        let reason = match (degree, self.active) {
            (_, Some(Degree::First)) => "children of the deceased have been recorded",
            (_, Some(Degree::Second)) => "a parent of the deceased has been recorded",
            _ => "a closer degree has been recorded",
        };
        Err(DomainError::DegreeViolation {
            degree,
            reason: reason.to_string(),
        })
    }

    /// The closest blood-line degree that holds at least one entry
    pub fn active_degree(&self) -> Option<Degree> {
        self.active
    }
}

/// Compute eligibility from the current state of the collection
pub fn resolve(collection: &RelativeCollection) -> DegreeEligibility {
    let has_children = collection.has_children();
    let has_parents = collection.has_parents();

    let active = if has_children {
        Some(Degree::First)
    } else if has_parents {
        Some(Degree::Second)
    } else if collection.has_grandparents() {
        Some(Degree::Third)
    } else {
        None
    };

    DegreeEligibility {
        spouse_eligible: true,
        first_degree_eligible: true,
        second_degree_eligible: !has_children,
        third_degree_eligible: !has_children && !has_parents,
        active,
    }
}
