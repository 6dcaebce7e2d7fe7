//! Veraset domain model
//!
//! Family relationships of a deceased person, the statutory degree rules that gate
//! which relatives may be recorded, and the transforms between the incrementally
//! built heir set and the canonical tree exchanged with the calculation service.
//!
//! ## Modules
//!
//! - `relatives`: the mutable heir set built during data entry
//! - `eligibility`: degree exclusivity, recomputed after every mutation
//! - `builder`: heir set -> canonical tree
//! - `wire`: request and response bodies of the calculation service
//! - `unflatten`: share-annotated tree -> displayable rows

pub mod builder;
pub mod eligibility;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod relatives;
pub mod tree;
pub mod unflatten;
pub mod value_objects;
pub mod wire;

// Re-export commonly used types
pub use builder::{TreeBuilder, DEFAULT_DECEASED_NAME};
pub use eligibility::DegreeEligibility;
pub use entities::{Lineage, MarriageInfo, Person, Relation};
pub use errors::{DomainError, DomainResult};
pub use ports::CalculationPort;
pub use relatives::{Entry, RelativeCollection, MAX_GRANDPARENTS_PER_BRANCH};
pub use tree::{HeirNode, ParentNodes};
pub use unflatten::{unflatten, RelationLabel, ResultRow, NO_SHARE};
pub use value_objects::{
    Branch, Degree, EstateValue, GrandparentRole, ParentSide, PersonId, DECEASED_FATHER_ID,
    DECEASED_ID, DECEASED_MOTHER_ID,
};
pub use wire::{
    CalculationRequest, CalculationResponse, ServiceFailure, ShareSummary, WireMarriageInfo,
    WireNode, WireParents, WirePerson,
};
