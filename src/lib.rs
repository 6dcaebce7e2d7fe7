//! Shared fixtures for the cross-crate test suites in `tests/`

use serde_json::{json, Value};
use veraset_domain::{Person, PersonId};

/// A person with a fixed id, so mock responses can refer to it
pub fn person(id: &str, name: &str, is_alive: bool) -> Person {
    match Person::with_id(PersonId::from(id), name, is_alive) {
        Ok(person) => person,
        Err(err) => panic!("invalid fixture person {id}: {err}"),
    }
}

/// Wire person as the calculation service returns it
pub fn wire_person(id: &str, name: &str, share: f64, percentage: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "is_alive": true,
        "share": share,
        "share_percentage": percentage,
    })
}

/// Successful calculation response around `family_tree`
pub fn calculation_response(total: f64, family_tree: Value) -> Value {
    json!({
        "total_distributed": total,
        "family_tree": family_tree,
    })
}
