//! Family file replay tests

use std::io::Write;

use veraset_cli::commands::{EligibilityCommand, TreeCommand};
use veraset_cli::output::OutputStyle;
use veraset_cli::{CliError, FamilyFile};
use veraset_domain::{DomainError, ParentSide, DECEASED_FATHER_ID};

fn write_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_descendants_and_spouses_are_replayed() {
    let family = FamilyFile::parse(
        r#"{
            "spouse": {"id": "s1", "name": "Ayşe", "marriage_order": 2, "is_current": true},
            "children": [
                {"id": "c1", "name": "Ali", "is_alive": false,
                 "spouse": {"id": "w1", "name": "Selin"},
                 "children": [{"id": "g1", "name": "Veli"}, {"id": "g2", "name": "Zeynep"}]},
                {"id": "c2", "name": "Can"}
            ]
        }"#,
    )
    .unwrap();
    let relatives = family.to_relatives().unwrap();

    assert_eq!(relatives.spouse().unwrap().marriage_info.unwrap().order, 2);
    assert_eq!(relatives.children().len(), 2);
    let ali = relatives.get(&"c1".into()).unwrap();
    assert_eq!(ali.children.len(), 2);
    assert_eq!(ali.spouse.as_ref().unwrap().name, "Selin");
    assert!(!relatives.resolve().second_degree_eligible);
}

#[test]
fn test_siblings_replay_beneath_deceased_parent() {
    let family = FamilyFile::parse(
        r#"{
            "parents": {
                "mother": {"name": "Emine"},
                "father": {"id": "f", "name": "Ahmet", "is_alive": false,
                           "children": [{"id": "s", "name": "Fatma", "is_alive": false,
                                         "children": [{"name": "Kerem"}]}]}
            }
        }"#,
    )
    .unwrap();
    let relatives = family.to_relatives().unwrap();

    assert!(relatives.mother().is_some());
    assert_eq!(relatives.parent(ParentSide::Father).unwrap().name, "Ahmet");
    assert_eq!(relatives.descendants_of(&"f".into()).len(), 1);
    assert_eq!(relatives.descendants_of(&"s".into())[0].person.name, "Kerem");
    assert!(!relatives.resolve().third_degree_eligible);
}

#[test]
fn test_degree_conflict_names_the_rejected_person() {
    let family = FamilyFile::parse(
        r#"{
            "children": [{"name": "Can"}],
            "parents": {"mother": {"name": "Emine"}}
        }"#,
    )
    .unwrap();

    match family.to_relatives().unwrap_err() {
        CliError::Rejected { who, source } => {
            assert_eq!(who, "Emine");
            assert!(matches!(source, DomainError::DegreeViolation { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_descendant_of_living_child_is_rejected() {
    let family = FamilyFile::parse(
        r#"{"children": [{"name": "Can", "children": [{"name": "Deniz"}]}]}"#,
    )
    .unwrap();

    let err = family.to_relatives().unwrap_err();
    assert!(matches!(
        err,
        CliError::Rejected { ref who, source: DomainError::ParentNotFound { .. } } if who == "Deniz"
    ));
}

#[test]
fn test_eligibility_report() {
    let file = write_file(r#"{"parents": {"father": {"name": "Ahmet"}}}"#);
    let report = EligibilityCommand::new(file.path())
        .render(&OutputStyle::plain())
        .unwrap();

    assert!(report.contains("✓ Spouse"));
    assert!(report.contains("✗ Children and descendants"));
    assert!(report.contains("✓ Parents and siblings"));
    assert!(report.contains("✗ Grandparents, uncles and aunts"));
    assert!(report.contains("second degree"));
    assert!(report.contains("Recorded relatives: 1"));
}

#[test]
fn test_tree_prints_placeholder_anchor_for_grandparent_only() {
    let file = write_file(
        r#"{"grandparents": {"paternal": {"grandfather": {"name": "Osman"}}}}"#,
    );
    let json = TreeCommand::new(file.path(), "Hasan").render().unwrap();
    let tree: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(tree["person"]["name"], "Hasan");
    assert_eq!(tree["parents"]["father"]["person"]["id"], DECEASED_FATHER_ID);
    assert_eq!(
        tree["parents"]["father"]["parents"]["father"]["person"]["name"],
        "Osman"
    );
    assert!(tree["parents"].get("mother").is_none());
}

#[test]
fn test_tree_with_estate_prints_request() {
    let file = write_file(
        r#"{"deceased_name": "Hasan", "estate_value": 90000, "spouse": {"name": "Ayşe"}}"#,
    );
    let json = TreeCommand::new(file.path(), "Deceased Person")
        .render()
        .unwrap();
    let request: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(request["estate_value"], 90000.0);
    assert_eq!(request["family_tree"]["person"]["name"], "Hasan");
    assert_eq!(request["family_tree"]["spouse"]["name"], "Ayşe");
}

#[test]
fn test_missing_file_is_reported_with_path() {
    let err = FamilyFile::load("/definitely/not/here.json").unwrap_err();
    match &err {
        CliError::FamilyFile { path, .. } => assert!(path.ends_with("here.json")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.user_message().contains("here.json"));
}
