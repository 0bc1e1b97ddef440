use slotbook_core::{Owner, OwnerDirectory, OwnerDirectoryError};
use std::io::Write;

#[test]
fn default_roster_matches_reference_deployment() {
    let directory = OwnerDirectory::default();
    let names = directory
        .owners()
        .iter()
        .map(|owner| owner.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["John Smith", "Jane Doe", "Mike Johnson", "Sarah Wilson"]
    );
    assert_eq!(directory.color_of("John Smith"), Some("#FFB3BA"));
    assert_eq!(directory.color_of("john smith"), None);
}

#[test]
fn load_reads_roster_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create roster file");
    write!(
        file,
        r##"[
            {{"name": "Ana", "color": "#aabbcc"}},
            {{"name": "Bo", "color": "#001122"}}
        ]"##
    )
    .expect("write roster file");

    let directory = OwnerDirectory::load(file.path()).expect("roster should load");
    assert_eq!(directory.len(), 2);
    assert_eq!(directory.find("Bo"), Some(&Owner::new("Bo", "#001122")));
}

#[test]
fn load_reports_missing_file_as_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = OwnerDirectory::load(dir.path().join("owners.json")).unwrap_err();
    assert!(matches!(err, OwnerDirectoryError::Io(_)));
}

#[test]
fn from_json_str_rejects_invalid_rosters() {
    assert!(matches!(
        OwnerDirectory::from_json_str("[]"),
        Err(OwnerDirectoryError::Empty)
    ));
    assert!(matches!(
        OwnerDirectory::from_json_str(r##"[{"name": "  ", "color": "#000000"}]"##),
        Err(OwnerDirectoryError::BlankName)
    ));
    assert!(matches!(
        OwnerDirectory::from_json_str(r#"[{"name": "Ana", "color": "red"}]"#),
        Err(OwnerDirectoryError::InvalidColor { .. })
    ));
    assert!(matches!(
        OwnerDirectory::from_json_str(r#"{"name": "Ana"}"#),
        Err(OwnerDirectoryError::Json(_))
    ));
}
