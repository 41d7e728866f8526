use tickerlink_core::directory::{Directory, DirectoryError};
use tickerlink_core::model::CompanyRecord;

#[test]
fn parse_keeps_file_order_and_trims_fields() {
    let directory = Directory::parse(
        r#"[
            // JSON5 comments are allowed
            { code: "9984", name: " ソフトバンクグループ " },
            { code: "7203", name: "トヨタ自動車" },
        ]"#,
    )
    .unwrap();

    let codes: Vec<&str> = directory
        .records()
        .iter()
        .map(|record| record.code.as_str())
        .collect();
    assert_eq!(codes, ["9984", "7203"]);
    assert_eq!(directory.get("9984").unwrap().name, "ソフトバンクグループ");
}

#[test]
fn duplicate_codes_are_rejected() {
    let result = Directory::from_records(vec![
        CompanyRecord::new("7203", "トヨタ自動車"),
        CompanyRecord::new("7203", "トヨタ"),
    ]);
    assert!(matches!(result, Err(DirectoryError::DuplicateCode(code)) if code == "7203"));
}

#[test]
fn blank_fields_are_rejected() {
    let result = Directory::parse(r#"[{ code: "7203", name: "トヨタ自動車" }, { code: "9984", name: "  " }]"#);
    assert!(matches!(result, Err(DirectoryError::BlankField { index: 1 })));
}

#[test]
fn malformed_file_is_a_parse_error() {
    assert!(matches!(
        Directory::parse("[{ code: "),
        Err(DirectoryError::Parse(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json5");
    let error = Directory::load(&path).unwrap_err();
    assert!(matches!(error, DirectoryError::Read { .. }));
    assert!(error.to_string().contains("absent.json5"));
}

#[test]
fn load_reads_directory_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.json5");
    std::fs::write(&path, r#"[{ "code": "6758", "name": "ソニーグループ" }]"#).unwrap();

    let directory = Directory::load(&path).unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.get("6758").unwrap().name, "ソニーグループ");
}
