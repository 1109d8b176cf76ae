mod common;

use common::{Address, FailingReader, Person, TestRecord, original, person};
use patchwork_builder::BuildError;
use patchwork_json::{JsonUpdater, UpdateError};
use std::io::{self, Cursor, Read};

fn updater() -> JsonUpdater {
    JsonUpdater::default()
}

// ── Malformed input ──────────────────────────────────────────────

#[test]
fn type_mismatch_names_field_and_position() {
    let before = original();
    let err = updater()
        .update_from_str(&before, r#"{"id": "not-a-number"}"#)
        .unwrap_err();

    assert!(matches!(err, UpdateError::InvalidField { .. }));
    assert!(err.is_malformed());
    assert_eq!(err.field(), Some("id"));
    let (line, column) = err.position().unwrap();
    assert_eq!(line, 1);
    assert!(column > 0);
    assert_eq!(before, TestRecord::new(1, "1".to_string()));
}

#[test]
fn syntax_error_is_malformed() {
    let err = updater().update_from_str(&original(), r#"{"id": 4"#).unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)));
    assert_eq!(err.field(), None);
}

#[test]
fn missing_value_is_malformed() {
    let err = updater().update_from_str(&original(), r#"{"id": }"#).unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)), "got {err:?}");
    assert_eq!(err.field(), None);
}

#[test]
fn syntax_errors_inside_values_are_malformed() {
    let fragments = [
        r#"{"name": "a\q"}"#,
        r#"{"id": tru}"#,
        r#"{"name": "abc"#,
        r#"{"id": -}"#,
    ];
    for fragment in fragments {
        let err = updater().update_from_str(&original(), fragment).unwrap_err();
        assert!(
            matches!(err, UpdateError::Malformed(_)),
            "fragment {fragment} gave {err:?}"
        );
        assert_eq!(err.field(), None);
        assert!(err.position().is_some());
    }
}

#[test]
fn broken_value_under_ignored_key_is_malformed() {
    let err = updater()
        .update_from_str(&original(), r#"{"color": [1,}"#)
        .unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)), "got {err:?}");
    assert!(!err.to_string().contains("color"));
}

#[test]
fn truncated_string_in_stream_is_malformed() {
    let mut stream = Cursor::new(br#"{"name": "abc"#.to_vec());
    let err = updater()
        .update_from_reader(&original(), &mut stream)
        .unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)), "got {err:?}");
}

#[test]
fn empty_input_is_malformed() {
    let err = updater().update_from_str(&original(), "").unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)));
}

#[test]
fn non_object_fragment_is_malformed() {
    for fragment in ["[1, 2]", "42", "\"id\"", "null", "true"] {
        let err = updater().update_from_str(&original(), fragment).unwrap_err();
        assert!(
            matches!(err, UpdateError::Malformed(_)),
            "fragment {fragment} gave {err:?}"
        );
    }
}

#[test]
fn trailing_characters_are_rejected() {
    let err = updater()
        .update_from_str(&original(), r#"{"id": 2} {"id": 3}"#)
        .unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)));
}

#[test]
fn multi_line_fragment_reports_line() {
    let fragment = "{\n  \"name\": \"x\",\n  \"id\": true\n}";
    let err = updater().update_from_str(&original(), fragment).unwrap_err();
    assert_eq!(err.field(), Some("id"));
    assert_eq!(err.position().map(|(line, _)| line), Some(3));
}

#[test]
fn overflowing_number_is_rejected() {
    let err = updater()
        .update_from_str(&person(), r#"{"age": 300}"#)
        .unwrap_err();
    assert_eq!(err.field(), Some("age"));
}

#[test]
fn value_fragment_errors_have_no_position() {
    let err = updater()
        .update_from_value(&original(), serde_json::json!({"id": "x"}))
        .unwrap_err();
    assert_eq!(err.field(), Some("id"));
    assert_eq!(err.position(), None);
}

// ── I/O ──────────────────────────────────────────────────────────

#[test]
fn failing_stream_surfaces_io_error() {
    let err = updater()
        .update_from_reader(&original(), &mut FailingReader)
        .unwrap_err();

    match err {
        UpdateError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn stream_failing_mid_value_is_io_error() {
    let mut stream = Cursor::new(br#"{"id": 4"#.to_vec()).chain(FailingReader);
    let err = updater()
        .update_from_reader(&original(), &mut stream)
        .unwrap_err();
    assert!(matches!(err, UpdateError::Io(_)));
    assert!(!err.is_malformed());
}

#[test]
fn truncated_stream_is_malformed() {
    let mut stream = Cursor::new(br#"{"id": 4"#.to_vec());
    let err = updater()
        .update_from_reader(&original(), &mut stream)
        .unwrap_err();
    assert!(matches!(err, UpdateError::Malformed(_)));
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn validation_failure_propagates_unchanged() {
    let err = updater()
        .update_from_str(&person(), r#"{"age": 12}"#)
        .unwrap_err();

    match err {
        UpdateError::Build(BuildError::Validation { rule, .. }) => assert_eq!(rule, "adult"),
        other => panic!("expected build error, got {other:?}"),
    }
}

#[test]
fn rejected_record_never_reaches_the_updater() {
    let minor = Person::new(
        "Kit".to_string(),
        12,
        None,
        vec![],
        Address {
            city: "Leeds".to_string(),
            zip: "LS1".to_string(),
        },
        0.0,
    );
    assert!(matches!(minor, Err(BuildError::Validation { .. })));

    let adult = person();
    let same = updater().update_from_str(&adult, "{}").unwrap();
    assert_eq!(same, adult);
}

#[test]
fn build_error_display_is_transparent() {
    let err = updater()
        .update_from_str(&person(), r#"{"age": 12}"#)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation rule `adult` violated: age must be at least 18"
    );
}

// ── Display ──────────────────────────────────────────────────────

#[test]
fn invalid_field_display_names_field() {
    let err = updater()
        .update_from_str(&original(), r#"{"id": "x"}"#)
        .unwrap_err();
    assert!(err.to_string().starts_with("invalid value for field `id`: "));
}

#[test]
fn malformed_display_has_prefix() {
    let err = updater().update_from_str(&original(), "{").unwrap_err();
    assert!(err.to_string().starts_with("malformed JSON fragment: "));
}

#[test]
fn errors_expose_source_chain() {
    use std::error::Error as _;

    let err = updater()
        .update_from_str(&original(), r#"{"id": "x"}"#)
        .unwrap_err();
    assert!(err.source().is_some());
}
