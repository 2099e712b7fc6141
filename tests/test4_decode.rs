use std::sync::Arc;

use sqlite_scope::{DbError, FromRow, Record, Value};

fn confession_record() -> Record {
    Record::new(
        Arc::new(vec![
            "id".to_string(),
            "content".to_string(),
            "created_at".to_string(),
        ]),
        vec![
            Value::Int(7),
            Value::Text("hello".into()),
            Value::Text("2024-01-01".into()),
        ],
    )
}

#[derive(Debug, PartialEq)]
struct Confession {
    id: i64,
    content: String,
    created_at: String,
}

impl FromRow for Confession {
    fn from_row(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.int("id")?,
            content: record.text("content")?.to_string(),
            created_at: record.text("created_at")?.to_string(),
        })
    }
}

#[derive(Debug)]
struct RevocableConfession {
    id: i64,
    token: String,
}

impl FromRow for RevocableConfession {
    fn from_row(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.int("id")?,
            token: record.text("token")?.to_string(),
        })
    }
}

#[test]
fn decode_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let confession: Confession = confession_record().decode()?;
    assert_eq!(
        confession,
        Confession {
            id: 7,
            content: "hello".into(),
            created_at: "2024-01-01".into(),
        }
    );
    Ok(())
}

#[test]
fn decode_missing_field_fails_naming_the_field() {
    let err = confession_record()
        .decode::<RevocableConfession>()
        .unwrap_err();
    match err {
        DbError::DecodeError(message) => assert!(message.contains("token"), "{message}"),
        other => panic!("expected DecodeError, got {other:?}"),
    }
}

#[test]
fn extra_columns_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    struct ContentOnly {
        content: String,
    }
    impl FromRow for ContentOnly {
        fn from_row(record: &Record) -> Result<Self, DbError> {
            Ok(Self {
                content: record.text("content")?.to_string(),
            })
        }
    }

    let narrow: ContentOnly = confession_record().decode()?;
    assert_eq!(narrow.content, "hello");
    Ok(())
}

#[test]
fn missing_column_is_field_not_found_but_null_is_a_value() {
    let record = Record::new(
        Arc::new(vec!["context".to_string()]),
        vec![Value::Null],
    );

    let err = record.get("ipaddress").unwrap_err();
    assert!(matches!(err, DbError::FieldNotFound(ref col) if col == "ipaddress"));

    let value = record.get("context").expect("present column");
    assert!(value.is_null());
}

#[test]
fn type_mismatch_is_a_decode_error() {
    let record = confession_record();
    let err = record.int("content").unwrap_err();
    assert!(matches!(err, DbError::DecodeError(_)));
}

#[test]
fn bool_and_timestamp_coerce_from_sqlite_storage() -> Result<(), Box<dyn std::error::Error>> {
    let record = Record::new(
        Arc::new(vec!["is_visible".to_string(), "created_at".to_string()]),
        vec![Value::Int(1), Value::Text("2024-01-01 08:00:01".into())],
    );

    assert!(record.bool("is_visible")?);
    let ts = record.timestamp("created_at")?;
    assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-01 08:00:01");
    Ok(())
}

#[test]
fn columns_keep_statement_order() {
    let record = confession_record();
    assert_eq!(record.columns(), ["id", "content", "created_at"]);
    assert_eq!(record.get_by_index(1), Some(&Value::Text("hello".into())));
}
