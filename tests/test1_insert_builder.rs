use sqlite_scope::{DbError, InsertBuilder, Value};

#[test]
fn render_emits_one_placeholder_per_value() -> Result<(), Box<dyn std::error::Error>> {
    let (sql, params) = InsertBuilder::table("rooms")
        .value("code", "abc123")
        .value("name", "Room")
        .value("description", "d")
        .render()?;

    assert_eq!(
        sql,
        "INSERT INTO rooms (code, name, description) VALUES (?, ?, ?)"
    );
    assert_eq!(sql.matches('?').count(), 3);
    assert_eq!(
        params,
        vec![
            Value::Text("abc123".into()),
            Value::Text("Room".into()),
            Value::Text("d".into()),
        ]
    );
    Ok(())
}

#[test]
fn values_accumulates_pairs_in_iteration_order() -> Result<(), Box<dyn std::error::Error>> {
    let (sql, params) = InsertBuilder::table("confessions")
        .values([("token", "t0k3n"), ("room", "abc123"), ("content", "hello")])
        .render()?;

    assert_eq!(
        sql,
        "INSERT INTO confessions (token, room, content) VALUES (?, ?, ?)"
    );
    assert_eq!(
        params,
        vec![
            Value::Text("t0k3n".into()),
            Value::Text("abc123".into()),
            Value::Text("hello".into()),
        ]
    );
    Ok(())
}

#[test]
fn render_without_columns_fails() {
    let err = InsertBuilder::table("rooms").render().unwrap_err();
    assert!(matches!(err, DbError::BuilderError("no columns")));
}

#[test]
fn repeated_column_keeps_position_and_takes_last_value() -> Result<(), Box<dyn std::error::Error>>
{
    let (sql, params) = InsertBuilder::table("t")
        .value("a", 1)
        .value("b", 2)
        .value("a", 9)
        .render()?;

    assert_eq!(sql, "INSERT INTO t (a, b) VALUES (?, ?)");
    assert_eq!(params, vec![Value::Int(9), Value::Int(2)]);
    Ok(())
}

#[test]
fn render_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let builder = InsertBuilder::table("rooms")
        .value("code", "abc123")
        .value("name", "Room");

    let first = builder.render()?;
    let second = builder.render()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn heterogeneous_values_bind_as_parameters() -> Result<(), Box<dyn std::error::Error>> {
    let (sql, params) = InsertBuilder::table("confessions")
        .value("content", "x'); DROP TABLE confessions; --")
        .value("is_visible", true)
        .value("context", Option::<String>::None)
        .render()?;

    // Hostile text stays in the parameter list, never in the statement.
    assert_eq!(
        sql,
        "INSERT INTO confessions (content, is_visible, context) VALUES (?, ?, ?)"
    );
    assert_eq!(
        params,
        vec![
            Value::Text("x'); DROP TABLE confessions; --".into()),
            Value::Bool(true),
            Value::Null,
        ]
    );
    Ok(())
}
