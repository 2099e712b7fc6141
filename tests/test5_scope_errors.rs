use std::path::PathBuf;

use sqlite_scope::{DbError, InsertBuilder, Scope, Value};
use tempfile::TempDir;

const SCHEMA: &str = include_str!("sql/rooms_schema.sql");

fn db_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(format!("{name}.sqlite3"))
}

fn seeded(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    Scope::run(path, |scope| {
        scope.execute_script(SCHEMA)?;
        InsertBuilder::table("rooms")
            .values([("code", "abc123"), ("name", "Room"), ("description", "d")])
            .execute_on(scope)?;
        Ok(())
    })?;
    Ok(())
}

fn count_rooms(path: &PathBuf) -> Result<i64, Box<dyn std::error::Error>> {
    let count = Scope::run(path, |scope| {
        scope.execute("SELECT COUNT(*) AS cnt FROM rooms", &[])?;
        scope.fetch_one().expect("count row").int("cnt")
    })?;
    Ok(count)
}

#[test]
fn failed_statement_rolls_back_the_whole_scope() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = db_path(&dir, "rollback");
    seeded(&path)?;

    let mut scope = Scope::open(&path)?;
    InsertBuilder::table("rooms")
        .values([("code", "xyz789"), ("name", "Other"), ("description", "")])
        .execute_on(&mut scope)?;
    let err = scope.execute("SELEKT nonsense", &[]).unwrap_err();
    assert!(matches!(err, DbError::QueryError(_)));
    scope.close()?;

    // The insert that preceded the failure is gone too.
    assert_eq!(count_rooms(&path)?, 1);
    Ok(())
}

#[test]
fn run_propagates_the_closure_error_and_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = db_path(&dir, "run_err");
    seeded(&path)?;

    let result: Result<(), DbError> = Scope::run(&path, |scope| {
        InsertBuilder::table("rooms")
            .values([("code", "xyz789"), ("name", "Other"), ("description", "")])
            .execute_on(scope)?;
        scope.execute("INSERT INTO rooms (code) VALUES", &[])?;
        Ok(())
    });
    assert!(matches!(result, Err(DbError::QueryError(_))));

    assert_eq!(count_rooms(&path)?, 1);
    Ok(())
}

#[test]
fn constraint_violation_surfaces_the_driver_message() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = db_path(&dir, "constraint");
    seeded(&path)?;

    let mut scope = Scope::open(&path)?;
    let err = InsertBuilder::table("rooms")
        .values([("code", "abc123"), ("name", "Dupe"), ("description", "")])
        .execute_on(&mut scope)
        .unwrap_err();
    match &err {
        DbError::QueryError(inner) => {
            assert!(inner.to_string().to_lowercase().contains("unique"), "{inner}");
        }
        other => panic!("expected QueryError, got {other:?}"),
    }
    scope.close()?;
    Ok(())
}

#[test]
fn mid_scope_commit_preserves_earlier_work() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = db_path(&dir, "durable");
    seeded(&path)?;

    let mut scope = Scope::open(&path)?;
    InsertBuilder::table("rooms")
        .values([("code", "keep01"), ("name", "Kept"), ("description", "")])
        .execute_on(&mut scope)?;
    scope.commit()?;
    InsertBuilder::table("rooms")
        .values([("code", "lost01"), ("name", "Lost"), ("description", "")])
        .execute_on(&mut scope)?;
    let _ = scope.execute("SELEKT nonsense", &[]).unwrap_err();
    scope.close()?;

    // Work before the durability point survives the rollback.
    let names = Scope::run(&path, |scope| {
        scope.execute("SELECT code FROM rooms ORDER BY code", &[])?;
        Ok(scope
            .fetch_all()
            .iter()
            .map(|row| row.text("code").map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?)
    })?;
    assert_eq!(names, ["abc123", "keep01"]);
    Ok(())
}

#[test]
fn execute_after_close_is_a_connection_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = db_path(&dir, "closed");
    seeded(&path)?;

    let mut scope = Scope::open(&path)?;
    scope.close()?;
    let err = scope.execute("SELECT 1", &[]).unwrap_err();
    assert!(matches!(err, DbError::ConnectionError(_)));
    Ok(())
}

#[test]
fn opening_an_unreachable_path_is_a_connection_error() {
    let err = Scope::open("/definitely/not/a/real/dir/db.sqlite3").unwrap_err();
    assert!(matches!(err, DbError::ConnectionError(_)));
}

#[test]
fn unbindable_statement_params_fail_as_query_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = db_path(&dir, "arity");
    seeded(&path)?;

    let mut scope = Scope::open(&path)?;
    let err = scope
        .execute(
            "SELECT name FROM rooms WHERE code = ?",
            &[Value::from("abc123"), Value::from("extra")],
        )
        .unwrap_err();
    assert!(matches!(err, DbError::QueryError(_)));
    scope.close()?;
    Ok(())
}
