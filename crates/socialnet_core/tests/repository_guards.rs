use socialnet_core::db::migrations::latest_version;
use socialnet_core::db::open_db_in_memory;
use socialnet_core::{
    ConflictKind, RepoError, SqliteStatusRepository, SqliteUserRepository, Status,
    StatusRepository, User, UserCollection, UserRepository,
};
use rusqlite::Connection;

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteUserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_statuses_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE users (
            user_id TEXT PRIMARY KEY NOT NULL,
            user_name TEXT NOT NULL,
            user_last_name TEXT NOT NULL,
            email TEXT NOT NULL
        );
        PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqliteStatusRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("statuses"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE users (
            user_id TEXT PRIMARY KEY NOT NULL,
            user_name TEXT NOT NULL
        );
        PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqliteUserRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "users",
            column: "user_last_name"
        })
    ));
}

#[test]
fn collection_rejects_connection_with_foreign_keys_off() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();

    assert!(matches!(
        UserCollection::try_new(&conn),
        Err(RepoError::ForeignKeysDisabled)
    ));
}

#[test]
fn repositories_report_semantic_errors() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let statuses = SqliteStatusRepository::try_new(&conn).unwrap();

    let user = User::new("ale314", "Audrey", "Le", "ale314@uw.edu");
    users.insert_user(&user).unwrap();

    let err = users.insert_user(&user).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Conflict {
            entity: "user",
            kind: ConflictKind::DuplicateKey,
            ..
        }
    ));

    let err = statuses
        .insert_status(&Status::new("s1", "ghost", "boo"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Conflict {
            entity: "status",
            kind: ConflictKind::UnknownOwner,
            ..
        }
    ));

    let err = users.update_email("ghost", "x@example.com").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "user", .. }));
    assert_eq!(err.to_string(), "user not found: ghost");

    statuses
        .insert_status(&Status::new("s1", "ale314", "hi"))
        .unwrap();
    assert_eq!(statuses.count_statuses_for_user("ale314").unwrap(), 1);
}
