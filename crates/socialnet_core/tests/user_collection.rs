use socialnet_core::db::open_db_in_memory;
use socialnet_core::{ConflictKind, Outcome, Status, StatusCollection, User, UserCollection};

fn audrey() -> User {
    User::new("ale314", "Audrey", "Le", "ale314@uw.edu")
}

#[test]
fn add_then_search_returns_the_same_fields() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    assert_eq!(users.add_user(&audrey()).unwrap(), Outcome::Applied(()));

    let loaded = users.search_user("ale314").unwrap().unwrap();
    assert_eq!(loaded, audrey());
}

#[test]
fn adding_existing_user_fails_and_keeps_original_row() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    assert!(users.add_user(&audrey()).unwrap().succeeded());

    let impostor = User::new("ale314", "Someone", "Else", "other@example.com");
    let outcome = users.add_user(&impostor).unwrap();
    assert!(!outcome.succeeded());
    assert_eq!(outcome, Outcome::Conflict(ConflictKind::DuplicateKey));

    assert_eq!(users.search_user("ale314").unwrap(), Some(audrey()));
}

#[test]
fn search_missing_user_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    assert!(users.search_user("dr.seuss1").unwrap().is_none());
}

#[test]
fn delete_user_reports_missing_and_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    users.add_user(&audrey()).unwrap();

    assert_eq!(users.delete_user("bryce05").unwrap(), Outcome::NotFound);
    assert_eq!(users.delete_user("ale314").unwrap(), Outcome::Applied(0));
    assert!(users.search_user("ale314").unwrap().is_none());
    assert_eq!(users.delete_user("ale314").unwrap(), Outcome::NotFound);
}

#[test]
fn delete_user_cascades_to_statuses() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    let statuses = StatusCollection::try_new(&conn).unwrap();

    users.add_user(&User::new("U1", "Una", "One", "u1@example.com")).unwrap();
    users.add_user(&User::new("U2", "Dos", "Two", "u2@example.com")).unwrap();
    statuses.add_status(&Status::new("S1", "U1", "hello")).unwrap();
    statuses.add_status(&Status::new("S2", "U1", "again")).unwrap();
    statuses.add_status(&Status::new("S3", "U2", "mine")).unwrap();

    assert_eq!(users.delete_user("U1").unwrap(), Outcome::Applied(2));

    assert!(statuses.search_status("S1").unwrap().is_none());
    assert!(statuses.search_status("S2").unwrap().is_none());
    assert_eq!(statuses.delete_status("S1").unwrap(), Outcome::NotFound);
    assert_eq!(
        statuses.update_status_text("S2", "ghost").unwrap(),
        Outcome::NotFound
    );
    assert!(statuses.search_status("S3").unwrap().is_some());
}

#[test]
fn update_email_changes_only_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    users.add_user(&audrey()).unwrap();

    assert_eq!(
        users.update_email("nobody", "nobody@example.com").unwrap(),
        Outcome::NotFound
    );
    assert!(users.search_user("nobody").unwrap().is_none());

    assert!(users
        .update_email("ale314", "audrey.le@uw.edu")
        .unwrap()
        .succeeded());
    let loaded = users.search_user("ale314").unwrap().unwrap();
    assert_eq!(loaded.email, "audrey.le@uw.edu");
    assert_eq!(loaded.user_name, "Audrey");
}

#[test]
fn any_unused_user_id_is_accepted_as_given() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    let spaced = User::new("ale 314", "Audrey", "Le", "ale314@uw.edu");
    let blank = User::new("", "Blank", "Id", "blank@example.com");
    assert_eq!(users.add_user(&spaced).unwrap(), Outcome::Applied(()));
    assert_eq!(users.add_user(&blank).unwrap(), Outcome::Applied(()));

    assert_eq!(users.search_user("ale 314").unwrap(), Some(spaced));
    assert_eq!(users.search_user("").unwrap(), Some(blank));
    assert!(users.search_user("ale314").unwrap().is_none());
}

#[test]
fn list_users_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    users
        .add_user(&User::new("bryce05", "Bryce", "Brown", "bryce05@gmail.com"))
        .unwrap();
    users.add_user(&audrey()).unwrap();

    let ids: Vec<_> = users
        .list_users()
        .unwrap()
        .into_iter()
        .map(|user| user.user_id)
        .collect();
    assert_eq!(ids, vec!["ale314".to_string(), "bryce05".to_string()]);
}
