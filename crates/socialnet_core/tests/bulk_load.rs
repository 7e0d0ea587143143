use socialnet_core::db::open_db_in_memory;
use socialnet_core::{
    load_statuses_csv, load_statuses_from_reader, load_users_csv, load_users_from_reader,
    LoadError, LoadReport, StatusCollection, UserCollection,
};
use std::fs;

const ACCOUNTS_CSV: &str = "USER_ID,EMAIL,NAME,LASTNAME
evmiles97,eve.miles@uw.edu,Eve,Miles
dave03,david.yuen@gmail.com,David,Yuen
evmiles97,duplicate@uw.edu,Eve,Again
";

const STATUS_CSV: &str = "STATUS_ID,USER_ID,STATUS_TEXT
evmiles97_00001,evmiles97,\"Code is finally compiling\"
dave03_00001,dave03,\"Sunny in Seattle this morning\"
ghost_00001,ghost,\"Nobody owns this\"
evmiles97_00001,evmiles97,\"Duplicate id\"
";

#[test]
fn users_file_loads_and_skips_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.csv");
    fs::write(&path, ACCOUNTS_CSV).unwrap();

    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    let report = load_users_csv(&path, &users).unwrap();
    assert_eq!(
        report,
        LoadReport {
            inserted: 2,
            skipped: 1
        }
    );

    let eve = users.search_user("evmiles97").unwrap().unwrap();
    assert_eq!(eve.email, "eve.miles@uw.edu");
    assert_eq!(eve.user_name, "Eve");
    assert_eq!(eve.user_last_name, "Miles");
}

#[test]
fn status_file_skips_duplicates_and_unknown_owners() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    let statuses = StatusCollection::try_new(&conn).unwrap();
    load_users_from_reader(ACCOUNTS_CSV.as_bytes(), &users).unwrap();

    let report = load_statuses_from_reader(STATUS_CSV.as_bytes(), &statuses).unwrap();
    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 2);

    let first = statuses.search_status("evmiles97_00001").unwrap().unwrap();
    assert_eq!(first.status_text, "Code is finally compiling");
    assert!(statuses.search_status("ghost_00001").unwrap().is_none());
}

#[test]
fn missing_file_is_reported_without_loading() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    let statuses = StatusCollection::try_new(&conn).unwrap();

    let err = load_users_csv(dir.path().join("missing.csv"), &users).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));

    let err = load_statuses_csv(dir.path().join("missing.csv"), &statuses).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn wrong_header_is_a_csv_error() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    let input = "ID,FIRST,LAST\nale314,Audrey,Le\n";
    let err = load_users_from_reader(input.as_bytes(), &users).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
    assert!(users.list_users().unwrap().is_empty());
}

#[test]
fn rows_before_a_malformed_row_stay_loaded() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();

    let input = "USER_ID,NAME,LASTNAME,EMAIL\nale314,Audrey,Le,ale314@uw.edu\nbroken,row\n";
    let err = load_users_from_reader(input.as_bytes(), &users).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
    assert!(users.search_user("ale314").unwrap().is_some());
}

#[test]
fn padded_ids_are_trimmed_but_other_fields_kept() {
    let conn = open_db_in_memory().unwrap();
    let users = UserCollection::try_new(&conn).unwrap();
    let statuses = StatusCollection::try_new(&conn).unwrap();

    let accounts = "USER_ID, NAME ,LASTNAME,EMAIL\n ale314 , Audrey ,Le,ale314@uw.edu \n";
    load_users_from_reader(accounts.as_bytes(), &users).unwrap();
    let audrey = users.search_user("ale314").unwrap().unwrap();
    assert_eq!(audrey.user_name, " Audrey ");
    assert_eq!(audrey.email, "ale314@uw.edu ");

    let rows = "STATUS_ID,USER_ID,STATUS_TEXT\n s1 , ale314 ,  indented text\n";
    let report = load_statuses_from_reader(rows.as_bytes(), &statuses).unwrap();
    assert_eq!(report.inserted, 1);
    let status = statuses.search_status("s1").unwrap().unwrap();
    assert_eq!(status.user_id, "ale314");
    assert_eq!(status.status_text, "  indented text");
}
