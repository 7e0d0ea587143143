//! CSV bulk loading into the user and status collections.
//!
//! # Responsibility
//! - Read `USER_ID,NAME,LASTNAME,EMAIL` and `STATUS_ID,USER_ID,STATUS_TEXT`
//!   files and feed each row to the matching collection.
//!
//! # Invariants
//! - Rows refused by the collection (duplicate key, unknown owner) are
//!   skipped and counted; loading continues.
//! - Each row is committed on its own, so a malformed row aborts the load
//!   but keeps the rows already inserted.
//! - A missing file fails before any row is read.
//! - Only headers and identifier columns are trimmed; names, email and
//!   status text are stored as written.

use crate::model::status::Status;
use crate::model::user::User;
use crate::repo::RepoError;
use crate::service::outcome::Outcome;
use crate::service::status_collection::StatusCollection;
use crate::service::user_collection::UserCollection;
use log::{error, info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug)]
pub enum LoadError {
    /// Input file could not be opened.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Header or row does not match the expected layout.
    Csv(csv::Error),
    /// Storage failed mid-load.
    Repo(RepoError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Csv(err) => write!(f, "malformed csv: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<RepoError> for LoadError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Row counts of one finished load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
}

impl LoadReport {
    fn record<T>(&mut self, outcome: &Outcome<T>) {
        if outcome.succeeded() {
            self.inserted += 1;
        } else {
            self.skipped += 1;
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(rename = "USER_ID")]
    user_id: String,
    #[serde(rename = "NAME")]
    user_name: String,
    #[serde(rename = "LASTNAME")]
    user_last_name: String,
    #[serde(rename = "EMAIL")]
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            row.user_id.trim(),
            row.user_name,
            row.user_last_name,
            row.email,
        )
    }
}

#[derive(Debug, Deserialize)]
struct StatusRow {
    #[serde(rename = "STATUS_ID")]
    status_id: String,
    #[serde(rename = "USER_ID")]
    user_id: String,
    #[serde(rename = "STATUS_TEXT")]
    status_text: String,
}

impl From<StatusRow> for Status {
    fn from(row: StatusRow) -> Self {
        Status::new(row.status_id.trim(), row.user_id.trim(), row.status_text)
    }
}

/// Loads users from a CSV file.
pub fn load_users_csv(
    path: impl AsRef<Path>,
    users: &UserCollection<'_>,
) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    let report = load_users_from_reader(open_input(path)?, users)?;
    info!(
        "event=users_load module=loader status=ok path={} inserted={} skipped={}",
        path.display(),
        report.inserted,
        report.skipped
    );
    Ok(report)
}

/// Loads users from any CSV source with a header row.
pub fn load_users_from_reader(
    input: impl Read,
    users: &UserCollection<'_>,
) -> LoadResult<LoadReport> {
    let mut report = LoadReport::default();
    for row in csv_reader(input).deserialize::<UserRow>() {
        let user = User::from(row?);
        let outcome = users.add_user(&user)?;
        if !outcome.succeeded() {
            warn!(
                "event=users_load module=loader status=skip user_id={}",
                user.user_id
            );
        }
        report.record(&outcome);
    }
    Ok(report)
}

/// Loads statuses from a CSV file. Owners must already exist; rows for
/// unknown users are skipped.
pub fn load_statuses_csv(
    path: impl AsRef<Path>,
    statuses: &StatusCollection<'_>,
) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    let report = load_statuses_from_reader(open_input(path)?, statuses)?;
    info!(
        "event=statuses_load module=loader status=ok path={} inserted={} skipped={}",
        path.display(),
        report.inserted,
        report.skipped
    );
    Ok(report)
}

pub fn load_statuses_from_reader(
    input: impl Read,
    statuses: &StatusCollection<'_>,
) -> LoadResult<LoadReport> {
    let mut report = LoadReport::default();
    for row in csv_reader(input).deserialize::<StatusRow>() {
        let status = Status::from(row?);
        let outcome = statuses.add_status(&status)?;
        if !outcome.succeeded() {
            warn!(
                "event=statuses_load module=loader status=skip status_id={}",
                status.status_id
            );
        }
        report.record(&outcome);
    }
    Ok(report)
}

fn open_input(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| {
        error!(
            "event=load_open module=loader status=error path={} error={source}",
            path.display()
        );
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input)
}
