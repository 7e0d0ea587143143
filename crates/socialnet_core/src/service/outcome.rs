//! Result kinds of collection write operations.

use crate::repo::{ConflictKind, RepoError, RepoResult};

/// What happened to one collection write.
///
/// `Err(RepoError)` is reserved for environment failures; every expected
/// business condition lands in one of these variants instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The write was committed.
    Applied(T),
    /// No row with the requested key exists.
    NotFound,
    /// The store refused the insert. A duplicate key and an unknown owner
    /// both report `succeeded() == false`; the kind tells them apart.
    Conflict(ConflictKind),
}

impl<T> Outcome<T> {
    /// Boolean view of the outcome used by the shell and bulk loader.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }

    /// Sorts a repository result into an outcome, passing through only
    /// environment errors.
    pub(crate) fn from_repo(result: RepoResult<T>) -> RepoResult<Self> {
        match result {
            Ok(value) => Ok(Self::Applied(value)),
            Err(RepoError::NotFound { .. }) => Ok(Self::NotFound),
            Err(RepoError::Conflict { kind, .. }) => Ok(Self::Conflict(kind)),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;
    use crate::db::DbError;
    use crate::repo::{ConflictKind, RepoError};

    #[test]
    fn only_applied_counts_as_success() {
        assert!(Outcome::Applied(()).succeeded());
        assert!(!Outcome::<()>::NotFound.succeeded());
        assert!(!Outcome::<()>::Conflict(ConflictKind::UnknownOwner).succeeded());
    }

    #[test]
    fn from_repo_keeps_environment_errors() {
        let err = RepoError::Db(DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        });
        assert!(Outcome::<()>::from_repo(Err(err)).is_err());

        let conflict = RepoError::Conflict {
            entity: "user",
            id: "ale314".to_string(),
            kind: ConflictKind::DuplicateKey,
        };
        assert_eq!(
            Outcome::<()>::from_repo(Err(conflict)).unwrap(),
            Outcome::Conflict(ConflictKind::DuplicateKey)
        );
    }
}
