//! Numbered text menu over the user and status collections.
//!
//! # Invariants
//! - Each menu action calls exactly one collection or loader operation.
//! - Expected failures print a message and keep the loop running; only I/O
//!   and storage errors end it.
//! - End of input exits cleanly.

use log::{debug, error};
use socialnet_core::{
    load_statuses_csv, load_users_csv, ConflictKind, LoadError, LoadReport, Outcome, RepoError,
    Status, StatusCollection, User, UserCollection,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

const MENU_TEXT: &str = "1. Add user
2. Search user
3. Delete user
4. Update email
5. Add status
6. Search status
7. Delete status
8. Update status text
9. Load user data to database
10. Load status data to database
11. List users
12. List statuses of a user
13. Exit
Enter option: ";

#[derive(Debug)]
pub enum ShellError {
    Io(io::Error),
    Repo(RepoError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Repo(err) => write!(f, "storage failed: {err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddUser,
    SearchUser,
    DeleteUser,
    UpdateEmail,
    AddStatus,
    SearchStatus,
    DeleteStatus,
    UpdateStatusText,
    LoadUsers,
    LoadStatuses,
    ListUsers,
    ListStatuses,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => Self::AddUser,
            "2" => Self::SearchUser,
            "3" => Self::DeleteUser,
            "4" => Self::UpdateEmail,
            "5" => Self::AddStatus,
            "6" => Self::SearchStatus,
            "7" => Self::DeleteStatus,
            "8" => Self::UpdateStatusText,
            "9" => Self::LoadUsers,
            "10" => Self::LoadStatuses,
            "11" => Self::ListUsers,
            "12" => Self::ListStatuses,
            "13" => Self::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Interactive loop reading from `input` and writing to `output`.
pub struct Shell<'a, R, W> {
    users: &'a UserCollection<'a>,
    statuses: &'a StatusCollection<'a>,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        users: &'a UserCollection<'a>,
        statuses: &'a StatusCollection<'a>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            users,
            statuses,
            input,
            output,
        }
    }

    /// Runs until the user picks Exit or input ends.
    pub fn run(&mut self) -> ShellResult<()> {
        loop {
            let Some(line) = self.prompt(MENU_TEXT)? else {
                return Ok(());
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Did not understand input")?;
                continue;
            };
            debug!("event=menu_choice module=cli status=ok choice={choice:?}");
            if choice == MenuChoice::Exit {
                return Ok(());
            }
            if !self.dispatch(choice)? {
                return Ok(());
            }
        }
    }

    /// Returns `false` when input ended in the middle of an action.
    fn dispatch(&mut self, choice: MenuChoice) -> ShellResult<bool> {
        match choice {
            MenuChoice::AddUser => self.add_user(),
            MenuChoice::SearchUser => self.search_user(),
            MenuChoice::DeleteUser => self.delete_user(),
            MenuChoice::UpdateEmail => self.update_email(),
            MenuChoice::AddStatus => self.add_status(),
            MenuChoice::SearchStatus => self.search_status(),
            MenuChoice::DeleteStatus => self.delete_status(),
            MenuChoice::UpdateStatusText => self.update_status_text(),
            MenuChoice::LoadUsers => self.load_users(),
            MenuChoice::LoadStatuses => self.load_statuses(),
            MenuChoice::ListUsers => self.list_users().map(|()| true),
            MenuChoice::ListStatuses => self.list_statuses(),
            MenuChoice::Exit => Ok(false),
        }
    }

    fn add_user(&mut self) -> ShellResult<bool> {
        let Some(fields) = self.prompt_all(&[
            "User ID: ",
            "User email: ",
            "User name: ",
            "User last name: ",
        ])?
        else {
            return Ok(false);
        };
        let [user_id, email, user_name, user_last_name] = fields;
        let user = User::new(user_id.trim(), user_name, user_last_name, email);

        match self.users.add_user(&user)? {
            Outcome::Applied(()) => writeln!(self.output, "User was successfully added")?,
            Outcome::Conflict(_) => writeln!(
                self.output,
                "{} already exists in the database!",
                user.user_id
            )?,
            Outcome::NotFound => {
                writeln!(self.output, "An error occurred while trying to add new user")?
            }
        }
        Ok(true)
    }

    fn search_user(&mut self) -> ShellResult<bool> {
        let Some(user_id) = self.prompt_field("Enter user ID to search: ")? else {
            return Ok(false);
        };
        match self.users.search_user(&user_id)? {
            Some(user) => {
                writeln!(self.output, "User ID: {}", user.user_id)?;
                writeln!(self.output, "Email: {}", user.email)?;
                writeln!(self.output, "Name: {}", user.user_name)?;
                writeln!(self.output, "Last name: {}", user.user_last_name)?;
            }
            None => writeln!(self.output, "ERROR: User does not exist")?,
        }
        Ok(true)
    }

    fn delete_user(&mut self) -> ShellResult<bool> {
        let Some(user_id) = self.prompt_field("Enter the user_id of the user to delete: ")? else {
            return Ok(false);
        };
        match self.users.delete_user(&user_id)? {
            Outcome::Applied(0) => writeln!(self.output, "Removed {user_id}")?,
            Outcome::Applied(cascaded) => writeln!(
                self.output,
                "Removed {user_id} and {cascaded} status message(s)"
            )?,
            _ => writeln!(self.output, "Failed to remove {user_id}. Does not exist!")?,
        }
        Ok(true)
    }

    fn update_email(&mut self) -> ShellResult<bool> {
        let Some([user_id, email]) = self.prompt_all(&[
            "Enter the user_id of the user whose information you wish to update: ",
            "Enter their new email address: ",
        ])?
        else {
            return Ok(false);
        };
        let user_id = user_id.trim();
        if self.users.update_email(user_id, &email)?.succeeded() {
            writeln!(self.output, "{user_id}'s new email is now {email}")?;
        } else {
            writeln!(self.output, "Failed to update to {email}")?;
        }
        Ok(true)
    }

    fn add_status(&mut self) -> ShellResult<bool> {
        let Some([user_id, status_id, status_text]) =
            self.prompt_all(&["User ID: ", "Status ID: ", "Status text: "])?
        else {
            return Ok(false);
        };
        let status = Status::new(status_id.trim(), user_id.trim(), status_text);

        match self.statuses.add_status(&status)? {
            Outcome::Applied(()) => writeln!(self.output, "New status was successfully added")?,
            Outcome::Conflict(ConflictKind::UnknownOwner) => writeln!(
                self.output,
                "Doh! Did you forget to add {} as a user beforehand?",
                status.user_id
            )?,
            Outcome::Conflict(ConflictKind::DuplicateKey) => writeln!(
                self.output,
                "{} already exists in the database!",
                status.status_id
            )?,
            Outcome::NotFound => writeln!(
                self.output,
                "An error occurred while trying to add new status"
            )?,
        }
        Ok(true)
    }

    fn search_status(&mut self) -> ShellResult<bool> {
        let Some(status_id) = self.prompt_field("Enter a status_id to search for status: ")? else {
            return Ok(false);
        };
        match self.statuses.search_status(&status_id)? {
            Some(status) => writeln!(
                self.output,
                "{} from {} has status(es): {}.",
                status.status_id, status.user_id, status.status_text
            )?,
            None => writeln!(self.output, "{status_id} was not found")?,
        }
        Ok(true)
    }

    fn delete_status(&mut self) -> ShellResult<bool> {
        let Some(status_id) =
            self.prompt_field("Enter the status_id of the status to delete: ")?
        else {
            return Ok(false);
        };
        if self.statuses.delete_status(&status_id)?.succeeded() {
            writeln!(self.output, "Status was successfully deleted")?;
        } else {
            writeln!(
                self.output,
                "An error occurred while trying to delete status"
            )?;
        }
        Ok(true)
    }

    fn update_status_text(&mut self) -> ShellResult<bool> {
        let Some([status_id, status_text]) = self.prompt_all(&[
            "Enter the status_id of the status you wish to update: ",
            "Enter a new status text: ",
        ])?
        else {
            return Ok(false);
        };
        let status_id = status_id.trim();
        if self
            .statuses
            .update_status_text(status_id, &status_text)?
            .succeeded()
        {
            writeln!(self.output, "{status_id}'s new status is now {status_text}")?;
        } else {
            writeln!(self.output, "Failed to update {status_id}")?;
        }
        Ok(true)
    }

    fn load_users(&mut self) -> ShellResult<bool> {
        let Some(path) = self.prompt_field("Enter filename of user file: ")? else {
            return Ok(false);
        };
        let result = load_users_csv(&path, self.users);
        self.report_load("user", result)?;
        Ok(true)
    }

    fn load_statuses(&mut self) -> ShellResult<bool> {
        let Some(path) = self.prompt_field("Enter filename for status file: ")? else {
            return Ok(false);
        };
        let result = load_statuses_csv(&path, self.statuses);
        self.report_load("status", result)?;
        Ok(true)
    }

    fn report_load(
        &mut self,
        kind: &str,
        result: Result<LoadReport, LoadError>,
    ) -> ShellResult<()> {
        match result {
            Ok(report) => writeln!(
                self.output,
                "Loaded {} {kind} record(s), skipped {}",
                report.inserted, report.skipped
            )?,
            Err(LoadError::Repo(err)) => return Err(err.into()),
            Err(err) => {
                error!("event=load module=cli status=error kind={kind} error={err}");
                writeln!(self.output, "Detailed error message: {err}")?;
            }
        }
        Ok(())
    }

    fn list_users(&mut self) -> ShellResult<()> {
        let users = self.users.list_users()?;
        if users.is_empty() {
            writeln!(self.output, "No users")?;
        }
        for user in users {
            writeln!(
                self.output,
                "{}: {} {} <{}>",
                user.user_id, user.user_name, user.user_last_name, user.email
            )?;
        }
        Ok(())
    }

    fn list_statuses(&mut self) -> ShellResult<bool> {
        let Some(user_id) = self.prompt_field("Enter user ID: ")? else {
            return Ok(false);
        };
        let statuses = self.statuses.list_statuses_for_user(&user_id)?;
        if statuses.is_empty() {
            writeln!(self.output, "No statuses for {user_id}")?;
        }
        for status in statuses {
            writeln!(self.output, "{}: {}", status.status_id, status.status_text)?;
        }
        Ok(true)
    }

    /// Prompts for an identifier-like field; surrounding whitespace dropped.
    fn prompt_field(&mut self, label: &str) -> ShellResult<Option<String>> {
        Ok(self.prompt(label)?.map(|value| value.trim().to_string()))
    }

    fn prompt_all<const N: usize>(
        &mut self,
        labels: &[&str; N],
    ) -> ShellResult<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(value) => *slot = value,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    /// Writes `label` and reads one line without its line terminator.
    /// `None` means end of input.
    fn prompt(&mut self, label: &str) -> ShellResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
