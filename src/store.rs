// Account store: every read and write against the `users` table goes
// through here. Each call opens its own SQLite connection, does its work
// inside a transaction and drops the connection before returning, so
// there is no long-lived handle to manage.
//
// Nothing in this module prints or prompts; the `ui` module owns all of
// the terminal interaction.

use crate::error::{AccountError, AccountResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the `users` table.
///
/// `first_visit` is kept as the stored text (`YYYY-MM-DD` for rows this
/// store wrote). Passwords are stored and compared in clear text.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub tel: String,
    pub location_preference: String,
    pub chocolate_preference: String,
    pub first_visit: String,
    pub password: String,
}

/// Fields needed to open a new account. The id is assigned by SQLite.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub tel: String,
    pub location_preference: String,
    pub chocolate_preference: String,
    pub first_visit: NaiveDate,
    pub password: String,
}

/// The `(id, name, email)` projection returned by `list_users`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A logged-in user. Holds a snapshot of the row taken at login time;
/// later changes to the table are not reflected here.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: UserRecord,
}

impl Session {
    pub fn user(&self) -> &UserRecord {
        &self.user
    }
}

/// Read a TEXT column that may hold NULL; NULL reads as "".
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

impl UserRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(UserRecord {
            id: row.get(0)?,
            name: text_column(row, 1)?,
            email: text_column(row, 2)?,
            address: text_column(row, 3)?,
            city: text_column(row, 4)?,
            tel: text_column(row, 5)?,
            location_preference: text_column(row, 6)?,
            chocolate_preference: text_column(row, 7)?,
            first_visit: text_column(row, 8)?,
            password: text_column(row, 9)?,
        })
    }
}

/// Handle to the SQLite file holding the `users` table.
#[derive(Clone, Debug)]
pub struct AccountStore {
    db_path: PathBuf,
}

impl AccountStore {
    /// Point the store at a database file. Nothing is opened until
    /// `initialize` or another operation runs.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        AccountStore {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection, creating the parent directory if needed.
    fn connect(&self) -> AccountResult<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.db_path)?;
        Ok(conn)
    }

    /// Create the `users` table if it is missing. Safe to call repeatedly.
    pub fn initialize(&self) -> AccountResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                email TEXT UNIQUE,
                address TEXT,
                city TEXT,
                tel TEXT,
                location_preference TEXT,
                chocolate_preference TEXT,
                first_visit TEXT,
                password TEXT
            )",
            [],
        )?;
        tx.commit()?;
        debug!(path = %self.db_path.display(), "users table ready");
        Ok(())
    }

    /// Insert a new account and return the id SQLite assigned to it.
    pub fn create_account(&self, account: &NewAccount) -> AccountResult<i64> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let first_visit = account.first_visit.format(DATE_FORMAT).to_string();
        debug!(email = %account.email, first_visit = %first_visit, "inserting account");
        tx.execute(
            "INSERT INTO users (name, email, address, city, tel, location_preference,
                                chocolate_preference, first_visit, password)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                account.name,
                account.email,
                account.address,
                account.city,
                account.tel,
                account.location_preference,
                account.chocolate_preference,
                first_visit,
                account.password,
            ],
        )
        .map_err(|e| {
            let err = AccountError::from_insert(e, &account.email);
            if matches!(err, AccountError::DuplicateEmail(_)) {
                info!(email = %account.email, "account already exists");
            }
            err
        })?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        info!(id, email = %account.email, "account created");
        Ok(id)
    }

    /// Look up an exact (email, password) match. Returns `None` when no row
    /// matches; the caller keeps whatever session it already had.
    pub fn login(&self, email: &str, password: &str) -> AccountResult<Option<Session>> {
        debug!(email, "looking up credentials");
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let result = tx.query_row(
            "SELECT id, name, email, address, city, tel, location_preference,
                    chocolate_preference, first_visit, password
             FROM users WHERE email = ?1 AND password = ?2",
            params![email, password],
            UserRecord::from_row,
        );
        let user = match result {
            Ok(user) => Some(user),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };
        tx.commit()?;

        match user {
            Some(user) => {
                info!(id = user.id, "login succeeded");
                Ok(Some(Session { user }))
            }
            None => {
                info!(email, "login failed");
                Ok(None)
            }
        }
    }

    /// Return the logged-in user's details.
    pub fn view_personal_info<'a>(
        &self,
        session: Option<&'a Session>,
    ) -> AccountResult<&'a UserRecord> {
        session
            .map(Session::user)
            .ok_or(AccountError::NotAuthenticated)
    }

    /// Delete the logged-in user's account.
    ///
    /// Both confirmation fields must equal the session's email and
    /// password. The row is only removed when `confirm` is "yes" (ignoring
    /// case and surrounding whitespace), in which case the session is
    /// cleared and `true` is returned. Any other answer leaves everything
    /// as it was and returns `false`.
    pub fn delete_account(
        &self,
        session: &mut Option<Session>,
        confirm_email: &str,
        confirm_password: &str,
        confirm: &str,
    ) -> AccountResult<bool> {
        let email = {
            let user = session
                .as_ref()
                .map(Session::user)
                .ok_or(AccountError::NotAuthenticated)?;
            if confirm_email != user.email || confirm_password != user.password {
                return Err(AccountError::CredentialMismatch);
            }
            user.email.clone()
        };

        if confirm.trim().to_lowercase() != "yes" {
            debug!(email = %email, "account deletion cancelled");
            return Ok(false);
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM users WHERE email = ?1", params![email])?;
        tx.commit()?;
        *session = None;
        info!(email = %email, removed, "account deleted");
        Ok(true)
    }

    /// All accounts as `(id, name, email)`, in SQLite's natural order.
    pub fn list_users(&self) -> AccountResult<Vec<UserSummary>> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let users = {
            let mut stmt = tx.prepare("SELECT id, name, email FROM users")?;
            let rows = stmt.query_map([], |row| {
                Ok(UserSummary {
                    id: row.get(0)?,
                    name: text_column(row, 1)?,
                    email: text_column(row, 2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        tx.commit()?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }
}
