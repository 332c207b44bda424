// Library root
// -----------
// This crate exposes a small library surface for the account CLI. The
// binary (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `store`: The `users` table in SQLite: account creation, login,
//   personal info, deletion and listing. No terminal IO.
// - `ui`: Terminal menu and prompts; keeps the session and delegates
//   every operation to `store`.
// - `config`: Where the database file lives.
// - `error`: Error type returned by the store.
pub mod config;
pub mod error;
pub mod store;
pub mod ui;

pub use error::{AccountError, AccountResult};
pub use store::{AccountStore, NewAccount, Session, UserRecord, UserSummary};
