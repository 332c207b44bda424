// UI layer: provides a simple interactive menu using `dialoguer`.
// The session lives here as a plain `Option<Session>` and is handed to
// the store on every call that needs it.

use crate::store::{AccountStore, NewAccount, Session, UserRecord, UserSummary};
use anyhow::Result;
use chrono::Local;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main interactive menu. Runs until the user chooses "Exit".
///
/// Store errors are printed and the loop continues; only terminal IO
/// errors end the program.
pub fn main_menu(store: &AccountStore) -> Result<()> {
    let mut session: Option<Session> = None;
    loop {
        let items = vec![
            "Open new account",
            "Login",
            "View personal information",
            "Delete account",
            "List users",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_open_account(store)?,
            1 => {
                let result = handle_login(store)?;
                apply_login(&mut session, result);
            }
            2 => match store.view_personal_info(session.as_ref()) {
                Ok(user) => print_personal_info(user),
                Err(e) => println!("Error: {}", e),
            },
            3 => handle_delete_account(store, &mut session)?,
            4 => match store.list_users() {
                Ok(users) => print_users(&users),
                Err(e) => println!("Error: {}", e),
            },
            5 => break,
            _ => {}
        }
        println!();
    }
    Ok(())
}

/// Replace the session after a successful login. A failed login keeps
/// any session we already had.
fn apply_login(session: &mut Option<Session>, result: Option<Session>) {
    if let Some(s) = result {
        *session = Some(s);
    }
}

/// Collect the account fields and create the account with today's date
/// as the first visit.
fn handle_open_account(store: &AccountStore) -> Result<()> {
    println!("*** Open new account ***");
    let name = text("What is your name?")?;
    let email = text("What is your email?")?;
    let address = text("What is your address?")?;
    let city = text("What is your city?")?;
    let tel = text("What is your phone number?")?;
    let location_preference = text("What is your location preference?")?;
    let chocolate_preference = text("What is your chocolate preference?")?;
    let password: String = Password::new()
        .with_prompt("What is the password you want to use for the account?")
        .interact()?;

    let account = NewAccount {
        name,
        email,
        address,
        city,
        tel,
        location_preference,
        chocolate_preference,
        first_visit: Local::now().date_naive(),
        password,
    };

    let spinner = spinner("Creating account...")?;
    let result = store.create_account(&account);
    spinner.finish_and_clear();

    match result {
        Ok(id) => println!("Your new account ID is: {}", id),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

/// Ask for credentials and try to log in.
fn handle_login(store: &AccountStore) -> Result<Option<Session>> {
    println!("*** User Login ***");
    let email = text("Enter your email")?;
    let password: String = Password::new().with_prompt("Enter your password").interact()?;

    match store.login(&email, &password) {
        Ok(Some(session)) => {
            println!("Login successful! Welcome, {}", session.user().name);
            Ok(Some(session))
        }
        Ok(None) => {
            println!("Error: Incorrect email or password!");
            Ok(None)
        }
        Err(e) => {
            println!("Error: {}", e);
            Ok(None)
        }
    }
}

fn handle_delete_account(store: &AccountStore, session: &mut Option<Session>) -> Result<()> {
    if session.is_none() {
        println!("Error: You must be logged in to delete your account!");
        return Ok(());
    }
    let email = text("Confirm your email")?;
    let password: String = Password::new().with_prompt("Confirm your password").interact()?;
    let confirm = text("Are you sure you want to delete your account? (yes/no)")?;

    let spinner = spinner("Deleting account...")?;
    let result = store.delete_account(session, &email, &password, &confirm);
    spinner.finish_and_clear();

    match result {
        Ok(true) => println!("Your account has been deleted successfully."),
        Ok(false) => println!("Account deletion cancelled."),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn print_personal_info(user: &UserRecord) {
    println!("\n*** Personal Information ***");
    println!("Name: {}", user.name);
    println!("Email: {}", user.email);
    println!("Address: {}", user.address);
    println!("City: {}", user.city);
    println!("Phone Number: {}", user.tel);
    println!("Location Preference: {}", user.location_preference);
    println!("Chocolate Preference: {}", user.chocolate_preference);
    println!("First Visit: {}", user.first_visit);
}

fn print_users(users: &[UserSummary]) {
    if users.is_empty() {
        println!("No registered users found.");
        return;
    }
    println!("\n*** Registered Users ***");
    for u in users {
        println!("ID: {}, Name: {}, Email: {}", u.id, u.name, u.email);
    }
}

/// Free-text prompt. Empty answers are accepted.
fn text(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Spinner shown while the store is busy writing.
fn spinner(msg: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
