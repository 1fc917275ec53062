//! Creates the application database schema.

use rusqlite::Connection;

use crate::{expense::create_expense_table, user::create_user_table};

/// Create the tables for the domain models if they do not already exist.
///
/// # Errors
///
/// Returns a [rusqlite::Error] if any of the SQL queries failed.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_user_table(connection)?;
    create_expense_table(connection)?;

    Ok(())
}
