//! Code for creating the expense table and the expense CRUD operations.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, user::UserID};

/// A newtype wrapper for integer expense IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Create a new expense ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the expense ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An expense record owned by a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The expense's ID in the application database.
    pub id: ExpenseId,
    /// The user that created the expense. Only this user may read, edit or
    /// delete it.
    pub owner: UserID,
    /// The date the expense occurred, as entered by the client. The string is
    /// stored verbatim with no format validation.
    pub date: String,
    /// The amount spent. No sign or range validation is performed.
    pub amount: f64,
    /// Free-text category, e.g. "groceries".
    pub category: String,
    /// Free-text description.
    pub description: String,
}

/// The client-supplied fields of an expense, used for creation and for full
/// replacement on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    /// The date the expense occurred. Stored verbatim.
    pub date: String,
    /// The amount spent.
    pub amount: f64,
    /// Free-text category.
    pub category: String,
    /// Free-text description.
    pub description: String,
}

/// Create the expense table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES user(id),
                date TEXT,
                amount REAL,
                category TEXT,
                description TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new expense into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn create_expense(
    owner: UserID,
    data: &ExpenseData,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (user_id, date, amount, category, description) \
        VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            owner.as_i64(),
            &data.date,
            data.amount,
            &data.category,
            &data.description,
        ),
    )?;

    let id = ExpenseId::new(connection.last_insert_rowid());

    Ok(Expense {
        id,
        owner,
        date: data.date.clone(),
        amount: data.amount,
        category: data.category.clone(),
        description: data.description.clone(),
    })
}

/// Get the expense from the database with an ID equal to `id`.
///
/// # Errors
///
/// Returns a [Error::NotFound] if there is no expense with the given ID, or
/// a [Error::SqlError] if an SQL related error occurred.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "SELECT id, user_id, date, amount, category, description \
            FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id.as_i64())], map_expense_row)
        .map_err(|error| error.into())
}

/// Get all expenses owned by `owner`, ordered by the date column descending.
///
/// The date column is TEXT, so the ordering is a literal byte-wise string
/// comparison, not a calendar sort. Zero-padded ISO dates ("2024-03-01")
/// therefore sort chronologically, but formats like "3/1/2024" do not.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_expenses_by_owner(
    owner: UserID,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, date, amount, category, description \
            FROM expense WHERE user_id = :user_id ORDER BY date DESC",
        )?
        .query_map(&[(":user_id", &owner.as_i64())], map_expense_row)?
        .map(|row| row.map_err(|error| error.into()))
        .collect()
}

type RowsAffected = usize;

/// Replace the date, amount, category and description of the expense with ID
/// `id`.
///
/// Returns the number of rows affected; zero means there is no expense with
/// the given ID.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn update_expense(
    id: ExpenseId,
    data: &ExpenseData,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE expense SET date = ?1, amount = ?2, category = ?3, description = ?4 \
            WHERE id = ?5",
            (
                &data.date,
                data.amount,
                &data.category,
                &data.description,
                id.as_i64(),
            ),
        )
        .map_err(|error| error.into())
}

/// Delete the expense with ID `id`.
///
/// Returns the number of rows affected; zero means there is no expense with
/// the given ID.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id.as_i64())])
        .map_err(|error| error.into())
}

fn map_expense_row(row: &rusqlite::Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: ExpenseId::new(row.get(0)?),
        owner: UserID::new(row.get(1)?),
        date: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
    })
}
