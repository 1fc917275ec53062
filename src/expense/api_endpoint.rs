//! The JSON listing endpoint used by the dashboard script.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState,
    expense::db::{Expense, get_expenses_by_owner},
    user::UserID,
};

/// The state needed to list a user's expenses.
#[derive(Debug, Clone)]
pub struct ExpensesApiState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON representation of an expense. The owner is implied by the session
/// and not included.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    id: i64,
    date: String,
    amount: f64,
    category: String,
    description: String,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.as_i64(),
            date: expense.date,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
        }
    }
}

/// A route handler that responds with the authenticated user's expenses as a
/// JSON array, ordered by the date string descending.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_expenses_endpoint(
    State(state): State<ExpensesApiState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match get_expenses_by_owner(user_id, &connection) {
        Ok(expenses) => {
            let response: Vec<ExpenseResponse> =
                expenses.into_iter().map(ExpenseResponse::from).collect();

            Json(response).into_response()
        }
        Err(error) => error.into_response(),
    }
}
