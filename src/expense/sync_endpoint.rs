//! The bulk upload endpoint used by the dashboard script to push expenses
//! that were recorded while offline.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState,
    expense::db::{ExpenseData, create_expense},
    user::UserID,
};

/// The state needed to sync expenses.
#[derive(Debug, Clone)]
pub struct SyncExpensesState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SyncExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// One expense in a sync upload.
///
/// Missing fields fall back to empty or zero values and unknown fields such
/// as client-side IDs are ignored, so partially formed offline records still
/// upload.
#[derive(Debug, Deserialize)]
pub struct SyncRecord {
    #[serde(default)]
    date: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
}

/// A route handler that inserts each uploaded record as a new expense owned
/// by the authenticated user.
///
/// Records are not deduplicated, so uploading the same batch twice stores
/// every record twice. Insertion failures are logged and skipped, and the
/// response does not report them.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn sync_expenses_endpoint(
    State(state): State<SyncExpensesState>,
    Extension(user_id): Extension<UserID>,
    Json(records): Json<Vec<SyncRecord>>,
) -> Json<Value> {
    let connection = state.db_connection.lock().unwrap();

    for record in records {
        let data = ExpenseData {
            date: record.date,
            amount: record.amount,
            category: record.category,
            description: record.description,
        };

        if let Err(error) = create_expense(user_id, &data, &connection) {
            tracing::error!("Could not insert synced expense for user {user_id}: {error}");
        }
    }

    Json(json!({"status": "success"}))
}
