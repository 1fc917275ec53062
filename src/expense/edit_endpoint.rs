//! The route handler for editing an expense.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::db::{ExpenseData, ExpenseId, get_expense, update_expense},
    user::UserID,
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for replacing the fields of an expense by its ID.
///
/// Responds with 204 on success, 404 if there is no expense with the given ID
/// and 403 if the expense belongs to another user.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<ExpenseId>,
    Json(data): Json<ExpenseData>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(error) => return error.into_response(),
    };

    if expense.owner != user_id {
        return Error::Forbidden.into_response();
    }

    match update_expense(expense_id, &data, &connection) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod edit_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, middleware, routing::put};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState,
        auth::auth_guard_api,
        endpoints,
        expense::db::{ExpenseData, create_expense, get_expense},
        routing::test_utils::{log_in, session_cookie_for},
        user::UserID,
    };

    fn get_test_app() -> (TestServer, Arc<Mutex<Connection>>) {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, "42").unwrap();
        let db_connection = state.db_connection.clone();

        let app = Router::new()
            .route(endpoints::EDIT_EXPENSE, put(super::edit_expense_endpoint))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_guard_api,
            ))
            .with_state(state);

        let server = TestServer::new(app);

        (server, db_connection)
    }

    fn insert_expense(db_connection: &Arc<Mutex<Connection>>, owner: UserID) -> crate::expense::Expense {
        let connection = db_connection.lock().unwrap();

        create_expense(
            owner,
            &ExpenseData {
                date: "2024-03-01".to_owned(),
                amount: 9.99,
                category: "groceries".to_owned(),
                description: "weekly shop".to_owned(),
            },
            &connection,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn edit_own_expense_replaces_fields_and_responds_with_204() {
        let (server, db_connection) = get_test_app();
        let session_cookie = log_in(&db_connection);
        let expense = insert_expense(&db_connection, UserID::new(1));

        let response = server
            .put(&endpoints::format_endpoint(
                endpoints::EDIT_EXPENSE,
                expense.id.as_i64(),
            ))
            .add_cookie(session_cookie)
            .json(&json!({
                "date": "2024-04-02",
                "amount": 12.5,
                "category": "transport",
                "description": "train ticket"
            }))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        let connection = db_connection.lock().unwrap();
        let updated = get_expense(expense.id, &connection).unwrap();
        assert_eq!(updated.date, "2024-04-02");
        assert_eq!(updated.amount, 12.5);
        assert_eq!(updated.category, "transport");
        assert_eq!(updated.description, "train ticket");
        assert_eq!(updated.owner, UserID::new(1));
    }

    #[tokio::test]
    async fn edit_missing_expense_responds_with_404() {
        let (server, db_connection) = get_test_app();
        let session_cookie = log_in(&db_connection);

        let response = server
            .put(&endpoints::format_endpoint(endpoints::EDIT_EXPENSE, 42))
            .add_cookie(session_cookie)
            .json(&json!({
                "date": "2024-04-02",
                "amount": 12.5,
                "category": "transport",
                "description": "train ticket"
            }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn edit_other_users_expense_responds_with_403_and_keeps_record() {
        let (server, db_connection) = get_test_app();
        let _ = log_in(&db_connection);
        let expense = insert_expense(&db_connection, UserID::new(1));
        let other_user_cookie = session_cookie_for(&db_connection, "mallory");

        let response = server
            .put(&endpoints::format_endpoint(
                endpoints::EDIT_EXPENSE,
                expense.id.as_i64(),
            ))
            .add_cookie(other_user_cookie)
            .json(&json!({
                "date": "1999-01-01",
                "amount": 0.0,
                "category": "tampered",
                "description": "tampered"
            }))
            .await;

        response.assert_status_forbidden();
        response.assert_text("Unauthorized");
        let connection = db_connection.lock().unwrap();
        assert_eq!(get_expense(expense.id, &connection), Ok(expense));
    }
}
