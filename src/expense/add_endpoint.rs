//! The route handler for creating an expense from the dashboard form.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;

use crate::{
    AppState,
    endpoints,
    expense::db::{ExpenseData, create_expense},
    user::UserID,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct AddExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AddExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating an expense from the dashboard form, responds
/// with a redirect back to the dashboard.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn add_expense_endpoint(
    State(state): State<AddExpenseState>,
    Extension(user_id): Extension<UserID>,
    Form(data): Form<ExpenseData>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match create_expense(user_id, &data, &connection) {
        Ok(_) => Redirect::to(endpoints::DASHBOARD).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod add_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, middleware, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, auth::auth_guard, endpoints, expense::db::get_expenses_by_owner,
        routing::test_utils::log_in, user::UserID,
    };

    fn get_test_app() -> (TestServer, Arc<Mutex<Connection>>) {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, "42").unwrap();
        let db_connection = state.db_connection.clone();

        let app = Router::new()
            .route(endpoints::ADD_EXPENSE, post(super::add_expense_endpoint))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);

        let server = TestServer::new(app);

        (server, db_connection)
    }

    #[tokio::test]
    async fn add_expense_redirects_to_dashboard_and_persists() {
        let (server, db_connection) = get_test_app();
        let session_cookie = log_in(&db_connection);

        let response = server
            .post(endpoints::ADD_EXPENSE)
            .add_cookie(session_cookie)
            .form(&[
                ("date", "2024-03-01"),
                ("amount", "9.99"),
                ("category", "groceries"),
                ("description", "weekly shop"),
            ])
            .await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::DASHBOARD);

        let connection = db_connection.lock().unwrap();
        let expenses = get_expenses_by_owner(UserID::new(1), &connection).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].date, "2024-03-01");
        assert_eq!(expenses[0].amount, 9.99);
    }

    #[tokio::test]
    async fn add_expense_without_session_redirects_to_log_in() {
        let (server, _) = get_test_app();

        let response = server
            .post(endpoints::ADD_EXPENSE)
            .form(&[
                ("date", "2024-03-01"),
                ("amount", "9.99"),
                ("category", "groceries"),
                ("description", "weekly shop"),
            ])
            .await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::LOG_IN);
    }
}
