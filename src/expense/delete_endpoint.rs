//! The route handler for deleting an expense.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::db::{ExpenseId, delete_expense, get_expense},
    user::UserID,
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense by its ID.
///
/// Responds with 204 on success, 404 if there is no expense with the given ID
/// and 403 if the expense belongs to another user.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(error) => return error.into_response(),
    };

    if expense.owner != user_id {
        return Error::Forbidden.into_response();
    }

    match delete_expense(expense_id, &connection) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, middleware, routing::delete};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, Error,
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
            .route(
                endpoints::DELETE_EXPENSE,
                delete(super::delete_expense_endpoint),
            )
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
    async fn delete_own_expense_responds_with_204() {
        let (server, db_connection) = get_test_app();
        let session_cookie = log_in(&db_connection);
        let expense = insert_expense(&db_connection, UserID::new(1));

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::DELETE_EXPENSE,
                expense.id.as_i64(),
            ))
            .add_cookie(session_cookie)
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        let connection = db_connection.lock().unwrap();
        assert_eq!(get_expense(expense.id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn delete_missing_expense_responds_with_404() {
        let (server, db_connection) = get_test_app();
        let session_cookie = log_in(&db_connection);

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::DELETE_EXPENSE, 42))
            .add_cookie(session_cookie)
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_twice_responds_with_404_the_second_time() {
        let (server, db_connection) = get_test_app();
        let session_cookie = log_in(&db_connection);
        let expense = insert_expense(&db_connection, UserID::new(1));
        let url = endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id.as_i64());

        server
            .delete(&url)
            .add_cookie(session_cookie.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&url)
            .add_cookie(session_cookie)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_other_users_expense_responds_with_403_and_keeps_record() {
        let (server, db_connection) = get_test_app();
        let _ = log_in(&db_connection);
        let expense = insert_expense(&db_connection, UserID::new(1));
        let other_user_cookie = session_cookie_for(&db_connection, "mallory");

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::DELETE_EXPENSE,
                expense.id.as_i64(),
            ))
            .add_cookie(other_user_cookie)
            .await;

        response.assert_status_forbidden();
        response.assert_text("Unauthorized");
        let connection = db_connection.lock().unwrap();
        assert_eq!(get_expense(expense.id, &connection), Ok(expense));
    }
}
