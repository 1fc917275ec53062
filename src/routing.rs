//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_api},
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        add_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_expenses_endpoint, sync_expenses_endpoint,
    },
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    not_found::get_404_not_found,
    register::{get_register_page, register_user},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::REGISTER,
            get(get_register_page).post(register_user),
        )
        .route(endpoints::LOG_IN, get(get_log_in_page).post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out));

    let protected_page_routes = Router::new()
        .route(endpoints::DASHBOARD, get(get_dashboard_page))
        .route(endpoints::ADD_EXPENSE, post(add_expense_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes are called from scripts with fetch, so failed auth gets a
    // 401 instead of a redirect.
    let protected_api_routes = Router::new()
        .route(endpoints::SYNC, post(sync_expenses_endpoint))
        .route(endpoints::EXPENSES_API, get(get_expenses_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .route(endpoints::EDIT_EXPENSE, put(edit_expense_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_api));

    protected_page_routes
        .merge(protected_api_routes)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the log-in page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LOG_IN)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::sync::{Arc, Mutex};

    use axum::{http::header::SET_COOKIE, response::IntoResponse};
    use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        app_state::create_cookie_key,
        auth::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
        user::{UserID, create_user},
    };

    /// The cookie secret most router tests build their [crate::AppState] with.
    pub const TEST_COOKIE_SECRET: &str = "42";

    /// Register the user "alice" and return a session cookie for them.
    ///
    /// Assumes an empty user table, making "alice" user 1.
    pub fn log_in(db_connection: &Arc<Mutex<Connection>>) -> Cookie<'static> {
        session_cookie_for(db_connection, "alice")
    }

    /// Register `username` and return a session cookie for them.
    pub fn session_cookie_for(
        db_connection: &Arc<Mutex<Connection>>,
        username: &str,
    ) -> Cookie<'static> {
        let user = {
            let connection = db_connection.lock().unwrap();
            create_user(username, PasswordHash::new_unchecked("hunter2"), &connection)
                .expect("Could not create test user")
        };

        session_cookie(user.id)
    }

    fn session_cookie(user_id: UserID) -> Cookie<'static> {
        let jar = PrivateCookieJar::new(create_cookie_key(TEST_COOKIE_SECRET));
        let jar = set_auth_cookie(jar, user_id, DEFAULT_COOKIE_DURATION)
            .expect("Could not create session cookie");

        let response = jar.into_response();
        let header = response
            .headers()
            .get(SET_COOKIE)
            .expect("want a set-cookie header for the session cookie")
            .to_str()
            .expect("cookie header should be valid UTF-8")
            .to_owned();

        Cookie::parse_encoded(header)
            .expect("could not parse set-cookie header")
            .into_owned()
    }
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_log_in() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::LOG_IN);
    }
}
