//! The log-in page and the handler that establishes a session.
//! The auth module handles the lower level cookie logic.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::set_auth_cookie,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, log_in_register, text_input},
    user::{User, get_user_by_username},
};

fn log_in_form() -> Markup {
    html! {
        form method="post" action=(endpoints::LOG_IN)
        {
            (text_input("Username", "username", "text"))
            (text_input("Password", "password", "password"))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Log in" }

            p
            {
                "Don't have an account? "

                a href=(endpoints::REGISTER) { "Register here" }
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    let content = log_in_register("Log in", &log_in_form());

    base("Log in", &[], &content).into_response()
}

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered into the log-in form.
///
/// The username and password are stored as plain strings. There is no need
/// for validation here since they are compared against the username and
/// password hash in the database.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Username entered during log-in.
    pub username: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On success a session cookie is set and the client is redirected to the
/// dashboard. An unknown username or a wrong password both produce the plain
/// text "Invalid credentials", with no hint as to which was wrong.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let user: User = match get_user_by_username(
        &user_data.username,
        &state.db_connection.lock().unwrap(),
    ) {
        Ok(user) => user,
        Err(Error::NotFound) => return Error::InvalidCredentials.into_response(),
        Err(error) => return error.into_response(),
    };

    let is_password_valid = match user.password_hash.verify(&user_data.password) {
        Ok(is_password_valid) => is_password_valid,
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return error.into_response();
        }
    };

    if !is_password_valid {
        return Error::InvalidCredentials.into_response();
    }

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            [("location", endpoints::DASHBOARD)],
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting auth cookie: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod log_in_page_tests {
    use axum::http::{StatusCode, header::CONTENT_TYPE};
    use scraper::Html;

    use crate::endpoints;

    use super::get_log_in_page;

    #[tokio::test]
    async fn log_in_page_displays_form() {
        let response = get_log_in_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        let document = Html::parse_document(&text);
        assert!(
            document.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            document.errors
        );

        let form_selector = scraper::Selector::parse("form").unwrap();
        let forms = document.select(&form_selector).collect::<Vec<_>>();
        assert_eq!(forms.len(), 1, "want 1 form, got {}", forms.len());
        let form = forms.first().unwrap();
        assert_eq!(form.value().attr("action"), Some(endpoints::LOG_IN));

        for (type_, id) in [("text", "username"), ("password", "password")] {
            let selector_string = format!("input[type={type_}]#{id}");
            let input_selector = scraper::Selector::parse(&selector_string).unwrap();
            let inputs = form.select(&input_selector).collect::<Vec<_>>();
            assert_eq!(inputs.len(), 1, "want 1 {type_} input, got {}", inputs.len());
        }

        let register_link_selector = scraper::Selector::parse("a[href]").unwrap();
        let links = form.select(&register_link_selector).collect::<Vec<_>>();
        assert_eq!(links.len(), 1, "want 1 link, got {}", links.len());
        assert_eq!(
            links.first().unwrap().value().attr("href"),
            Some(endpoints::REGISTER)
        );
    }
}

#[cfg(test)]
mod log_in_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        auth::COOKIE_SESSION,
        db::initialize,
        endpoints,
        user::create_user,
    };

    use super::{LogInData, LogInState, post_log_in};

    fn get_test_app() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not create tables");
        create_user(
            "alice",
            PasswordHash::new("hunter2", 4).expect("Could not hash test password"),
            &connection,
        )
        .expect("Could not create test user");

        let state = LogInState {
            cookie_key: crate::app_state::create_cookie_key("42"),
            cookie_duration: crate::auth::DEFAULT_COOKIE_DURATION,
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let app = Router::new()
            .route(endpoints::LOG_IN, post(post_log_in))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let server = get_test_app();

        let response = server
            .post(endpoints::LOG_IN)
            .form(&LogInData {
                username: "alice".to_string(),
                password: "hunter2".to_string(),
            })
            .await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::DASHBOARD);
        assert!(
            response.maybe_cookie(COOKIE_SESSION).is_some(),
            "expected a session cookie to be set on log-in"
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_username() {
        let server = get_test_app();

        let response = server
            .post(endpoints::LOG_IN)
            .form(&LogInData {
                username: "mallory".to_string(),
                password: "hunter2".to_string(),
            })
            .await;

        response.assert_status(StatusCode::OK);
        response.assert_text("Invalid credentials");
        assert!(
            response.maybe_cookie(COOKIE_SESSION).is_none(),
            "no session cookie should be set for a failed log-in"
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_incorrect_password() {
        let server = get_test_app();

        let response = server
            .post(endpoints::LOG_IN)
            .form(&LogInData {
                username: "alice".to_string(),
                password: "wrongpassword".to_string(),
            })
            .await;

        response.assert_status(StatusCode::OK);
        response.assert_text("Invalid credentials");
        assert!(
            response.maybe_cookie(COOKIE_SESSION).is_none(),
            "no session cookie should be set for a failed log-in"
        );
    }
}
