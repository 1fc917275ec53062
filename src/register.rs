//! The registration page and the handler that creates new user accounts.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, PasswordHash,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, log_in_register, text_input},
    user::create_user,
};

fn registration_form() -> Markup {
    html! {
        form method="post" action=(endpoints::REGISTER)
        {
            (text_input("Username", "username", "text"))
            (text_input("Password", "password", "password"))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Register" }

            p
            {
                "Already have an account? "

                a href=(endpoints::LOG_IN) { "Log in here" }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let content = log_in_register("Register", &registration_form());

    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The raw data entered into the registration form.
#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    /// The username for the new account. Must not be taken already.
    pub username: String,
    /// The plaintext password. Hashed before it is stored.
    pub password: String,
}

/// Handler for registration requests via the POST method.
///
/// On success the client is redirected to the log-in page. If the username is
/// taken the response is the plain text "User already exists".
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let password_hash = match PasswordHash::new(&user_data.password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("An error occurred while hashing a password: {error}");
            return error.into_response();
        }
    };

    let connection = state.db_connection.lock().unwrap();

    match create_user(&user_data.username, password_hash, &connection) {
        Ok(_) => Redirect::to(endpoints::LOG_IN).into_response(),
        Err(error) => error.into_response(),
    }
}
