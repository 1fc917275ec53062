//! Session authentication: token cookies and the middleware guards that
//! check them.

mod cookie;
mod middleware;
mod token;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use middleware::{auth_guard, auth_guard_api};

#[cfg(test)]
pub use cookie::COOKIE_SESSION;

#[cfg(test)]
pub use middleware::AuthState;
