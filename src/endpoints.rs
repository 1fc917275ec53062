//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/delete-expense/{expense_id}',
//! use [format_endpoint].

/// The root route which redirects to the log in page.
pub const ROOT: &str = "/";
/// The route for the registration page and registration requests.
pub const REGISTER: &str = "/register";
/// The route for the log in page and log in requests.
pub const LOG_IN: &str = "/login";
/// The route for logging out the current user.
pub const LOG_OUT: &str = "/logout";
/// The landing page for logged in users, listing their expenses.
pub const DASHBOARD: &str = "/dashboard";
/// The route for creating a single expense from the dashboard form.
pub const ADD_EXPENSE: &str = "/add_expense";
/// The route for bulk-inserting offline-collected expenses.
pub const SYNC: &str = "/sync";
/// The route for listing the current user's expenses as JSON.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route for deleting an expense.
pub const DELETE_EXPENSE: &str = "/delete-expense/{expense_id}";
/// The route for replacing an expense's fields.
pub const EDIT_EXPENSE: &str = "/edit-expense/{expense_id}";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/edit-expense/{expense_id}',
/// '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
