//! The dashboard page: an expense entry form and the user's expense history.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState,
    endpoints,
    expense::Expense,
    html::{
        BUTTON_PRIMARY_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, text_input,
    },
    user::{UserID, get_user_by_id},
};

/// The state needed to render the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for fetching the user and their expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn add_expense_form() -> Markup {
    html! {
        form method="post" action=(endpoints::ADD_EXPENSE) id="expense-form"
        {
            (text_input("Date", "date", "date"))
            (text_input("Amount", "amount", "number"))
            (text_input("Category", "category", "text"))
            (text_input("Description", "description", "text"))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add expense" }
        }
    }
}

fn expense_table(expenses: &[Expense]) -> Markup {
    html! {
        table id="expense-table"
        {
            thead
            {
                tr class=(TABLE_HEADER_STYLE)
                {
                    th { "Date" }
                    th { "Amount" }
                    th { "Category" }
                    th { "Description" }
                    th { "" }
                }
            }

            tbody
            {
                @for expense in expenses
                {
                    tr
                        class=(TABLE_ROW_STYLE)
                        data-expense-id=(expense.id)
                        data-delete-url=(endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id.as_i64()))
                        data-edit-url=(endpoints::format_endpoint(endpoints::EDIT_EXPENSE, expense.id.as_i64()))
                        data-date=(expense.date)
                        data-amount=(expense.amount)
                        data-category=(expense.category)
                        data-description=(expense.description)
                    {
                        td class=(TABLE_CELL_STYLE) { (expense.date) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                        td class=(TABLE_CELL_STYLE) { (expense.category) }
                        td class=(TABLE_CELL_STYLE) { (expense.description) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            button type="button" class="row-edit" { "Edit" }
                            button type="button" class="row-delete" { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

/// A route handler for displaying the dashboard page.
///
/// Expenses are listed by the date string descending, so the most recent
/// ISO formatted date comes first.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let user = match get_user_by_id(user_id, &connection) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    let expenses = match crate::expense::db::get_expenses_by_owner(user_id, &connection) {
        Ok(expenses) => expenses,
        Err(error) => return error.into_response(),
    };

    let content = html! {
        header class="dashboard-header"
        {
            h1 { "Hello, " (user.username) "!" }

            a href=(endpoints::LOG_OUT) { "Log out" }
        }

        main
        {
            section { (add_expense_form()) }

            section { (expense_table(&expenses)) }
        }
    };

    base("Dashboard", &["/static/dashboard.js"], &content).into_response()
}
