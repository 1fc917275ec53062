//! Expense records and the route handlers that create, list, edit, delete
//! and bulk-sync them.

mod add_endpoint;
mod api_endpoint;
pub mod db;
mod delete_endpoint;
mod edit_endpoint;
mod sync_endpoint;

pub use add_endpoint::add_expense_endpoint;
pub use api_endpoint::get_expenses_endpoint;
pub use db::{Expense, create_expense_table};
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use sync_endpoint::sync_expenses_endpoint;
