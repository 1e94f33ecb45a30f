pub mod auth;
pub mod budgets;
pub mod dashboard;
pub mod expenses;
pub mod upload;
