use serde::{Deserialize, Serialize};

/// The enumerated expense categories the forms offer. The list filter
/// instead derives its options from the loaded result set.
pub const CATEGORIES: [&str; 10] = [
    "Food",
    "Transport",
    "Entertainment",
    "Rent",
    "Utilities",
    "Shopping",
    "Travel",
    "Health",
    "Education",
    "Other",
];

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

/// Body for create/update; the backend assigns the id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct ExpensesResponse {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct ExpenseDetail {
    pub expense: Expense,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: f64,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct BudgetPayload {
    pub category: String,
    pub amount: f64,
}

/// Budget plus the backend-derived view fields. Everything here is
/// computed server-side and rendered verbatim.
#[derive(Clone, PartialEq, Deserialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    #[serde(default)]
    pub is_over: bool,
    #[serde(default)]
    pub is_warning: bool,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct BudgetsResponse {
    #[serde(default)]
    pub budgets: Vec<BudgetStatus>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct BudgetAlert {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    #[serde(default)]
    pub is_over: bool,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct DashboardData {
    pub this_week: Option<f64>,
    pub last_week: Option<f64>,
    #[serde(default)]
    pub week_change: f64,
    pub monthly_total: Option<f64>,
    #[serde(default)]
    pub budget_alerts: Vec<BudgetAlert>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recent_expenses: Vec<Expense>,
}

/// Aggregate payload for the pie and line charts.
#[derive(Clone, PartialEq, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Aggregate payload for the current-vs-previous-month bar chart.
#[derive(Clone, PartialEq, Deserialize)]
pub struct ComparisonData {
    pub labels: Vec<String>,
    pub current: Vec<f64>,
    pub previous: Vec<f64>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct AuthCheck {
    pub authenticated: bool,
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct UploadOutcome {
    pub imported_count: u32,
    #[serde(default)]
    pub error_count: u32,
}
