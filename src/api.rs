//! REST client for the expense-tracking backend. Every request carries
//! the session cookie; responses are dispatched on their declared
//! content type and failures are logged before being returned.

use gloo_console::error;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::RequestCredentials;

use crate::filters::ExpenseFilters;
use crate::format;
use crate::models::{
    AuthCheck, BudgetPayload, BudgetsResponse, ComparisonData, DashboardData,
    ExpenseDetail, ExpensePayload, ExpensesResponse, SeriesData, UploadOutcome,
};

const API_BASE: &str = "/api";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; carries the backend's `error` message when one
    /// was supplied.
    #[error("{0}")]
    Backend(String),
    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<JsValue> for ApiError {
    fn from(err: JsValue) -> Self {
        ApiError::Network(format!("{:?}", err))
    }
}

fn url(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

fn get(path: &str) -> RequestBuilder {
    Request::get(&url(path)).credentials(RequestCredentials::Include)
}

fn post(path: &str) -> RequestBuilder {
    Request::post(&url(path)).credentials(RequestCredentials::Include)
}

fn put(path: &str) -> RequestBuilder {
    Request::put(&url(path)).credentials(RequestCredentials::Include)
}

fn delete(path: &str) -> RequestBuilder {
    Request::delete(&url(path)).credentials(RequestCredentials::Include)
}

/// Pulls the backend's error message out of a failed response, falling
/// back to a generic one when the body is missing or unparseable.
async fn error_message(response: Response) -> String {
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(|msg| msg.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "Request failed".to_string())
}

/// JSON dispatch: parse on success, surface the backend message on failure.
async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        Ok(response.json::<T>().await?)
    } else {
        Err(ApiError::Backend(error_message(response).await))
    }
}

/// Observability only; the error still goes to the caller.
fn log_failure<T>(result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(err) = &result {
        error!("API request failed:", err.to_string());
    }
    result
}

async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder.send().await?;
    json_body(response).await
}

async fn send_json<T: DeserializeOwned, B: Serialize>(
    builder: RequestBuilder,
    body: &B,
) -> Result<T, ApiError> {
    let response = builder.json(body)?.send().await?;
    json_body(response).await
}

// ---- Auth ----

pub async fn register(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<serde_json::Value, ApiError> {
    let body = serde_json::json!({
        "username": username,
        "email": email,
        "password": password,
        "confirm_password": confirm_password,
    });
    log_failure(send_json(post("/auth/register"), &body).await)
}

pub async fn login(username: &str, password: &str) -> Result<serde_json::Value, ApiError> {
    let body = serde_json::json!({ "username": username, "password": password });
    log_failure(send_json(post("/auth/login"), &body).await)
}

pub async fn logout() -> Result<serde_json::Value, ApiError> {
    log_failure(fetch_json(post("/auth/logout")).await)
}

pub async fn check_auth() -> Result<AuthCheck, ApiError> {
    log_failure(fetch_json(get("/auth/check")).await)
}

// ---- Dashboard ----

pub async fn get_dashboard() -> Result<DashboardData, ApiError> {
    log_failure(fetch_json(get("/dashboard")).await)
}

// ---- Expenses ----

pub async fn get_expenses(filters: &ExpenseFilters) -> Result<ExpensesResponse, ApiError> {
    let pairs = filters.query_pairs();
    let builder = get("/expenses").query(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    log_failure(fetch_json(builder).await)
}

pub async fn get_expense(id: i64) -> Result<ExpenseDetail, ApiError> {
    log_failure(fetch_json(get(&format!("/expenses/{}", id))).await)
}

pub async fn create_expense(expense: &ExpensePayload) -> Result<serde_json::Value, ApiError> {
    log_failure(send_json(post("/expenses"), expense).await)
}

pub async fn update_expense(
    id: i64,
    expense: &ExpensePayload,
) -> Result<serde_json::Value, ApiError> {
    log_failure(send_json(put(&format!("/expenses/{}", id)), expense).await)
}

pub async fn delete_expense(id: i64) -> Result<serde_json::Value, ApiError> {
    log_failure(fetch_json(delete(&format!("/expenses/{}", id))).await)
}

// ---- Budgets ----

pub async fn get_budgets() -> Result<BudgetsResponse, ApiError> {
    log_failure(fetch_json(get("/budgets")).await)
}

pub async fn create_budget(budget: &BudgetPayload) -> Result<serde_json::Value, ApiError> {
    log_failure(send_json(post("/budgets"), budget).await)
}

// ---- Charts ----

pub async fn get_category_chart() -> Result<SeriesData, ApiError> {
    log_failure(fetch_json(get("/charts/category")).await)
}

pub async fn get_monthly_chart() -> Result<SeriesData, ApiError> {
    log_failure(fetch_json(get("/charts/monthly")).await)
}

pub async fn get_comparison_chart() -> Result<ComparisonData, ApiError> {
    log_failure(fetch_json(get("/charts/category-monthly")).await)
}

// ---- Upload ----

/// Multipart upload; the body stays a `FormData` so the transport sets
/// its own boundary.
pub async fn upload_csv(file: &web_sys::File) -> Result<UploadOutcome, ApiError> {
    let form = web_sys::FormData::new()?;
    form.append_with_blob("file", file)?;
    let response = post("/upload").body(form)?.send().await?;
    log_failure(json_body(response).await)
}

// ---- Export ----

/// Downloads the CSV export. The success payload is always a binary
/// blob, so this skips the JSON dispatch and synthesizes a client-side
/// download named `expenses_<YYYY-MM-DD>.csv`.
pub async fn export_expenses() -> Result<(), ApiError> {
    let result = async {
        let response = get("/export").send().await?;
        if !response.ok() {
            return Err(ApiError::Backend(error_message(response).await));
        }
        let bytes = response.binary().await?;
        trigger_download(&bytes, &format::export_filename(&format::today()))?;
        Ok(())
    }
    .await;
    log_failure(result)
}

/// Clicks a transient anchor pointing at an object URL, then releases
/// the URL.
fn trigger_download(bytes: &[u8], filename: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let object_url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement =
        document.create_element("a")?.unchecked_into();
    anchor.set_href(&object_url);
    anchor.set_download(filename);
    if let Some(body) = document.body() {
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
    }
    web_sys::Url::revoke_object_url(&object_url)?;
    Ok(())
}
