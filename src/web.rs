//! Form-based web interface for `jobhound serve`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use parking_lot::Mutex as SyncMutex;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use jobhound_config::Config;
use jobhound_core::{
    CsvWriter, DriverLauncher, ExportError, JobSearch, ResultSet, SearchError, SearchQuery,
    COLUMNS, DEFAULT_LOCATION,
};

/// Upper bound on the number of results one form submission may request.
const MAX_COUNT: usize = 200;

const DEFAULT_TERM: &str = "Business Analyst";

/// Shared state for the web handlers.
pub(crate) struct WebState {
    launcher: Arc<dyn DriverLauncher>,
    config: Config,
    /// Held for the whole of a search; one browser at a time.
    lock: Mutex<()>,
    /// Last rendered result, keyed by its form query, so the CSV download
    /// serves the rows the user saw.
    last: SyncMutex<Option<(String, ResultSet)>>,
}

impl WebState {
    pub(crate) fn new(launcher: Arc<dyn DriverLauncher>, config: Config) -> Self {
        Self {
            launcher,
            config,
            lock: Mutex::new(()),
            last: SyncMutex::new(None),
        }
    }

    fn remember(&self, key: String, results: &ResultSet) {
        *self.last.lock() = Some((key, results.clone()));
    }

    fn recall(&self, key: &str) -> Option<ResultSet> {
        self.last
            .lock()
            .as_ref()
            .filter(|(k, _)| k == key)
            .map(|(_, results)| results.clone())
    }
}

/// Query string submitted by the search form.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchForm {
    #[serde(default)]
    term: String,
    #[serde(default)]
    location: String,
    count: Option<String>,
    /// HTML checkboxes are sent only when checked.
    headless: Option<String>,
}

/// Failures a handler turns into an error page.
#[derive(Debug)]
pub(crate) enum WebError {
    BadRequest(String),
    Search(SearchError),
    Export(ExportError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            WebError::Search(SearchError::InvalidQuery(m)) => (StatusCode::BAD_REQUEST, m),
            WebError::Search(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            WebError::Export(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        let body = format!(
            r#"<div class="panel error"><strong>Search failed:</strong> {}</div>"#,
            escape_html(&message)
        );
        (status, Html(page("Error", &body))).into_response()
    }
}

/// Create the Axum router for the search form.
pub(crate) fn router(state: Arc<WebState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/search", get(search_page))
        .route("/search.csv", get(search_csv))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_index() -> Html<String> {
    Html(page("Job Search", &search_form(&SearchForm::default())))
}

async fn search_page(
    State(state): State<Arc<WebState>>,
    Query(form): Query<SearchForm>,
) -> Result<Html<String>, WebError> {
    let results = run_search(&state, &form).await?;
    state.remember(form_query(&form), &results);

    let mut body = search_form(&form);
    if results.is_empty() {
        body.push_str(
            r#"<div class="panel warning">No jobs found. Try different terms or increase number of results.</div>"#,
        );
    } else {
        body.push_str(&format!(
            r#"<p class="summary">Found {} jobs. <a href="/search.csv?{}">Download CSV</a></p>"#,
            results.len(),
            escape_html(&form_query(&form))
        ));
        body.push_str(&results_table(&results));
    }
    Ok(Html(page("Job Search Results", &body)))
}

async fn search_csv(
    State(state): State<Arc<WebState>>,
    Query(form): Query<SearchForm>,
) -> Result<Response, WebError> {
    let key = form_query(&form);
    let results = match state.recall(&key) {
        Some(results) => {
            debug!("Serving CSV from the last rendered search");
            results
        }
        None => {
            let results = run_search(&state, &form).await?;
            state.remember(key, &results);
            results
        }
    };
    let bytes = CsvWriter::to_bytes(&results).map_err(WebError::Export)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"jobs.csv\""),
        ],
        bytes,
    )
        .into_response())
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<WebState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "busy": state.lock.try_lock().is_err(),
        })
        .to_string(),
    )
}

async fn run_search(state: &WebState, form: &SearchForm) -> Result<ResultSet, WebError> {
    let count = parse_count(form.count.as_deref(), state.config.search.default_count)?;
    let query = SearchQuery::new(&form.term, &form.location, count).map_err(WebError::Search)?;

    let mut config = state.config.clone();
    config.browser.headless = form.headless.is_some();

    let _guard = state.lock.lock().await;
    info!(
        "Web search '{}' in '{}' for {} results",
        query.term(),
        query.location(),
        query.target_count()
    );
    JobSearch::new(state.launcher.clone(), &config)
        .search(&query)
        .await
        .map_err(|e| {
            warn!("Web search failed: {}", e);
            WebError::Search(e)
        })
}

/// A blank count means the default; anything else must be in `1..=200`.
fn parse_count(raw: Option<&str>, default: usize) -> Result<usize, WebError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(default);
    }
    match raw.parse::<usize>() {
        Ok(n) if (1..=MAX_COUNT).contains(&n) => Ok(n),
        _ => Err(WebError::BadRequest(format!(
            "Number of results must be between 1 and {MAX_COUNT}, got '{raw}'"
        ))),
    }
}

fn form_query(form: &SearchForm) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer
        .append_pair("term", &form.term)
        .append_pair("location", &form.location)
        .append_pair("count", form.count.as_deref().unwrap_or_default());
    if form.headless.is_some() {
        serializer.append_pair("headless", "on");
    }
    serializer.finish()
}

fn search_form(form: &SearchForm) -> String {
    let submitted = !form.term.is_empty() || form.count.is_some();
    let term = if submitted { form.term.as_str() } else { DEFAULT_TERM };
    let location = if form.location.is_empty() {
        DEFAULT_LOCATION
    } else {
        form.location.as_str()
    };
    let count = form
        .count
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("50");
    let checked = if !submitted || form.headless.is_some() {
        " checked"
    } else {
        ""
    };

    format!(
        r#"<form class="search" action="/search" method="get">
    <label>Job Search Term <input type="text" name="term" value="{}" required></label>
    <label>Location <input type="text" name="location" value="{}"></label>
    <label>Number of Results <input type="number" name="count" min="1" max="{}" step="1" value="{}"></label>
    <label><input type="checkbox" name="headless"{}> Run browser headless</label>
    <button type="submit">Search Jobs</button>
</form>
"#,
        escape_html(term),
        escape_html(location),
        MAX_COUNT,
        escape_html(count),
        checked
    )
}

fn results_table(results: &ResultSet) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{column}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for record in results {
        let row = record.to_row();
        html.push_str("<tr>");
        for cell in &row[..4] {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        if row[4].is_empty() {
            html.push_str("<td></td>");
        } else {
            let link = escape_html(&row[4]);
            html.push_str(&format!(
                r#"<td><a href="{link}" target="_blank" rel="noopener">{link}</a></td>"#
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - jobhound</title>
    <style>{STYLE}</style>
</head>
<body>
<h1>Job Search</h1>
{body}
</body>
</html>"#
    )
}

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 2rem; color: #222; }
form.search { display: flex; flex-wrap: wrap; gap: 1rem; align-items: flex-end; margin-bottom: 1.5rem; }
form.search label { display: flex; flex-direction: column; font-size: 0.9rem; }
.panel { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }
.warning { background: #fff4d6; border: 1px solid #e0b400; }
.error { background: #fde2e2; border: 1px solid #d93025; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border-bottom: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f3f3f3; }
"#;

/// Escape text for HTML element content and double-quoted attributes.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod tests;
