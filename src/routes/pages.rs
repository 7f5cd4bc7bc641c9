use axum::response::Html;

/// The upload page, embedded at compile time so the binary is self-contained.
static INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the main HTML page
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
