use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page client: upload form, progress states, and results.
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
