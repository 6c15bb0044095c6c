use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "Request failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = format!(
            r#"<html>
  <head><title>Error {}</title></head>
  <body>
    <h1>Error {}</h1>
    <p>Internal server error</p>
  </body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
        );

        (status, Html(body)).into_response()
    }
}
