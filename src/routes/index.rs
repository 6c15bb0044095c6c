//! Index page: tells the caller which address the request came from.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::client_ip::ClientAddress;
use crate::error::AppError;
use crate::state::AppState;
use crate::templates::render_index;

/// Index page handler.
#[instrument(name = "index::index", skip(state, client))]
pub async fn index(
    State(state): State<AppState>,
    client: ClientAddress,
) -> Result<Html<String>, AppError> {
    let html = render_index(&state.tera, client.as_str())?;
    Ok(Html(html))
}
