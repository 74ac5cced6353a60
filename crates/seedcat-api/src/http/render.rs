//! `POST /`: render a submitted provenance document as an image.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use seedcat_prov::{ImageFormat, ProvDocument, ProvError, render_document};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::http::errors::ApiError;
use crate::state::ApiState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RenderQuery {
    pub(crate) format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    #[serde(default)]
    prov: Option<Value>,
}

fn reject(err: &ProvError) -> ApiError {
    let problem = ApiError::from(err);
    if err.is_client_error() {
        warn!(error = %err.detail(), "rejected render request");
    } else {
        error!(error = %err.detail(), "graph rendering failed");
    }
    problem
}

fn parse_request(body: &[u8]) -> Result<ProvDocument, ProvError> {
    let request: RenderRequest =
        serde_json::from_slice(body).map_err(|source| ProvError::Json { source })?;
    match request.prov {
        Some(value) => ProvDocument::from_value(&value),
        None => Ok(ProvDocument::default()),
    }
}

pub(crate) async fn render_graph(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<RenderQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(value) => value.parse::<ImageFormat>().map_err(|err| reject(&err))?,
        None => ImageFormat::Png,
    };
    let document = parse_request(&body).map_err(|err| reject(&err))?;

    let image = render_document(state.renderer.as_ref(), &document, format, state.options)
        .await
        .map_err(|err| reject(&err))?;

    info!(
        format = %format,
        elements = document.elements.len(),
        relations = document.relations.len(),
        bytes = image.len(),
        "rendered provenance graph"
    );
    Ok(([(CONTENT_TYPE, format.content_type())], image).into_response())
}
