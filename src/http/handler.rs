use crate::http::error::{resolve_correlation_id, ErrorResponse, CORRELATION_ID};
use crate::http::AppState;
use crate::utils::error::ApiError;
use axum::extract::{Query, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

// ID must contain up to 3 letters then numbers.
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{1,3}[0-9]+$").expect("valid id pattern"));

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub id: Option<String>,
}

pub async fn get_info(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<InfoQuery>,
) -> Result<Response, ErrorResponse> {
    let correlation_id =
        resolve_correlation_id(headers.get(&CORRELATION_ID).and_then(|v| v.to_str().ok()));
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let path = uri.path().to_string();

    tracing::info!(correlation_id = %correlation_id, "request received");

    let fail = |error: ApiError| {
        ErrorResponse::new(error, correlation_id.clone(), path.clone(), accept.clone())
    };

    let id = match query.id {
        Some(id) => id,
        None => {
            return Err(fail(ApiError::bad_request(
                "Missing required query parameter: id",
            )))
        }
    };

    if !ID_PATTERN.is_match(&id) {
        // The lookup collaborator is never invoked for a malformed id.
        return Err(fail(ApiError::bad_request(
            "The ID must contain up to 3 letters, then numbers",
        )));
    }

    let body = state.store.get_info(&id).await.map_err(|e| fail(e))?;

    let payload = serde_json::to_string_pretty(&body)
        .map_err(|e| fail(ApiError::internal("response serialization failed").with_source(e)))?;

    let mut response = (StatusCode::OK, payload).into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_ID.clone(), value);
    }

    tracing::info!(correlation_id = %correlation_id, "dispatching response");

    Ok(response)
}
