use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use docsign_common::{Error, ErrorResponse, SignResponse, SignatureRequest, StatusResponse};
use serde_json::Value;

use crate::SigningState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

pub async fn get_pdf(State(state): State<SigningState>) -> Result<Response, Response> {
    let path = &state.config.document_path;

    let bytes = tokio::fs::read(path).await.map_err(|err| {
        tracing::error!("Could not read document {}: {}", path.display(), err);
        into_response(Error::Document(err.to_string()))
    })?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document.pdf");

    tracing::debug!("Serving document {} ({} bytes)", file_name, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn post_sign(
    State(state): State<SigningState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SignResponse>, Response> {
    let Json(value) = payload.map_err(|rejection| {
        tracing::warn!("Could not parse sign request body: {}", rejection);
        into_response(Error::validation(
            "Request body must be JSON with name and pin",
        ))
    })?;

    let request = SignatureRequest::from_value(value).map_err(|err| {
        tracing::warn!("Invalid sign request: {}", err);
        into_response(err)
    })?;

    if request.pin != state.config.pin {
        tracing::warn!("Rejected signature for {}: invalid PIN", request.name);
        return Err(into_response(Error::invalid_pin()));
    }

    tracing::info!("Document signed by {}", request.name);

    Ok(Json(SignResponse {
        message: state.config.success_message.clone(),
    }))
}

pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse::default())
}

pub async fn fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Not found")),
    )
        .into_response()
}

/// Convert an [`Error`] into its HTTP status and `{error}` body
pub fn into_response<T>(error: T) -> Response
where
    T: Into<Error>,
{
    let error = error.into();

    let status = match error {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Auth(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json::<ErrorResponse>(error.into())).into_response()
}
