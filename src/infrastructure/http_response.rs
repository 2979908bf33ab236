// HTTP response utilities for non-JSON bodies
use axum::{
    body::Body,
    http::{HeaderValue, Response, StatusCode, header},
};

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const TEXT_CSV: &str = "text/csv; charset=utf-8";

/// Build a 200 response with an explicit content type and length
pub fn typed_response(body: Vec<u8>, content_type: &'static str) -> Result<Response<Body>, StatusCode> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(content_type))
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .map_err(|e| {
            tracing::error!(error = %e, "response build error");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// CSV download with a suggested file name
pub fn csv_attachment(body: Vec<u8>, file_name: &str) -> Result<Response<Body>, StatusCode> {
    let mut response = typed_response(body, TEXT_CSV)?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}
