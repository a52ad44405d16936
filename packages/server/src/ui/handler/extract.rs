//! Request extractors that report failures in the API's error format.

use axum::extract::FromRequest;

use super::ApiError;

/// `axum::Json` whose rejection (bad JSON, missing or mistyped fields,
/// wrong content type) is answered as a 400 `InvalidInput` [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
