//! Request extractors whose rejections use the crate's error body.
//!
//! axum's own `Json` and `Query` answer malformed input with a plain-text
//! 4xx. These wrappers turn the rejection into [`ServiceError::Validation`]
//! so every failure reaches the client as a 400 [`ErrorResponse`].
//!
//! [`ErrorResponse`]: super::ErrorResponse

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::service::ServiceError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServiceError))]
pub struct Query<T>(pub T);
