//! Response bodies returned to callers.
//!
//! Errors are always JSON objects of the form `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::DescriptorConfig;

/// Errors visible to API callers. None of them are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Neither `address` nor `txid` supplied.
    InvalidRequest,
    /// Address lookup came back absent.
    AddressNotFound,
    /// Transaction lookup came back absent.
    TransactionNotFound,
    /// Anything other than GET on the lookup route.
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::AddressNotFound | ApiError::TransactionNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest => "Invalid request",
            ApiError::AddressNotFound => "Address not found",
            ApiError::TransactionNotFound => "Transaction not found",
            ApiError::MethodNotAllowed => "Method not allowed",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.message() })).into_response()
    }
}

/// Static service descriptor served on `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub run: String,
    pub port: String,
    pub stream: bool,
    pub datasets: bool,
    pub api: bool,
}

impl ServiceDescriptor {
    pub fn new(config: &DescriptorConfig, port: u16) -> Self {
        Self {
            name: config.name.clone(),
            run: config.run.clone(),
            port: port.to_string(),
            stream: config.stream,
            datasets: config.datasets,
            api: config.api,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn error_bodies() {
        let cases = [
            (ApiError::InvalidRequest, 400, r#"{"error":"Invalid request"}"#),
            (ApiError::AddressNotFound, 404, r#"{"error":"Address not found"}"#),
            (ApiError::TransactionNotFound, 404, r#"{"error":"Transaction not found"}"#),
            (ApiError::MethodNotAllowed, 405, r#"{"error":"Method not allowed"}"#),
        ];

        for (error, status, body) in cases {
            let response = error.into_response();
            assert_eq!(response.status().as_u16(), status);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(bytes, body.as_bytes());
        }
    }

    #[test]
    fn descriptor_serializes_port_as_string() {
        let descriptor = ServiceDescriptor::new(&DescriptorConfig::default(), 9000);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "BlockHub",
                "run": "./route.sh",
                "port": "9000",
                "stream": true,
                "datasets": true,
                "api": true
            })
        );
    }
}
