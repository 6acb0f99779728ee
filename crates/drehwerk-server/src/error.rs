// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP error mapping. Every failure answers with a JSON `{"error": ..}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use drehwerk_core::DrehwerkError;

/// Failures a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request, merged with the configured defaults, still lacks a
    /// required field.
    #[error("source, destination, and printer are required")]
    MissingFields,
    /// The printer registry query failed.
    #[error("error fetching printers")]
    Registry(#[source] DrehwerkError),
    /// Batch setup failed before any file was touched.
    #[error(transparent)]
    Batch(DrehwerkError),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::Registry(err) => {
                tracing::error!(%err, "printer registry query failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Batch(err) => {
                tracing::error!(%err, "batch setup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
