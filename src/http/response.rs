//! Echo responses.
//!
//! The reference host has no upstreams; it reports what the request looks
//! like after the fixup stage so the effect of a rule can be observed.

use axum::{extract::Request, Json};
use serde::{Deserialize, Serialize};

use crate::http::request::request_id;
use crate::rewrite::ResolvedScope;

/// Body returned for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoBody {
    pub method: String,
    pub original_method: String,
    pub path: String,
    pub scope: Option<String>,
    pub request_id: Option<String>,
}

impl EchoBody {
    pub fn from_request<B>(request: &axum::http::Request<B>) -> Self {
        let resolved = request.extensions().get::<ResolvedScope>();
        let method = request.method().to_string();
        Self {
            original_method: resolved
                .map(|r| r.original_method.clone())
                .unwrap_or_else(|| method.clone()),
            method,
            path: request.uri().path().to_string(),
            scope: resolved.map(|r| r.label.clone()),
            request_id: request_id(request).map(str::to_string),
        }
    }
}

/// Handler answering with the post-fixup view of the request.
pub async fn echo_handler(request: Request) -> Json<EchoBody> {
    Json(EchoBody::from_request(&request))
}
