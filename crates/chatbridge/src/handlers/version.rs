use axum::Json;
use serde::Serialize;

use crate::build_info;

#[derive(Serialize)]
pub struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

/// GET /version
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: build_info::NAME,
        version: build_info::VERSION,
    })
}
