use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

/// `GET /healthz` — the process is up and serving.
pub async fn healthz() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ok" })
}

/// `GET /readyz` — accepting traffic. A service with hard dependencies
/// mounts its own replacement that checks them.
pub async fn readyz() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ok" })
}
