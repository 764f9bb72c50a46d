//! JSON Schema for the request and response bodies.

use atune_models::{AnalyzeTrajectoryRequest, AnalyzeVideoRequest, TuningResult};
use axum::Json;
use schemars::schema_for;
use serde_json::{json, Value};

/// Schemas keyed by endpoint.
pub async fn docs() -> Json<Value> {
    Json(json!({
        "POST /api/v1/analyze/trajectory": {
            "request": schema_for!(AnalyzeTrajectoryRequest),
            "response": schema_for!(TuningResult),
        },
        "POST /api/v1/analyze/video": {
            "request": schema_for!(AnalyzeVideoRequest),
            "response": schema_for!(TuningResult),
        },
    }))
}
