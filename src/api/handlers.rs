//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, EvaluateRequest, EvaluationResponse};
use crate::config::CostAssumptions;
use crate::eval::evaluator::evaluate;
use crate::profile::EvaluationParameters;

/// Evaluates a client profile against the active assumptions.
///
/// `POST /evaluate` → 200 + `EvaluationResponse` JSON
/// Malformed or degenerate inputs → 422 + `ErrorResponse`
pub async fn post_evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> impl IntoResponse {
    let params = EvaluationParameters {
        bess_percent_of_solar: request.params.bess_percent_of_solar,
    };

    let evaluation = request
        .profile
        .resolve()
        .and_then(|profile| evaluate(&profile, &params, &state.assumptions));

    match evaluation {
        Ok(e) => Ok(Json(EvaluationResponse::from(&e))),
        Err(e) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
                kind: e.kind().to_string(),
            }),
        )),
    }
}

/// Returns the cost assumptions applied to every evaluation.
///
/// `GET /assumptions` → 200 + `CostAssumptions` JSON
pub async fn get_assumptions(State(state): State<Arc<AppState>>) -> Json<CostAssumptions> {
    Json(state.assumptions.clone())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            assumptions: CostAssumptions::default(),
        })
    }

    fn evaluate_body(contract_demand_kva: f64) -> String {
        format!(
            r#"{{
                "profile": {{
                    "name": "Test Client",
                    "contract_demand_kva": {contract_demand_kva},
                    "sanctioned_load_kva": 2500.0,
                    "installed_solar_ac_kw": 500.0,
                    "installed_solar_dc_kw": 700.0,
                    "annual_consumption_kwh": 3.0e6,
                    "base_tariff_per_kwh": 8.5
                }},
                "params": {{ "bess_percent_of_solar": 10.0 }}
            }}"#
        )
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn evaluate_returns_200_with_four_rows() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post_json("/evaluate", evaluate_body(2000.0)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["results"].as_array().map(Vec::len), Some(4));
        assert!(json.get("recommended").is_some());
        assert_eq!(json["waiver_percent"], 80.0);
    }

    #[tokio::test]
    async fn evaluate_zero_contract_demand_returns_422() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post_json("/evaluate", evaluate_body(0.0)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "degenerate_input");
    }

    #[tokio::test]
    async fn evaluate_missing_field_returns_422_naming_field() {
        let app = router(make_test_state());

        let body = r#"{
            "profile": {
                "contract_demand_kva": 2000.0,
                "sanctioned_load_kva": 2500.0,
                "installed_solar_ac_kw": 500.0,
                "installed_solar_dc_kw": 700.0,
                "annual_consumption_kwh": 3.0e6
            }
        }"#;
        let resp = app
            .oneshot(post_json("/evaluate", body.to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "missing_field");
        let error = json["error"].as_str().unwrap_or("");
        assert!(error.contains("base_tariff_per_kwh"), "got: {error}");
    }

    #[tokio::test]
    async fn assumptions_returns_defaults() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/assumptions")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["capex_solar_per_mw"], 3.5e6);
        assert_eq!(json["bess_impact_rate_per_kwh"], 1.65);
    }
}
