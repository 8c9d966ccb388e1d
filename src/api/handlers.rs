//! Request handlers for the project endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use super::types::ErrorDetail;
use crate::catalog;
use crate::model::{NewProjectPayload, Windpark};
use crate::provider::ProjectStore;
use crate::validate::{is_not_empty, is_valid_percentage};

/// Returns all projects.
///
/// `GET /api/v1/projects` → 200 + JSON array
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Windpark>>, (StatusCode, Json<ErrorDetail>)> {
    state.store.list().map(Json).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: e.to_string(),
            }),
        )
    })
}

/// Creates a project.
///
/// `POST /api/v1/projects` → 201 + created project JSON,
/// or 422 + `{detail}` when the payload violates the field rules.
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProjectPayload>,
) -> Result<(StatusCode, Json<Windpark>), (StatusCode, Json<ErrorDetail>)> {
    if let Some(detail) = validate_payload(&payload) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorDetail { detail }),
        ));
    }

    match state.store.create(&payload) {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: e.to_string(),
            }),
        )),
    }
}

/// Checks the create payload; returns the first violation as a message.
fn validate_payload(payload: &NewProjectPayload) -> Option<String> {
    if !is_not_empty(&payload.name) {
        return Some("Projektname ist erforderlich".to_string());
    }

    if let (Some(start), Some(go_live)) = (payload.baubeginn, payload.inbetriebnahme) {
        if go_live <= start {
            return Some("Inbetriebnahme muss nach Baubeginn liegen".to_string());
        }
    }

    for (i, anlage) in payload.anlagen.iter().enumerate() {
        if catalog::models_for(&anlage.hersteller).is_none() {
            return Some(format!("Anlage {}: unbekannter Hersteller", i + 1));
        }
        if !catalog::is_valid_model(&anlage.hersteller, &anlage.modell) {
            return Some(format!("Anlage {}: Modell passt nicht zum Hersteller", i + 1));
        }
        if anlage.anzahl < 1 {
            return Some(format!("Anlage {}: Anzahl muss positiv sein", i + 1));
        }
    }

    if payload.ek_quote != 0.0 && !is_valid_percentage(payload.ek_quote) {
        return Some("EK-Quote muss zwischen 0 und 100 liegen".to_string());
    }
    for (label, value) in [
        ("Gewinn p.a.", payload.gewinn_pro_annum),
        ("Investitionsvolumen", payload.investitionsvolumen),
        ("FK-Zins", payload.fk_zins),
        ("RoI", payload.roi),
    ] {
        if value < 0.0 {
            return Some(format!("{label} darf nicht negativ sein"));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::provider::MemoryStore;
    use crate::seed::seed_projects;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: MemoryStore::new(seed_projects()),
        })
    }

    fn valid_body() -> String {
        r#"{
            "name": "Testpark",
            "standort": "Kiel",
            "baubeginn": "2025-03-01",
            "inbetriebnahme": "2026-06-01",
            "status": "Entwurf",
            "anlagen": [{"hersteller": "Vestas", "modell": "V150-4.2", "anzahl": 3}]
        }"#
        .to_string()
    }

    async fn post_projects(app: axum::Router, body: String) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/projects")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn list_returns_seeded_projects() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/api/v1/projects")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 6);
        assert_eq!(json[0]["name"], "Windpark Nordsee Alpha");
        assert!(json[0].get("gewinnProAnnum").is_some());
    }

    #[tokio::test]
    async fn create_assigns_id_and_returns_201() {
        let state = make_test_state();
        let app = router(state.clone());

        let (status, json) = post_projects(app, valid_body()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["id"], "7");
        assert_eq!(json["name"], "Testpark");
        assert_eq!(json["anlagen"][0]["anzahl"], 3);

        // the created project is visible in a subsequent list
        let listed = state.store.list().unwrap();
        assert_eq!(listed.len(), 7);
        assert_eq!(listed[6].name, "Testpark");
    }

    #[tokio::test]
    async fn create_empty_name_returns_422_with_detail() {
        let app = router(make_test_state());
        let body = r#"{"name": "  ", "anlagen": []}"#.to_string();
        let (status, json) = post_projects(app, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].as_str().unwrap_or("").contains("Projektname"));
    }

    #[tokio::test]
    async fn create_bad_dates_returns_422() {
        let app = router(make_test_state());
        let body = r#"{
            "name": "Testpark",
            "baubeginn": "2024-01-10",
            "inbetriebnahme": "2024-01-05",
            "anlagen": []
        }"#
        .to_string();
        let (status, json) = post_projects(app, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            json["detail"]
                .as_str()
                .unwrap_or("")
                .contains("Inbetriebnahme")
        );
    }

    #[tokio::test]
    async fn create_mismatched_model_returns_422() {
        let app = router(make_test_state());
        let body = r#"{
            "name": "Testpark",
            "anlagen": [{"hersteller": "Vestas", "modell": "N163/5.X", "anzahl": 2}]
        }"#
        .to_string();
        let (status, json) = post_projects(app, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].as_str().unwrap_or("").contains("Modell"));
    }

    #[tokio::test]
    async fn create_out_of_range_ek_quote_returns_422() {
        let app = router(make_test_state());
        let body = r#"{"name": "Testpark", "ekQuote": 120.0, "anlagen": []}"#.to_string();
        let (status, json) = post_projects(app, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["detail"].as_str().unwrap_or("").contains("EK-Quote"));
    }
}
