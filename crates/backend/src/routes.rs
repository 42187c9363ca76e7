use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::shared::app_state::AppState;
use crate::{handlers, system};

/// Configure every route of the application
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Clients (dashboard + detail)
        // ========================================
        .route("/api/clients", get(handlers::a001_client::search))
        .route(
            "/api/clients/:client_id",
            get(handlers::a001_client::get_by_id).put(handlers::a001_client::update),
        )
        // ========================================
        // A002 People
        // ========================================
        .route(
            "/api/clients/:client_id/people",
            get(handlers::a002_person::list).post(handlers::a002_person::create),
        )
        .route(
            "/api/clients/:client_id/people/:person_id",
            get(handlers::a002_person::get_by_id)
                .put(handlers::a002_person::update)
                .delete(handlers::a002_person::delete),
        )
        // ========================================
        // A005 Contacts and interviews
        // ========================================
        .route(
            "/api/clients/:client_id/contacts",
            get(handlers::a005_contact::list).post(handlers::a005_contact::create),
        )
        .route(
            "/api/clients/:client_id/contacts/:contact_id",
            get(handlers::a005_contact::get_by_id)
                .put(handlers::a005_contact::update)
                .delete(handlers::a005_contact::delete),
        )
        .route(
            "/api/clients/:client_id/contacts/:contact_id/follow-up",
            post(handlers::a005_contact::follow_up),
        )
        .route(
            "/api/clients/:client_id/contacts/:contact_id/realize",
            post(handlers::a005_contact::realize),
        )
        .route(
            "/api/clients/:client_id/contacts/:contact_id/cancel",
            post(handlers::a005_contact::cancel),
        )
        .route(
            "/api/clients/:client_id/contacts/:contact_id/offers/:offer_id/decision",
            post(handlers::a005_contact::decide_offer),
        )
        // ========================================
        // A003 Contract catalogue
        // ========================================
        .route(
            "/api/catalog/templates",
            get(handlers::a003_contract_template::list),
        )
        .route(
            "/api/catalog/templates/:template_id",
            get(handlers::a003_contract_template::get_by_id),
        )
        .route(
            "/api/catalog/templates/:template_id/quote",
            post(handlers::a003_contract_template::quote),
        )
        .route(
            "/api/catalog/domains",
            get(handlers::a003_contract_template::domains),
        )
        .route(
            "/api/catalog/offers",
            get(handlers::a003_contract_template::offers),
        )
        // ========================================
        // A004 Subscriptions
        // ========================================
        .route(
            "/api/clients/:client_id/subscriptions",
            get(handlers::a004_subscription::list).post(handlers::a004_subscription::create),
        )
        .route(
            "/api/clients/:client_id/subscriptions/:subscription_id",
            get(handlers::a004_subscription::get_by_id)
                .put(handlers::a004_subscription::update)
                .delete(handlers::a004_subscription::delete),
        )
        .route(
            "/api/clients/:client_id/subscriptions/:subscription_id/toggle-option",
            post(handlers::a004_subscription::toggle_option),
        )
        .route(
            "/api/clients/:client_id/subscriptions/:subscription_id/activate",
            post(handlers::a004_subscription::activate),
        )
        .route(
            "/api/clients/:client_id/subscriptions/:subscription_id/terminate",
            post(handlers::a004_subscription::terminate),
        )
        .route(
            "/api/clients/:client_id/subscriptions/:subscription_id/cancel",
            post(handlers::a004_subscription::cancel),
        )
        // ========================================
        // Activity log
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all).delete(handlers::logs::clear_all),
        )
        .layer(middleware::from_fn(system::request_logger::request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::mock_tables;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use contracts::domain::a005_contact::aggregate::Contact;
    use contracts::domain::a005_contact::links::OrphanPolicy;
    use contracts::shared::handback::{Handback, ListView};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (AppState, Router) {
        let state = AppState::new(mock_tables().unwrap(), "Agent Test", OrphanPolicy::default());
        (state.clone(), configure_routes(state))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn client_id(state: &AppState, code: &str) -> String {
        let tables = state.store.read().await;
        tables
            .clients
            .iter()
            .find(|c| c.base.code == code)
            .unwrap()
            .base
            .id
            .to_string()
    }

    async fn contact_id(state: &AppState, code: &str) -> String {
        let tables = state.store.read().await;
        tables
            .contacts
            .iter()
            .find(|c| c.base.code == code)
            .unwrap()
            .base
            .id
            .to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_search() {
        let (_, app) = app();
        let (status, body) = send(&app, Method::GET, "/api/clients?city=paris", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_client_detail_and_errors() {
        let (state, app) = app();
        let id = client_id(&state, "C2024-00147").await;

        let (status, body) = send(&app, Method::GET, &format!("/api/clients/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["subscriptions"]["active_count"], 2);

        let (status, _) = send(&app, Method::GET, "/api/clients/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = uuid::Uuid::new_v4();
        let (status, body) =
            send(&app, Method::GET, &format!("/api/clients/{}", unknown), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["fallback"], "/dashboard");
    }

    #[tokio::test]
    async fn test_contact_flow() {
        let (state, app) = app();
        let client = client_id(&state, "C2024-00147").await;
        let root = contact_id(&state, "CNT001").await;
        let base = format!("/api/clients/{}/contacts", client);

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("{}/{}/follow-up", base, root),
            Some(json!({ "motive": "Point d'étape", "contact_date": "2024-12-02T09:00:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["newContact"]["parent_contact_id"], root.as_str());
        assert_eq!(body["newContact"]["state"], "planned");
        let interview = body["newContact"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("{}/{}/realize", base, interview),
            Some(json!({ "closing_comment": "", "offers": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "closing_comment");

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("{}/{}/cancel", base, interview),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("{}/{}/cancel", base, interview),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(body["action"], "cancel interview");

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("{}/{}/cancel", base, interview),
            Some(json!({ "confirmed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updatedContact"]["state"], "cancelled");

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("{}/{}/cancel", base, interview),
            Some(json!({ "confirmed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, Method::GET, &format!("{}/{}", base, root), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["children"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_contact_keeps_children() {
        let (state, app) = app();
        let client = client_id(&state, "C2024-00147").await;
        let root = contact_id(&state, "CNT001").await;
        let child = contact_id(&state, "CNT002").await;
        let base = format!("/api/clients/{}/contacts", client);

        let (_, listed) = send(&app, Method::GET, &base, None).await;
        let mut view = ListView::new(serde_json::from_value::<Vec<Contact>>(listed).unwrap());
        assert_eq!(view.len(), 2);

        let (status, _) = send(&app, Method::DELETE, &format!("{}/{}", base, root), None).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("{}/{}?confirmed=true", base, root),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "deletedContactId": root }));
        assert!(view.apply(Handback::<Contact>::from_json(&body).unwrap()));
        assert_eq!(view.items()[0].base.id.to_string(), child);

        let (_, body) = send(&app, Method::GET, &base, None).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["id"].as_str())
            .collect();
        assert_eq!(ids, vec![child.as_str()]);
    }

    #[tokio::test]
    async fn test_subscription_create_and_quote() {
        let (state, app) = app();
        let client = client_id(&state, "C2023-00892").await;

        let (_, templates) = send(&app, Method::GET, "/api/catalog/templates?search=RC", None).await;
        let template = templates
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["code"] == "ASS-RC-PRO")
            .unwrap()
            .clone();
        let template_id = template["id"].as_str().unwrap();
        let paid_option = template["options"][0]["id"].clone();

        let (status, amounts) = send(
            &app,
            Method::POST,
            &format!("/api/catalog/templates/{}/quote", template_id),
            Some(json!({ "periodicity": "annual", "subscribed_option_ids": [paid_option] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(amounts["annual"], 3000.0);
        assert_eq!(amounts["monthly"], 250.0);

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/catalog/templates/{}/quote", template_id),
            Some(json!({ "subscribed_option_ids": [uuid::Uuid::new_v4()] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "subscribed_option_ids");

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/clients/{}/subscriptions", client),
            Some(json!({
                "template_id": template_id,
                "periodicity": "monthly",
                "subscription_date": "2024-12-01",
                "subscribed_option_ids": [paid_option],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["newSubscription"]["monthly_amount"], 250.0);
        assert_eq!(body["newSubscription"]["annual_amount"], 3000.0);
        let subscription = body["newSubscription"]["id"].as_str().unwrap().to_string();
        for action in ["terminate", "cancel"] {
            let (status, _) = send(
                &app,
                Method::POST,
                &format!("/api/clients/{}/subscriptions/{}/{}", client, subscription, action),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        }

        let (_, list) = send(
            &app,
            Method::GET,
            &format!("/api/clients/{}/subscriptions", client),
            None,
        )
        .await;
        assert_eq!(list["items"].as_array().unwrap().len(), 1);
        assert_eq!(list["stats"]["active_count"], 0);
    }

    #[tokio::test]
    async fn test_mutations_reach_activity_log() {
        let (state, app) = app();
        let client = client_id(&state, "C2024-00147").await;
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/clients/{}/people", client),
            Some(json!({
                "first_name": "Luc",
                "last_name": "Garnier",
                "role": "Comptable",
                "email": "luc.garnier@technosolutions.fr",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, logs) = send(&app, Method::GET, "/api/logs", None).await;
        assert_eq!(logs[0]["category"], "a002_person");

        let (status, _) = send(&app, Method::DELETE, "/api/logs", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, logs) = send(&app, Method::GET, "/api/logs", None).await;
        assert!(logs.as_array().unwrap().is_empty());

        // read-only from outside: entries come from mutations only
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/logs",
            Some(json!({ "source": "client", "category": "ui", "message": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
