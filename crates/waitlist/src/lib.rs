//! HTTP API for the showcase site: waitlist subscription, typed page
//! content, the gallery catalog and a liveness probe.

pub mod server;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use corelib::content::{self, OutfitFilter, ViewMode};

/// Build the API router with all endpoints.
pub fn create_router() -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/subscribe", post(subscribe_handler))
        .route("/api/content", get(content_handler))
        .route("/api/gallery", get(gallery_handler))
}

async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Accepts `{ "email": ... }`.
///
/// The body is parsed by hand to keep the status split exact: a non-JSON
/// payload is a 500, a JSON body without a usable email is a 400. The
/// address is logged, never stored.
async fn subscribe_handler(body: String) -> (StatusCode, Json<Value>) {
    let parsed: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(error) => {
            log::error!("subscription error: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal server error" })),
            );
        }
    };

    match parsed.get("email").and_then(Value::as_str) {
        Some(email) if email.contains('@') => {
            log::info!("new subscription: {email}");
            (
                StatusCode::OK,
                Json(json!({ "message": "Successfully subscribed!" })),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Valid email is required" })),
        ),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ContentQuery {
    view: Option<String>,
}

/// Typed content selection: the mode is explicit query input, nothing is
/// read from ambient storage.
async fn content_handler(Query(query): Query<ContentQuery>) -> Json<Value> {
    let mode = ViewMode::from_query(query.view.as_deref());
    let section = content::section_for(mode);
    Json(json!({ "view": mode, "section": section }))
}

#[derive(Debug, Default, Deserialize)]
struct GalleryQuery {
    mood: Option<String>,
    brand: Option<String>,
}

async fn gallery_handler(Query(query): Query<GalleryQuery>) -> Json<Value> {
    let filter = OutfitFilter {
        mood: query.mood.as_deref(),
        brand: query.brand.as_deref(),
    };
    let outfits = content::filter_catalog(filter);
    Json(json!({
        "moods": content::MOODS,
        "brands": content::BRANDS,
        "count": outfits.len(),
        "outfits": outfits,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router().oneshot(request).await.expect("route");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    fn subscribe_request(method: Method, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/api/subscribe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn subscribe_accepts_a_valid_email() {
        let (status, body) = send(subscribe_request(Method::POST, r#"{"email":"a@b.com"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully subscribed!");
    }

    #[tokio::test]
    async fn subscribe_rejects_an_email_without_at() {
        let (status, body) =
            send(subscribe_request(Method::POST, r#"{"email":"not-an-email"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Valid email is required");
    }

    #[tokio::test]
    async fn subscribe_rejects_a_missing_email() {
        let (status, _) = send(subscribe_request(Method::POST, "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn subscribe_disallows_get() {
        let (status, _) = send(subscribe_request(Method::GET, "")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn subscribe_reports_an_unparsable_body() {
        let (status, body) = send(subscribe_request(Method::POST, "definitely not json")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn content_defaults_to_the_home_view() {
        let (status, body) = send(get_request("/api/content")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "home");
        assert_eq!(body["section"]["benefits"].as_array().expect("array").len(), 4);
    }

    #[tokio::test]
    async fn content_selects_the_retail_view() {
        let (_, body) = send(get_request("/api/content?view=retail")).await;
        assert_eq!(body["view"], "retail");
        assert!(
            body["section"]["title"]
                .as_str()
                .expect("title")
                .contains("Retail")
        );
    }

    #[tokio::test]
    async fn gallery_filters_by_mood() {
        let (_, all) = send(get_request("/api/gallery")).await;
        let (_, casual) = send(get_request("/api/gallery?mood=Casual")).await;

        let total = all["count"].as_u64().expect("count");
        let narrowed = casual["count"].as_u64().expect("count");
        assert!(narrowed > 0);
        assert!(narrowed < total);
        for outfit in casual["outfits"].as_array().expect("outfits") {
            assert_eq!(outfit["mood"], "Casual");
        }
    }

    #[tokio::test]
    async fn status_reports_ok() {
        let (status, body) = send(get_request("/api/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
