use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::constants::{ENTER_ENDPOINT, ENTRIES_ENDPOINT, LOTTERIES_ENDPOINT, TIME_ENDPOINT};
use shared::lottery::parse_entry_metadata;
use shared::validation::validate_lottery_id;
use shared::{Entry, Lottery};
use tracing::debug;

use crate::error::Error;
use crate::session::SignedInUser;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteriesQuery {
    pub lottery_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesQuery {
    pub lottery_id: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterQuery {
    pub id: String,
    pub entry_metadata: String,
}

fn checked_lottery_id(id: &str) -> Result<&str, Error> {
    validate_lottery_id(id).map_err(|_| Error::InvalidQuery(shared::constants::INVALID_LOTTERY_ID_ERROR))?;
    Ok(id)
}

async fn get_lotteries(
    State(state): State<AppState>,
    query: Result<Query<LotteriesQuery>, QueryRejection>,
) -> Result<Json<Vec<Lottery>>, Error> {
    let Query(query) = query?;
    let lottery_id = checked_lottery_id(&query.lottery_id)?;
    let lotteries = state.store.lotteries(lottery_id, state.clock.now_millis());
    debug!("Found {} lottery records for {}", lotteries.len(), lottery_id);
    Ok(Json(lotteries))
}

async fn get_entries(
    State(state): State<AppState>,
    SignedInUser(email): SignedInUser,
    query: Result<Query<EntriesQuery>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, Error> {
    let Query(query) = query?;
    let lottery_id = checked_lottery_id(&query.lottery_id)?;
    if !query.email.trim().eq_ignore_ascii_case(&email) {
        return Err(Error::Forbidden);
    }
    Ok(Json(state.store.entries(lottery_id, &email).await))
}

async fn enter_lottery(
    State(state): State<AppState>,
    SignedInUser(email): SignedInUser,
    query: Result<Query<EnterQuery>, QueryRejection>,
) -> Result<Json<Entry>, Error> {
    let Query(query) = query?;
    let lottery_id = checked_lottery_id(&query.id)?;
    let entry_metadata = parse_entry_metadata(&query.entry_metadata)?;
    let entry = state
        .store
        .upsert_entry(lottery_id, &email, entry_metadata, state.clock.now_millis())
        .await?;
    Ok(Json(entry))
}

async fn get_time(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "now": state.clock.now_millis() }))
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(LOTTERIES_ENDPOINT, get(get_lotteries))
        .route(ENTRIES_ENDPOINT, get(get_entries))
        .route(ENTER_ENDPOINT, get(enter_lottery))
        .route(TIME_ENDPOINT, get(get_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LotterySeed;
    use crate::store::LotteryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use shared::TimeSource;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixedClock(AtomicI64);

    impl TimeSource for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn app(now: i64) -> (Router, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock(AtomicI64::new(now)));
        let state = AppState {
            store: Arc::new(LotteryStore::new([LotterySeed {
                id: "spring2021".to_string(),
                start: 1000,
                end: 2000,
            }])),
            clock: clock.clone(),
        };
        (create_router().merge(crate::session::create_router()).with_state(state), clock)
    }

    fn get(uri: &str, email: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(email) = email {
            builder = builder.header(header::COOKIE, format!("lottery_session={}", email));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const METADATA: &str = "%7B%22firstName%22%3A%22Ada%22%7D";

    #[tokio::test]
    async fn test_lotteries_endpoint() {
        let (app, _) = app(1234);
        let response = app
            .oneshot(get("/api/lottery/lotteries?lotteryId=spring2021", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!([{ "id": "spring2021", "start": 1000, "end": 2000, "now": 1234 }])
        );
    }

    #[tokio::test]
    async fn test_unknown_lottery_is_empty_list() {
        let (app, _) = app(1234);
        let response = app
            .oneshot(get("/api/lottery/lotteries?lotteryId=fall2021", None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_enter_then_list_entries() {
        let (app, clock) = app(1500);
        let uri = format!("/api/lottery/enter?id=spring2021&entryMetadata={}", METADATA);

        let response = app.clone().oneshot(get(&uri, Some("ada@school.edu"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["entryMetadata"], json!({ "firstName": "Ada" }));

        clock.0.store(1800, Ordering::SeqCst);
        let response = app.clone().oneshot(get(&uri, Some("ada@school.edu"))).await.unwrap();
        let updated = json_body(response).await;
        assert_eq!(updated["entryId"], created["entryId"]);
        assert_eq!(updated["timestamp"], json!(1800));

        let response = app
            .oneshot(get(
                "/api/lottery/entries?lotteryId=spring2021&email=ada@school.edu",
                Some("ada@school.edu"),
            ))
            .await
            .unwrap();
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["entryId"], created["entryId"]);
    }

    #[tokio::test]
    async fn test_enter_requires_session() {
        let (app, _) = app(1500);
        let uri = format!("/api/lottery/enter?id=spring2021&entryMetadata={}", METADATA);
        let response = app.oneshot(get(&uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_enter_after_close_is_forbidden() {
        let (app, _) = app(2500);
        let uri = format!("/api/lottery/enter?id=spring2021&entryMetadata={}", METADATA);
        let response = app.oneshot(get(&uri, Some("ada@school.edu"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_enter_rejects_malformed_json() {
        let (app, _) = app(1500);
        let response = app
            .oneshot(get(
                "/api/lottery/enter?id=spring2021&entryMetadata=%7Bnope",
                Some("ada@school.edu"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_query_fields_answer_with_json_error() {
        let (app, _) = app(1500);
        let response = app
            .clone()
            .oneshot(get("/api/lottery/enter?id=spring2021", Some("ada@school.edu")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("entryMetadata")));

        let response = app.oneshot(get("/api/lottery/lotteries", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_entries_of_someone_else_forbidden() {
        let (app, _) = app(1500);
        let response = app
            .oneshot(get(
                "/api/lottery/entries?lotteryId=spring2021&email=grace@school.edu",
                Some("ada@school.edu"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_time_endpoint() {
        let (app, _) = app(4242);
        let response = app.oneshot(get("/api/time", None)).await.unwrap();
        assert_eq!(json_body(response).await, json!({ "now": 4242 }));
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let (app, _) = app(1500);
        let response = app
            .clone()
            .oneshot(get("/api/auth/session", Some("ada@school.edu")))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!({ "user": { "email": "ada@school.edu" } }));

        let response = app.clone().oneshot(get("/api/auth/session", None)).await.unwrap();
        assert_eq!(json_body(response).await, json!({}));

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"Grace@School.edu"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(set_cookie.starts_with("lottery_session=grace@school.edu"));
    }
}
