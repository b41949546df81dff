//! End-to-end tests for the HTTP client against an in-process mock backend.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};

use client::api::ApiClient;
use client::api::models::CreateTeamRequest;
use client::config::{ApiConfig, ClientConfig, DownloadConfig};
use client::session::{MemorySessionStore, Role, SessionStore};
use client::ClientError;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> (ApiClient, Arc<MemorySessionStore>) {
    let session = Arc::new(MemorySessionStore::new());
    let config = ClientConfig {
        api: ApiConfig { base_url },
        download: DownloadConfig { dir: ".".into() },
    };
    let client = ApiClient::new(&config, session.clone()).unwrap();
    (client, session)
}

fn participant_json() -> Value {
    json!({
        "pid": "TECH25A00042",
        "name": "Asha Verma",
        "rollno": "2201341",
        "branch": "Information Technology",
        "batch": "2024",
        "college": "SRMS CET & R",
        "registeredEvents": [],
        "eventsCount": 0
    })
}

#[tokio::test]
async fn login_stores_the_participant_session() {
    let router = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["email"], "asha@example.com");
            Json(json!({
                "success": true,
                "token": "participant-token",
                "user": participant_json()
            }))
        }),
    );
    let base = serve(router).await;
    let (client, session) = client_for(base);

    let resp = client.login("asha@example.com", "secret123").await.unwrap();
    assert_eq!(resp.user.unwrap().pid, "TECH25A00042");
    assert_eq!(
        session.token(Role::Participant).as_deref(),
        Some("participant-token")
    );
    assert!(session.token(Role::Admin).is_none());
}

#[tokio::test]
async fn dashboard_sends_the_participant_bearer_token() {
    let router = Router::new().route(
        "/users/dashboard",
        get(|headers: HeaderMap| async move {
            assert_eq!(
                headers.get(header::AUTHORIZATION).unwrap(),
                "Bearer participant-token"
            );
            Json(json!({
                "success": true,
                "user": participant_json(),
                "events": []
            }))
        }),
    );
    let base = serve(router).await;
    let (client, session) = client_for(base);
    session
        .set_session(Role::Participant, "participant-token", None)
        .unwrap();

    let resp = client.dashboard().await.unwrap();
    assert_eq!(resp.user.pid, "TECH25A00042");
}

#[tokio::test]
async fn unauthorized_response_clears_both_sessions() {
    let router = Router::new().route(
        "/users/dashboard",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base = serve(router).await;
    let (client, session) = client_for(base);
    session
        .set_session(Role::Participant, "stale-user", None)
        .unwrap();
    session.set_session(Role::Admin, "stale-admin", None).unwrap();

    let err = client.dashboard().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth));
    assert!(session.token(Role::Participant).is_none());
    assert!(session.token(Role::Admin).is_none());
}

#[tokio::test]
async fn create_team_posts_the_member_pids() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let router = Router::new().route(
        "/teams/create",
        post(
            |State(captured): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                *captured.lock().unwrap() = Some(body);
                Json(json!({
                    "success": true,
                    "team": {
                        "tid": "TEAM01",
                        "teamName": "Null Pointers",
                        "members": []
                    }
                }))
            },
        ),
    )
    .with_state(captured.clone());
    let base = serve(router).await;
    let (client, _session) = client_for(base);

    let team = client
        .create_team(&CreateTeamRequest {
            event_id: "ev1".into(),
            team_name: "Null Pointers".into(),
            members: vec!["TECH25A00043".into(), "TECH25A00044".into()],
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(team.tid, "TEAM01");

    let body = captured.lock().unwrap().take().unwrap();
    assert_eq!(body["eventId"], "ev1");
    assert_eq!(body["teamName"], "Null Pointers");
    assert_eq!(body["members"], json!(["TECH25A00043", "TECH25A00044"]));
}

#[tokio::test]
async fn rejected_registration_surfaces_the_backend_message() {
    let router = Router::new().route(
        "/users/register-solo",
        post(|| async {
            Json(json!({ "success": false, "message": "Event is full" }))
        }),
    );
    let base = serve(router).await;
    let (client, _session) = client_for(base);

    let err = client.register_solo("ev1").await.unwrap_err();
    assert!(matches!(err, ClientError::BusinessRule(m) if m == "Event is full"));
}

#[tokio::test]
async fn error_status_bodies_are_decoded_for_their_message() {
    let router = Router::new().route(
        "/users/register-solo",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "You can register for maximum 3 events" })),
            )
        }),
    );
    let base = serve(router).await;
    let (client, _session) = client_for(base);

    let err = client.register_solo("ev1").await.unwrap_err();
    assert!(
        matches!(err, ClientError::BusinessRule(m) if m == "You can register for maximum 3 events")
    );
}

#[tokio::test]
async fn export_prefers_the_server_supplied_filename() {
    let router = Router::new().route(
        "/admin/export/all-participants",
        get(|| async {
            (
                [(
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"all_participants.csv\"",
                )],
                "pid,name\nTECH25A00042,Asha Verma\n",
            )
        }),
    );
    let base = serve(router).await;
    let (client, session) = client_for(base);
    session.set_session(Role::Admin, "admin-token", None).unwrap();

    let download = client.export_all_participants(None).await.unwrap();
    assert_eq!(download.filename, "all_participants.csv");
    assert!(download.bytes.starts_with(b"pid,name"));
}

#[tokio::test]
async fn export_falls_back_to_a_default_filename() {
    let router = Router::new().route(
        "/admin/export/event/{id}",
        get(|| async { "pid,name\n" }),
    );
    let base = serve(router).await;
    let (client, _session) = client_for(base);

    let download = client
        .export_event_participants("ev1", Some("SRMS CET & R"))
        .await
        .unwrap();
    assert_eq!(download.filename, "participants.csv");
}

#[tokio::test]
async fn admin_statistics_passes_the_range_and_admin_token() {
    let router = Router::new().route(
        "/admin/statistics",
        get(
            |headers: HeaderMap,
             axum::extract::Query(q): axum::extract::Query<
                std::collections::HashMap<String, String>,
            >| async move {
                assert_eq!(
                    headers.get(header::AUTHORIZATION).unwrap(),
                    "Bearer admin-token"
                );
                assert_eq!(q.get("range").map(String::as_str), Some("week"));
                Json(json!({
                    "success": true,
                    "statistics": {
                        "totalEvents": 12,
                        "totalUsers": 340,
                        "totalTeams": 25,
                        "activeEvents": 10,
                        "soloEvents": 7,
                        "teamEvents": 5
                    }
                }))
            },
        ),
    );
    let base = serve(router).await;
    let (client, session) = client_for(base);
    session.set_session(Role::Admin, "admin-token", None).unwrap();

    let stats = client.admin_statistics("week").await.unwrap();
    assert_eq!(stats.total_events, 12);
    assert_eq!(stats.team_events, 5);
}
