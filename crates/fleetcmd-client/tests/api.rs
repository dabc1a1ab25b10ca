use std::collections::HashMap;

use axum::Router;
use axum::extract::{Form, Json, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use fleetcmd_client::{ApiClient, ClientConfig, ClientError, ExecClient};
use fleetcmd_model::{Credentials, SessionId, TargetId, TargetQuery, WireTimeout};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn token_route() -> Router {
    Router::new().route(
        "/oauth2/token",
        post(|Form(fields): Form<HashMap<String, String>>| async move {
            let id = fields.get("client_id").map(String::as_str);
            let secret = fields.get("client_secret").map(String::as_str);
            if id == Some("id") && secret == Some("secret") {
                (
                    StatusCode::CREATED,
                    Json(json!({"access_token": "tok-1", "token_type": "bearer"})),
                )
                    .into_response()
            } else {
                (StatusCode::FORBIDDEN, "access denied").into_response()
            }
        }),
    )
}

async fn authenticated(base: String) -> ExecClient {
    let cfg = ClientConfig {
        base_url: base,
        ..Default::default()
    };
    ApiClient::new(&cfg)
        .expect("client build")
        .authenticate(&Credentials::new("id", "secret"))
        .await
        .expect("authentication")
}

#[tokio::test]
async fn authenticate_returns_bearer_token() {
    let base = serve(token_route()).await;
    let client = authenticated(base).await;

    assert_eq!(client.token().authorization_value(), "Bearer tok-1");
    assert_eq!(client.token().kind(), "bearer");
}

#[tokio::test]
async fn authenticate_rejects_non_201_with_body() {
    let base = serve(token_route()).await;
    let cfg = ClientConfig {
        base_url: base,
        ..Default::default()
    };
    let err = ApiClient::new(&cfg)
        .unwrap()
        .authenticate(&Credentials::new("id", "wrong"))
        .await
        .err()
        .expect("authentication must fail");

    match err {
        ClientError::AuthenticationFailed(body) => assert!(body.contains("access denied")),
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }
}

#[test]
fn rejects_invalid_base_url() {
    let cfg = ClientConfig {
        base_url: "not a url".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        ApiClient::new(&cfg),
        Err(ClientError::InvalidBaseUrl(_))
    ));
}

#[tokio::test]
async fn discover_targets_sends_filter_limit_and_auth_header() {
    let app = token_route().route(
        "/devices/queries/devices/v1",
        get(
            |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(
                    headers.get("authorization").and_then(|v| v.to_str().ok()),
                    Some("Bearer tok-1")
                );
                assert_eq!(params.get("filter").map(String::as_str), Some("hostname:'web-*'"));
                assert_eq!(params.get("limit").map(String::as_str), Some("42"));
                Json(json!({"resources": ["aid-1", "aid-2"]}))
            },
        ),
    );
    let client = authenticated(serve(app).await).await;

    let targets = client
        .discover_targets(&TargetQuery::hostname("web-*").with_limit(42))
        .await
        .unwrap();

    assert_eq!(targets, vec![TargetId::from("aid-1"), TargetId::from("aid-2")]);
}

#[tokio::test]
async fn discover_failure_carries_status_and_body() {
    let app = token_route().route(
        "/devices/queries/devices/v1",
        get(|| async { (StatusCode::FORBIDDEN, "scope missing") }),
    );
    let client = authenticated(serve(app).await).await;

    match client.discover_targets(&TargetQuery::hostname("*")).await {
        Err(ClientError::DiscoveryFailed { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("scope missing"));
        }
        other => panic!("expected DiscoveryFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn discover_tolerates_missing_resources_key() {
    let app = token_route().route(
        "/devices/queries/devices/v1",
        get(|| async { Json(json!({"meta": {"query_time": 0.01}})) }),
    );
    let client = authenticated(serve(app).await).await;

    let targets = client
        .discover_targets(&TargetQuery::hostname("*"))
        .await
        .unwrap();
    assert!(targets.is_empty());
}

#[tokio::test]
async fn init_session_sends_both_timeout_params() {
    let app = token_route().route(
        "/real-time-response/combined/batch-init-session/v1",
        post(
            |Query(params): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                assert_eq!(params.get("timeout").map(String::as_str), Some("30"));
                assert_eq!(params.get("timeout_duration").map(String::as_str), Some("30s"));
                assert_eq!(body["host_ids"], json!(["aid-1"]));
                (StatusCode::CREATED, Json(json!({"batch_id": "batch-7"})))
            },
        ),
    );
    let client = authenticated(serve(app).await).await;

    let session = client
        .init_session(&[TargetId::from("aid-1")], &WireTimeout::new(30, "30s"))
        .await
        .unwrap();

    assert_eq!(session, SessionId::from("batch-7"));
}

#[tokio::test]
async fn init_session_non_201_is_an_error() {
    let app = token_route().route(
        "/real-time-response/combined/batch-init-session/v1",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "no hosts online") }),
    );
    let client = authenticated(serve(app).await).await;

    match client
        .init_session(&[TargetId::from("aid-1")], &WireTimeout::new(30, "30s"))
        .await
    {
        Err(ClientError::SessionInitFailed { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("no hosts online"));
        }
        other => panic!("expected SessionInitFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn run_command_returns_raw_body_on_any_status() {
    let app = token_route().route(
        "/real-time-response/combined/batch-admin-command/v1",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded") }),
    );
    let client = authenticated(serve(app).await).await;

    let raw = client
        .run_command(
            &SessionId::from("batch-7"),
            "runscript",
            "runscript -Raw=```id```",
            &WireTimeout::new(30, "10m"),
            &[TargetId::from("aid-1")],
        )
        .await
        .unwrap();

    assert_eq!(raw, b"backend exploded".to_vec());
}

#[tokio::test]
async fn run_command_scopes_to_the_given_hosts() {
    let app = token_route().route(
        "/real-time-response/combined/batch-admin-command/v1",
        post(
            |Query(params): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                assert_eq!(params.get("timeout").map(String::as_str), Some("30"));
                assert_eq!(params.get("timeout_duration").map(String::as_str), Some("10m"));
                assert_eq!(body["base_command"], "runscript");
                assert_eq!(body["batch_id"], "batch-7");
                assert_eq!(body["optional_hosts"], json!(["aid-1"]));
                "{}"
            },
        ),
    );
    let client = authenticated(serve(app).await).await;

    client
        .run_command(
            &SessionId::from("batch-7"),
            "runscript",
            "runscript -Raw=```id```",
            &WireTimeout::new(30, "10m"),
            &[TargetId::from("aid-1")],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn run_command_omits_host_scope_when_empty() {
    let app = token_route().route(
        "/real-time-response/combined/batch-admin-command/v1",
        post(|Json(body): Json<Value>| async move {
            assert!(body.get("optional_hosts").is_none());
            "{}"
        }),
    );
    let client = authenticated(serve(app).await).await;

    client
        .run_command(
            &SessionId::from("batch-7"),
            "runscript",
            "runscript -Raw=```id```",
            &WireTimeout::new(30, "10m"),
            &[],
        )
        .await
        .unwrap();
}
