//! HTTP API behaviour through the axum router.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use campaign_crypto::Eip55Validator;
use campaign_enrollment::{Collaborators, EnrollmentWorkflow, Intent, Invocation};
use campaign_nullables::{NullClock, NullLookup, NullStore, SequenceCodes};
use campaign_rpc::{cors_layer, router, RpcState};
use campaign_types::{AccountId, CampaignParams};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const ADDR: &str = "0xabc0000000000000000000000000000000000123";
const ADDR_UPPER: &str = "0xABC0000000000000000000000000000000000123";
const ORIGIN: &str = "http://localhost:5173";

struct Api {
    clock: Arc<NullClock>,
    lookup: Arc<NullLookup>,
    workflow: Arc<EnrollmentWorkflow>,
    app: Router,
}

fn api_with(params: CampaignParams) -> Api {
    let clock = Arc::new(NullClock::new(1_800_000_000));
    let lookup = Arc::new(NullLookup::new());
    let workflow = Arc::new(
        EnrollmentWorkflow::new(
            params,
            Collaborators {
                store: Arc::new(NullStore::new()),
                codes: Arc::new(SequenceCodes::new()),
                addresses: Arc::new(Eip55Validator),
                lookup: lookup.clone(),
                clock: clock.clone(),
            },
        )
        .unwrap(),
    );
    let app = router(
        Arc::new(RpcState {
            workflow: workflow.clone(),
        }),
        cors_layer(&[ORIGIN.to_string()]).unwrap(),
    );
    Api {
        clock,
        lookup,
        workflow,
        app,
    }
}

fn api() -> Api {
    api_with(CampaignParams::open_now())
}

impl Api {
    /// Subscribe `u1` as alice on ADDR and verify the account.
    async fn enroll(&self) {
        let dm = Invocation::private(AccountId::new("u1"));
        self.workflow
            .execute(
                &dm,
                Intent::Subscribe {
                    handle: "alice".into(),
                    address: ADDR.into(),
                },
            )
            .await
            .unwrap();
        self.lookup.publish("alice", "c0000001");
        self.workflow.execute(&dm, Intent::Finalize).await.unwrap();
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

#[tokio::test]
async fn get_subscription_requires_address() {
    let api = api();
    let (status, body) = api.get("/get-subscription").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "missing parameter: address" }));
}

#[tokio::test]
async fn get_subscription_matches_any_case() {
    let api = api();
    let (status, _) = api.get(&format!("/get-subscription?address={ADDR}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    api.enroll().await;
    let (status, body) = api
        .get(&format!("/get-subscription?address={ADDR_UPPER}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountId"], "u1");
    assert_eq!(body["externalHandle"], "alice");
    assert_eq!(body["verified"], true);
    assert_eq!(body["balance"], 0);
}

#[tokio::test]
async fn task_and_verify_over_http() {
    let api = api();
    api.enroll().await;

    let (status, body) = api.get(&format!("/task?address={ADDR}")).await;
    assert_eq!(status, StatusCode::OK);
    let code = body["code"].as_str().unwrap().to_string();
    assert_eq!(code, "c0000002");

    let (status, body) = api
        .post_json("/verifytask", json!({ "address": ADDR }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("verification failed"));

    api.lookup.publish("alice", &format!("task {code}"));
    let (status, body) = api
        .post_json("/verifytask", json!({ "address": ADDR_UPPER }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reward"], 1000);
    assert_eq!(body["balance"], 1000);

    let (status, _) = api.get(&format!("/task?address={ADDR}")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn unknown_address_is_not_found() {
    let api = api();
    let (status, _) = api.get(&format!("/task?address={ADDR}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api
        .post_json("/verifytask", json!({ "address": ADDR }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api.post_json("/verifytask", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let api = api();
    let (status, body) = api
        .send(
            Request::post("/verifytask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("bad request:"));

    let (status, body) = api
        .send(Request::post("/verifytask").body(Body::from(ADDR)).unwrap())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = api.get("/task?address=a&address=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn closed_campaign_is_forbidden() {
    let api = api_with(CampaignParams::default());
    api.clock.set(0);
    let (status, body) = api.get(&format!("/task?address={ADDR}")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "the campaign has not started yet");
}

#[tokio::test]
async fn cors_allows_only_configured_origins() {
    let api = api();
    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/task")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    };

    let response = api.app.clone().oneshot(preflight(ORIGIN)).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ORIGIN
    );
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .is_none());

    let response = api
        .app
        .clone()
        .oneshot(preflight("http://evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[test]
fn invalid_origin_is_rejected() {
    assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
}
