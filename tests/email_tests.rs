//! Integration tests for the Email resource.
//!
//! These tests run every email operation against a mock VerticalResponse
//! server and check the exact request that reaches the wire.

use serde::{Deserialize, Serialize};
use serde_json::json;
use verticalresponse_api::rest::resources::v1::{Email, LaunchParams, List};
use verticalresponse_api::{
    AccessToken, ApiHost, Listable, Params, ResourceError, RestClient, RestResource, VrConfig,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a REST client pointed at the mock server
fn create_client(server: &MockServer) -> RestClient {
    let config = VrConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .host(ApiHost::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

fn params(value: serde_json::Value) -> Params {
    value.as_object().cloned().unwrap()
}

fn success(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": {"code": 200, "message": message}
    }))
}

#[tokio::test]
async fn test_launch_posts_merged_list_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({"subject": "Hi", "list_ids": [5, 7]})))
        .respond_with(success("Email launched"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let response = email
        .launch(
            &client,
            params(json!({"subject": "Hi", "lists": [{"id": 5}, 7, 5]})),
        )
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.message(), Some("Email launched"));
}

#[tokio::test]
async fn test_launch_with_borrowed_params_leaves_them_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42"))
        .and(body_json(json!({"list_ids": [3, 1, 2]})))
        .respond_with(success("Email launched"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());
    let caller_params = params(json!({"list_ids": [3], "lists": [1, 2, 3]}));

    email.launch(&client, &caller_params).await.unwrap();

    assert_eq!(
        caller_params,
        params(json!({"list_ids": [3], "lists": [1, 2, 3]}))
    );
}

#[tokio::test]
async fn test_launch_with_list_objects() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42"))
        .and(body_json(json!({"list_ids": [10, 11]})))
        .respond_with(success("Email launched"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());
    let lists = vec![
        List {
            id: 10,
            ..Default::default()
        },
        List {
            id: 11,
            ..Default::default()
        },
    ];

    email
        .launch(&client, LaunchParams::new().lists(lists.iter()).list(10u64))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_launch_with_invalid_list_reference_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(success("unexpected"))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let result = email
        .launch(&client, LaunchParams::new().list("not-a-list"))
        .await;

    assert!(matches!(
        result,
        Err(ResourceError::InvalidListReference { .. })
    ));
}

#[tokio::test]
async fn test_test_launch_posts_params_to_test_uri() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42/test"))
        .and(body_json(json!({"preview": true})))
        .respond_with(success("Test sent"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let response = email
        .test_launch(&client, params(json!({"preview": true})))
        .await
        .unwrap();

    assert_eq!(response.message(), Some("Test sent"));
}

#[tokio::test]
async fn test_unschedule_posts_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42/unschedule"))
        .respond_with(success("Email unscheduled"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let response = email.unschedule(&client).await.unwrap();
    assert!(response.is_success());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_unschedule_survives_negative_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42/unschedule"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "-1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42/unschedule"))
        .respond_with(success("Email unscheduled"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server).with_tries(2);
    let email = Email::new(42, Params::new());

    let response = email.unschedule(&client).await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_launch_without_lists_forwards_preset_ids_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42"))
        .and(body_json(json!({"subject": "Hi", "list_ids": ["abc", 1, 1]})))
        .respond_with(success("Email launched"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let response = email
        .launch(&client, params(json!({"subject": "Hi", "list_ids": ["abc", 1, 1]})))
        .await
        .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_lists_queries_lists_scoped_to_email() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/messages/emails/42/lists"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://vrapi.verticalresponse.com/api/v1/messages/emails/42/lists",
            "items": [
                {"url": "a", "attributes": {"id": 5, "name": "Newsletter"}},
                {"url": "b", "attributes": {"id": 7, "name": "Customers"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let lists = email
        .lists(&client, params(json!({"limit": 2})))
        .await
        .unwrap();

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].id, 5);
    assert_eq!(lists[1].name.as_deref(), Some("Customers"));
}

#[tokio::test]
async fn test_all_lists_messages_filtered_to_emails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/messages"))
        .and(query_param("message_type", "email"))
        .and(query_param("foo", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"attributes": {"id": 42, "name": "Spring sale", "message_type": "email"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);

    let emails = Email::all(&client, params(json!({"foo": 1, "message_type": "sms"})))
        .await
        .unwrap();

    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].id, 42);
    assert_eq!(emails[0].message_type.as_deref(), Some("email"));
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Campaign {
    id: u64,
    message_type: String,
}

impl RestResource for Campaign {
    const NAME: &'static str = "Campaign";
    const PLURAL: &'static str = "campaigns";

    fn get_id(&self) -> Option<u64> {
        Some(self.id)
    }
}

impl Listable for Campaign {}

#[tokio::test]
async fn test_all_with_uses_injected_listing_resource() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/campaigns"))
        .and(query_param("message_type", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"attributes": {"id": 1, "message_type": "email"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);

    let campaigns = Email::all_with::<Campaign>(&client, Params::new())
        .await
        .unwrap();

    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0].message_type, "email");
}

#[tokio::test]
async fn test_find_builds_email_with_scoped_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/messages/emails/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://vrapi.verticalresponse.com/api/v1/messages/emails/9",
            "attributes": {"id": 9, "name": "Welcome", "subject": "Hello"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);

    let email = Email::find(&client, 9).await.unwrap().into_inner();

    assert_eq!(email.id, 9);
    assert_eq!(email.attribute("name"), Some(&json!("Welcome")));
    assert_eq!(email.list_scope().base_uri(), "api/v1/messages/emails/9/lists");
}

#[tokio::test]
async fn test_find_missing_email_returns_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/messages/emails/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Not found"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);

    match Email::find(&client, 404).await {
        Err(ResourceError::NotFound { resource, id }) => {
            assert_eq!(resource, "Email");
            assert_eq!(id, "404");
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_launch_rejection_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/emails/42"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {"code": 422, "message": "Email has no lists"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let email = Email::new(42, Params::new());

    let error = email.launch(&client, Params::new()).await.unwrap_err();

    assert!(matches!(error, ResourceError::Http(ref e) if e.status() == Some(422)));
    assert!(error.to_string().contains("Email has no lists"));
}
